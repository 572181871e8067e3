use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::TmuxError;
use super::identity::Id;
use super::pane::Pane;
use super::server::{PaneScope, Server};
use super::window::Window;

/// Represents a tmux session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Session name
    pub name: String,
    /// tmux session id (`$N`), once the session exists
    pub id: Id,
    /// Default working directory for windows that don't set their own
    pub start_directory: Option<PathBuf>,
    /// Declared windows before reconciliation, realized windows after
    pub windows: Vec<Window>,
}

impl Session {
    /// A speculative session, not yet created in tmux.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_start_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.start_directory = Some(dir.into());
        self
    }

    #[must_use]
    pub fn with_window(mut self, window: Window) -> Self {
        self.windows.push(window);
        self
    }

    /// Declare a window. Only changes the in-memory configuration.
    pub fn add_window(&mut self, window: Window) {
        self.windows.push(window);
    }

    /// `-t` selector: `$id` when realized, the name otherwise.
    pub fn target(&self) -> String {
        match self.id {
            Id::Realized(id) => format!("${}", id),
            Id::Speculative => self.name.clone(),
        }
    }

    /// Record the identity tmux reported for this session.
    pub(crate) fn realize(&mut self, created: &Session) -> Result<(), TmuxError> {
        if let Id::Realized(id) = created.id {
            self.id.promote(id, "session", &self.name)?;
        }
        self.name = created.name.clone();
        Ok(())
    }

    /// Attach (or switch the current client) to this session.
    pub fn attach(&self, server: &Server) -> Result<(), TmuxError> {
        server.attach_session(&self.target())
    }

    pub fn new_window(
        &self,
        server: &Server,
        name: &str,
        start_directory: Option<&Path>,
    ) -> Result<Window, TmuxError> {
        server.new_window(&self.target(), name, start_directory)
    }

    pub fn list_windows(&self, server: &Server) -> Result<Vec<Window>, TmuxError> {
        server.list_windows(Some(&self.target()))
    }

    pub fn list_panes(&self, server: &Server) -> Result<Vec<Pane>, TmuxError> {
        server.list_panes(PaneScope::Session(&self.target()))
    }

    pub fn kill(&self, server: &Server) -> Result<(), TmuxError> {
        server.kill_session(&self.target())
    }
}
