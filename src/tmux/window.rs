use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::error::TmuxError;
use super::identity::Id;
use super::layout::Layout;
use super::pane::Pane;
use super::server::{PaneScope, Server};

/// Represents a tmux window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub name: String,
    /// tmux window id (`@N`), once the window exists
    pub id: Id,
    /// Position within the session
    pub index: u32,
    /// Owning session
    pub session_id: Id,
    pub session_name: String,
    /// Working directory; falls back to the session's when unset
    pub start_directory: Option<PathBuf>,
    pub layout: Option<Layout>,
    /// Desired panes at configuration time, actual panes after reconciliation
    pub panes: Vec<Pane>,
}

impl Window {
    /// A speculative window with no panes declared.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Declare `count` panes.
    #[must_use]
    pub fn with_panes(mut self, count: usize) -> Self {
        self.panes = vec![Pane::default(); count];
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    #[must_use]
    pub fn with_start_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.start_directory = Some(dir.into());
        self
    }

    /// Declare one more pane. Only changes the in-memory configuration.
    pub fn add_pane(&mut self, pane: Pane) {
        self.panes.push(pane);
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = Some(layout);
    }

    /// `-t` selector: `@id` when realized, `session:window` otherwise.
    pub fn target(&self) -> String {
        match self.id {
            Id::Realized(id) => format!("@{}", id),
            Id::Speculative => format!("{}:{}", self.session_name, self.name),
        }
    }

    /// Record the identity tmux reported for this window.
    pub(crate) fn realize(&mut self, created: &Window) -> Result<(), TmuxError> {
        if let Id::Realized(id) = created.id {
            self.id.promote(id, "window", &self.name)?;
        }
        self.name = created.name.clone();
        self.index = created.index;
        Ok(())
    }

    pub fn list_panes(&self, server: &Server) -> Result<Vec<Pane>, TmuxError> {
        server.list_panes(PaneScope::Window(&self.target()))
    }

    /// Split the window once and return the new pane.
    ///
    /// The new pane is taken to be the last one tmux lists for the window,
    /// which holds as long as nothing else reorders panes meanwhile. A split
    /// refused because the target already exists is not an error.
    pub fn split_pane(&self, server: &Server) -> Result<Pane, TmuxError> {
        let target = self.target();
        let dir = self
            .start_directory
            .as_ref()
            .map(|d| d.to_string_lossy().into_owned());

        let mut args = vec!["split-window", "-t", target.as_str(), "-P", "-F", "#{pane_id}"];
        if let Some(ref dir) = dir {
            args.extend(["-c", dir.as_str()]);
        }

        match server.run(&args) {
            Ok(_) => {}
            Err(e) if e.is_already_exists() => {
                tracing::warn!(window = %self.name, error = %e, "split target already exists");
            }
            Err(e) => return Err(e),
        }

        self.list_panes(server)?
            .pop()
            .ok_or_else(|| TmuxError::UnexpectedOutput {
                command: format!("list-panes -t {}", target),
                output: String::new(),
            })
    }

    /// Focus this window.
    pub fn select(&self, server: &Server) -> Result<(), TmuxError> {
        server.run(&["select-window", "-t", &self.target()])?;
        Ok(())
    }

    /// Apply a preset layout to this window.
    pub fn select_layout(&self, server: &Server, layout: Layout) -> Result<(), TmuxError> {
        server.run(&["select-layout", "-t", &self.target(), layout.as_str()])?;
        Ok(())
    }

    pub fn rename(&mut self, server: &Server, name: &str) -> Result<(), TmuxError> {
        server.run(&["rename-window", "-t", &self.target(), name])?;
        self.name = name.to_string();
        Ok(())
    }
}
