use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::TmuxError;
use super::identity::Id;
use super::server::Server;

/// Represents a tmux pane
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pane {
    /// tmux pane id (`%N`), once the pane exists
    pub id: Id,
    pub session_id: u32,
    pub session_name: String,
    pub window_id: u32,
    pub window_name: String,
    pub window_index: u32,
    /// Whether this is the active pane of its window
    pub active: bool,
    /// 0-based position within the window
    pub index: u32,
}

impl Pane {
    /// `-t` selector: `session:window.index`.
    pub fn target(&self) -> String {
        format!("{}:{}.{}", self.session_name, self.window_name, self.index)
    }

    /// Current contents of the pane, verbatim.
    pub fn capture(&self, server: &Server) -> Result<String, TmuxError> {
        server.run(&["capture-pane", "-t", &self.target(), "-p"])
    }

    /// Working directory of the pane's foreground process.
    pub fn current_path(&self, server: &Server) -> Result<String, TmuxError> {
        let out = server.run(&[
            "display-message",
            "-t",
            &self.target(),
            "-p",
            "#{pane_current_path}",
        ])?;
        let trimmed = out
            .strip_suffix("\r\n")
            .or_else(|| out.strip_suffix('\n'))
            .map(str::to_string);
        Ok(trimmed.unwrap_or(out))
    }

    /// Start appending everything the pane prints to `path`. Piping
    /// continues until [`Pane::stop_pipe`] or another `pipe-pane` call.
    pub fn pipe(&self, server: &Server, path: &Path) -> Result<String, TmuxError> {
        let command = format!("cat >> {}", shell_quote(&path.to_string_lossy()));
        server.run(&["pipe-pane", "-t", &self.target(), "-o", &command])
    }

    pub fn stop_pipe(&self, server: &Server) -> Result<(), TmuxError> {
        server.run(&["pipe-pane", "-t", &self.target()])?;
        Ok(())
    }

    /// Type `command` into the pane and press Enter. Does not wait for the
    /// command to finish.
    pub fn run_command(&self, server: &Server, command: &str) -> Result<(), TmuxError> {
        server.run(&["send-keys", "-t", &self.target(), command, "C-m"])?;
        Ok(())
    }

    pub fn select(&self, server: &Server) -> Result<(), TmuxError> {
        server.run(&["select-pane", "-t", &self.target()])?;
        Ok(())
    }
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}
