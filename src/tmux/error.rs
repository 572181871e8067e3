//! Error types for the tmux boundary and the reconciliation engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TmuxError {
    /// tmux ran but exited unsuccessfully. `stderr` is kept verbatim.
    #[error("tmux {command} failed (exit code {code}): {}", .stderr.trim_end())]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("failed to parse tmux output line {line_num}: {detail}")]
    Parse { line_num: usize, detail: String },

    #[error("unexpected output from tmux {command}: {output:?}")]
    UnexpectedOutput { command: String, output: String },

    #[error("{entity} {name} is already bound to a tmux id")]
    AlreadyRealized { entity: &'static str, name: String },

    #[error("Server was not initialized")]
    NoServer,

    #[error("Required at least a single tmux session to apply configuration")]
    NoSessions,

    #[error("Session {session} doesn't contain any windows")]
    EmptySession { session: String },

    #[error("active session index {index} is out of range")]
    UnknownActiveSession { index: usize },

    #[error("tmux io error: {0}")]
    Io(#[from] std::io::Error),
}

impl TmuxError {
    /// True when tmux refused the command because its target already exists.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, TmuxError::CommandFailed { stderr, .. } if stderr.contains("already exists"))
    }
}
