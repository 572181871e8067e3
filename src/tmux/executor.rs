//! Boundary to the tmux binary. Every multiplexer call funnels through
//! [`TmuxCommandRunner`] so the models can be driven by a fake in tests.

use std::process::{Command, Stdio};
use std::sync::Arc;

use super::error::TmuxError;

/// Runs one tmux argument vector and waits for it to finish.
pub trait TmuxCommandRunner {
    /// Run with captured output. Returns stdout on success.
    fn run(&self, args: &[&str]) -> Result<String, TmuxError>;

    /// Run attached to the caller's terminal (e.g. `attach-session`).
    fn run_interactive(&self, args: &[&str]) -> Result<(), TmuxError> {
        self.run(args).map(|_| ())
    }
}

impl<T: TmuxCommandRunner + ?Sized> TmuxCommandRunner for &T {
    fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
        (**self).run(args)
    }

    fn run_interactive(&self, args: &[&str]) -> Result<(), TmuxError> {
        (**self).run_interactive(args)
    }
}

impl<T: TmuxCommandRunner + ?Sized> TmuxCommandRunner for Arc<T> {
    fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
        (**self).run(args)
    }

    fn run_interactive(&self, args: &[&str]) -> Result<(), TmuxError> {
        (**self).run_interactive(args)
    }
}

/// Client for the tmux CLI
#[derive(Debug, Clone)]
pub struct TmuxExecutor {
    /// Path to tmux binary
    tmux_path: String,
    socket_path: Option<String>,
    socket_name: Option<String>,
}

impl TmuxExecutor {
    pub fn new(tmux_path: impl Into<String>) -> Self {
        Self {
            tmux_path: tmux_path.into(),
            socket_path: None,
            socket_name: None,
        }
    }

    #[must_use]
    pub fn with_socket_path(mut self, path: impl Into<String>) -> Self {
        self.socket_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_socket_name(mut self, name: impl Into<String>) -> Self {
        self.socket_name = Some(name.into());
        self
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.tmux_path);
        // Socket path takes precedence over socket name
        if let Some(ref path) = self.socket_path {
            cmd.args(["-S", path]);
        } else if let Some(ref name) = self.socket_name {
            cmd.args(["-L", name]);
        }
        cmd.args(args);
        cmd
    }
}

impl Default for TmuxExecutor {
    fn default() -> Self {
        Self::new("tmux")
    }
}

impl TmuxCommandRunner for TmuxExecutor {
    fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
        tracing::debug!(?args, "tmux");
        let output = self.command(args).output()?;

        if !output.status.success() {
            return Err(TmuxError::CommandFailed {
                command: args.join(" "),
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn run_interactive(&self, args: &[&str]) -> Result<(), TmuxError> {
        tracing::debug!(?args, "tmux (interactive)");
        let status = self
            .command(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;

        if !status.success() {
            return Err(TmuxError::CommandFailed {
                command: args.join(" "),
                code: status.code().unwrap_or(-1),
                stderr: String::new(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_executor_targets_default_server() {
        let exec = TmuxExecutor::default();
        assert_eq!(exec.tmux_path, "tmux");
        let cmd = exec.command(&["list-sessions"]);
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, vec!["list-sessions"]);
    }

    #[test]
    fn socket_path_wins_over_socket_name() {
        let exec = TmuxExecutor::default()
            .with_socket_name("work")
            .with_socket_path("/tmp/work.sock");
        let cmd = exec.command(&["list-panes", "-a"]);
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, vec!["-S", "/tmp/work.sock", "list-panes", "-a"]);
    }

    #[test]
    fn socket_name_selects_named_server() {
        let exec = TmuxExecutor::default().with_socket_name("work");
        let cmd = exec.command(&["kill-server"]);
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, vec!["-L", "work", "kill-server"]);
    }

    #[test]
    fn blanket_impls_forward() {
        struct Echo;
        impl TmuxCommandRunner for Echo {
            fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
                Ok(args.join(","))
            }
        }
        let echo = Echo;
        assert_eq!((&echo).run(&["a", "b"]).unwrap(), "a,b");
        let shared = Arc::new(Echo);
        assert_eq!(shared.run(&["c"]).unwrap(), "c");
        assert!(shared.run_interactive(&["d"]).is_ok());
    }
}
