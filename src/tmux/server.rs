use std::fmt;
use std::path::Path;

use super::error::TmuxError;
use super::executor::{TmuxCommandRunner, TmuxExecutor};
use super::parser::{
    parse_panes, parse_sessions, parse_windows, LIST_PANES_FORMAT, LIST_SESSIONS_FORMAT,
    LIST_WINDOWS_FORMAT,
};
use super::pane::Pane;
use super::session::Session;
use super::window::Window;

/// Which panes `list-panes` should enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneScope<'a> {
    /// Every pane on the server (`-a`).
    All,
    /// Every pane of a session (`-s -t`).
    Session(&'a str),
    /// Panes of one window (`-t`).
    Window(&'a str),
}

/// Handle to one tmux server. Every external call goes through it.
pub struct Server {
    runner: Box<dyn TmuxCommandRunner>,
    /// Running inside a tmux client, so attaching means switching the client.
    nested: bool,
}

impl Server {
    pub fn new(runner: impl TmuxCommandRunner + 'static) -> Self {
        Self {
            runner: Box::new(runner),
            nested: std::env::var_os("TMUX").is_some(),
        }
    }

    pub fn with_socket_name(name: impl Into<String>) -> Self {
        Self::new(TmuxExecutor::default().with_socket_name(name))
    }

    pub fn with_socket_path(path: impl Into<String>) -> Self {
        Self::new(TmuxExecutor::default().with_socket_path(path))
    }

    /// Override `$TMUX` detection.
    #[must_use]
    pub fn nested(mut self, nested: bool) -> Self {
        self.nested = nested;
        self
    }

    pub fn is_nested(&self) -> bool {
        self.nested
    }

    /// Run a raw tmux command against this server.
    pub fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
        self.runner.run(args)
    }

    /// Create a detached session. tmux creates the first window (and its pane)
    /// together with the session, so the returned session already holds it.
    pub fn new_session(
        &self,
        name: &str,
        initial_window: Option<&str>,
        start_directory: Option<&Path>,
    ) -> Result<Session, TmuxError> {
        let dir = start_directory.map(|d| d.to_string_lossy().into_owned());
        let mut args = vec!["new-session", "-d", "-P", "-F", LIST_WINDOWS_FORMAT, "-s", name];
        if let Some(window) = initial_window {
            args.extend(["-n", window]);
        }
        if let Some(ref dir) = dir {
            args.extend(["-c", dir.as_str()]);
        }

        let output = self.run(&args)?;
        let window = parse_windows(&output)?
            .into_iter()
            .next()
            .ok_or_else(|| TmuxError::UnexpectedOutput {
                command: "new-session".to_string(),
                output: output.clone(),
            })?;

        tracing::info!(session = %window.session_name, id = %window.session_id, "created session");

        Ok(Session {
            name: window.session_name.clone(),
            id: window.session_id,
            start_directory: start_directory.map(Path::to_path_buf),
            windows: vec![window],
        })
    }

    /// Create a window at the next free index of `session_target`.
    pub fn new_window(
        &self,
        session_target: &str,
        name: &str,
        start_directory: Option<&Path>,
    ) -> Result<Window, TmuxError> {
        let target = format!("{}:", session_target);
        let dir = start_directory.map(|d| d.to_string_lossy().into_owned());
        let mut args = vec![
            "new-window",
            "-P",
            "-F",
            LIST_WINDOWS_FORMAT,
            "-t",
            target.as_str(),
            "-n",
            name,
        ];
        if let Some(ref dir) = dir {
            args.extend(["-c", dir.as_str()]);
        }

        let output = self.run(&args)?;
        let mut window = parse_windows(&output)?
            .into_iter()
            .next()
            .ok_or_else(|| TmuxError::UnexpectedOutput {
                command: "new-window".to_string(),
                output: output.clone(),
            })?;
        window.start_directory = start_directory.map(Path::to_path_buf);

        tracing::info!(window = %window.name, id = %window.id, "created window");
        Ok(window)
    }

    /// Sessions on this server. A server that isn't running has none.
    pub fn list_sessions(&self) -> Result<Vec<Session>, TmuxError> {
        match self.run(&["list-sessions", "-F", LIST_SESSIONS_FORMAT]) {
            Ok(output) => parse_sessions(&output),
            Err(TmuxError::CommandFailed { ref stderr, .. })
                if stderr.contains("no server running") || stderr.contains("no sessions") =>
            {
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Windows of one session, or of the whole server when `session_target`
    /// is `None`.
    pub fn list_windows(&self, session_target: Option<&str>) -> Result<Vec<Window>, TmuxError> {
        let mut args = vec!["list-windows", "-F", LIST_WINDOWS_FORMAT];
        match session_target {
            Some(target) => args.extend(["-t", target]),
            None => args.push("-a"),
        }
        let output = self.run(&args)?;
        parse_windows(&output)
    }

    pub fn list_panes(&self, scope: PaneScope<'_>) -> Result<Vec<Pane>, TmuxError> {
        let mut args = vec!["list-panes", "-F", LIST_PANES_FORMAT];
        match scope {
            PaneScope::All => args.push("-a"),
            PaneScope::Session(target) => args.extend(["-s", "-t", target]),
            PaneScope::Window(target) => args.extend(["-t", target]),
        }
        let output = self.run(&args)?;
        parse_panes(&output)
    }

    /// Exact-name lookup. A failing `has-session` means "no".
    pub fn has_session(&self, name: &str) -> Result<bool, TmuxError> {
        let target = format!("={}", name);
        match self.run(&["has-session", "-t", &target]) {
            Ok(_) => Ok(true),
            Err(TmuxError::CommandFailed { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub fn kill_session(&self, target: &str) -> Result<(), TmuxError> {
        self.run(&["kill-session", "-t", target])?;
        Ok(())
    }

    /// Bring a session to the foreground: switch the current client when
    /// nested, attach the caller's terminal otherwise.
    pub fn attach_session(&self, target: &str) -> Result<(), TmuxError> {
        if self.nested {
            self.run(&["switch-client", "-t", target])?;
            Ok(())
        } else {
            self.runner.run_interactive(&["attach-session", "-t", target])
        }
    }
}

impl Default for Server {
    fn default() -> Self {
        Self::new(TmuxExecutor::default())
    }
}

impl fmt::Debug for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Server").field("nested", &self.nested).finish_non_exhaustive()
    }
}
