//! JSON description of a workspace, turned into a [`Configuration`].
//!
//! ```json
//! {
//!   "socket_name": "work",
//!   "active": "api",
//!   "sessions": [
//!     {
//!       "name": "api",
//!       "start_directory": "~/src/api",
//!       "windows": [
//!         { "name": "editor" },
//!         { "name": "shells", "panes": 3, "layout": "main-vertical" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::configuration::Configuration;
use crate::tmux::{Layout, Server, Session, Window};

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("active session {0:?} is not declared")]
    UnknownActiveSession(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// tmux `-L` socket name
    #[serde(default)]
    pub socket_name: Option<String>,
    /// tmux `-S` socket path; wins over `socket_name`
    #[serde(default)]
    pub socket_path: Option<String>,
    /// Name of the session to attach once it's created
    #[serde(default)]
    pub active: Option<String>,
    pub sessions: Vec<SessionSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSpec {
    pub name: String,
    #[serde(default)]
    pub start_directory: Option<String>,
    #[serde(default)]
    pub windows: Vec<WindowSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowSpec {
    pub name: String,
    #[serde(default)]
    pub start_directory: Option<String>,
    #[serde(default = "default_panes")]
    pub panes: usize,
    #[serde(default)]
    pub layout: Option<Layout>,
}

fn default_panes() -> usize {
    1
}

impl Manifest {
    pub fn from_path(path: &Path) -> Result<Self, ManifestError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Server selected by the manifest's socket settings, if any.
    pub fn server(&self) -> Option<Server> {
        match (&self.socket_path, &self.socket_name) {
            (Some(path), _) => Some(Server::with_socket_path(path.clone())),
            (None, Some(name)) => Some(Server::with_socket_name(name.clone())),
            (None, None) => None,
        }
    }

    /// Build the declared sessions on `server`.
    pub fn into_configuration(self, server: Server) -> Result<Configuration, ManifestError> {
        let active_session = match &self.active {
            Some(name) => Some(
                self.sessions
                    .iter()
                    .position(|s| &s.name == name)
                    .ok_or_else(|| ManifestError::UnknownActiveSession(name.clone()))?,
            ),
            None => None,
        };

        let mut config = Configuration::new(server);
        config.active_session = active_session;

        for spec in self.sessions {
            let mut session = Session::new(spec.name);
            session.start_directory = spec.start_directory.as_deref().map(expand_home);

            for w in spec.windows {
                let mut window = Window::new(w.name).with_panes(w.panes);
                window.start_directory = w.start_directory.as_deref().map(expand_home);
                window.layout = w.layout;
                session.add_window(window);
            }

            config.add_session(session);
        }

        Ok(config)
    }
}

/// Expand a leading `~` to the home directory.
fn expand_home(dir: &str) -> PathBuf {
    let rest = match dir.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(dir),
    };

    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(dir),
    }
}
