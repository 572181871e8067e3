//! Declarative tmux workspaces: describe sessions, windows and panes, then
//! let [`Configuration::apply`] drive tmux into that arrangement.

pub mod configuration;
pub mod manifest;
pub mod tmux;

pub use configuration::Configuration;
pub use manifest::{Manifest, ManifestError};
