//! tmux boundary: command execution, listing parsers and the
//! session/window/pane models.

pub mod error;
pub mod executor;
pub mod identity;
pub mod layout;
pub mod pane;
pub mod parser;
pub mod server;
pub mod session;
pub mod window;

pub use error::TmuxError;
pub use executor::{TmuxCommandRunner, TmuxExecutor};
pub use identity::Id;
pub use layout::Layout;
pub use pane::Pane;
pub use parser::{parse_panes, parse_sessions, parse_windows};
pub use server::{PaneScope, Server};
pub use session::Session;
pub use window::Window;
