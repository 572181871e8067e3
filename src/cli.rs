//! CLI argument parsing via clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Set up tmux sessions, windows and panes from a manifest.
#[derive(Debug, Parser)]
#[command(name = "tmux-workflow", version)]
pub struct Args {
    /// tmux socket name (`tmux -L`).
    #[arg(short = 'L', long, env = "TMUX_WORKFLOW_SOCKET_NAME", conflicts_with = "socket_path")]
    pub socket_name: Option<String>,

    /// tmux socket path (`tmux -S`).
    #[arg(short = 'S', long, env = "TMUX_WORKFLOW_SOCKET_PATH")]
    pub socket_path: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create every session declared in a JSON manifest.
    Apply {
        manifest: PathBuf,
        /// Leave all sessions detached, ignoring the manifest's `active`.
        #[arg(long)]
        detached: bool,
    },
    /// List sessions and their windows.
    List {
        /// Print JSON instead of a tree.
        #[arg(long)]
        json: bool,
    },
    /// Attach to (or switch the current client to) a session.
    Attach { session: String },
}
