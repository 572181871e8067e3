use anyhow::{Context, Result};
use clap::Parser;

use tmux_workflow::tmux::{Server, Session};
use tmux_workflow::Manifest;

mod cli;

use cli::{Args, Command};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    match args.command {
        Command::Apply {
            ref manifest,
            detached,
        } => {
            let manifest = Manifest::from_path(manifest)?;
            let server = server_from_args(&args)
                .or_else(|| manifest.server())
                .unwrap_or_default();

            let mut config = manifest.into_configuration(server)?;
            if detached {
                config.active_session = None;
            }

            let result = config.apply_then_attach();
            for session in &config.sessions {
                print_session(session);
            }
            result.context("failed to apply manifest")?;
        }
        Command::List { json } => {
            let server = server_from_args(&args).unwrap_or_default();
            let mut sessions = server
                .list_sessions()
                .context("failed to list tmux sessions")?;
            for session in &mut sessions {
                session.windows = session.list_windows(&server)?;
                for window in &mut session.windows {
                    window.panes = window.list_panes(&server)?;
                }
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&sessions)?);
            } else {
                for session in &sessions {
                    print_session(session);
                }
            }
        }
        Command::Attach { ref session } => {
            let server = server_from_args(&args).unwrap_or_default();
            if !server.has_session(session)? {
                anyhow::bail!("no such session: {}", session);
            }
            server
                .attach_session(&format!("={}", session))
                .with_context(|| format!("failed to attach to {}", session))?;
        }
    }

    Ok(())
}

fn server_from_args(args: &Args) -> Option<Server> {
    match (&args.socket_path, &args.socket_name) {
        (Some(path), _) => Some(Server::with_socket_path(path.clone())),
        (None, Some(name)) => Some(Server::with_socket_name(name.clone())),
        (None, None) => None,
    }
}

fn print_session(session: &Session) {
    println!("{} (${})", session.name, session.id);
    for window in &session.windows {
        println!(
            "  {}: {} (@{}, {} panes)",
            window.index,
            window.name,
            window.id,
            window.panes.len()
        );
    }
}
