use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::TodoStore;
use shared::{domain::TodoId, protocol::CreateEndpoint};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod render;
mod shell;

use config::load_settings;

/// Used when `RUST_LOG` is unset. Logs go to stderr; stdout carries the list.
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug)]
#[command(about = "Todo list client that keeps working locally while the server is down")]
struct Args {
    /// Settings file; `todo.toml` in the working directory is used when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    server_url: Option<String>,
    /// Create convention the backend exposes: path, body or model.
    #[arg(long)]
    create_endpoint: Option<CreateEndpoint>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the todo list.
    List,
    /// Add a todo.
    Add {
        #[arg(required = true)]
        content: Vec<String>,
    },
    /// Remove a todo by id.
    Remove { id: i64 },
    /// Interactive session (default).
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if let Some(create_endpoint) = args.create_endpoint {
        settings.create_endpoint = create_endpoint;
    }
    info!(
        server_url = %settings.server_url,
        create_endpoint = %settings.create_endpoint,
        "starting todo client"
    );

    let store = TodoStore::connect(&settings.server_url, settings.create_endpoint)?;

    match args.command.unwrap_or(Command::Shell) {
        Command::List => {
            store.refresh().await;
        }
        Command::Add { content } => {
            store.refresh().await;
            store.add(content.join(" ")).await;
        }
        Command::Remove { id } => {
            store.refresh().await;
            store.remove(TodoId(id)).await;
        }
        Command::Shell => return shell::run(store).await,
    }
    shell::print_state(&store).await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_log_filter_is_info() {
        let filter = EnvFilter::try_new(DEFAULT_LOG_FILTER).expect("valid filter");
        assert_eq!(
            filter.max_level_hint(),
            Some(tracing::level_filters::LevelFilter::INFO)
        );
    }
}
