//! Nodescope CLI entry point.

#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use nodescope_cli::commands::{cmd_analyze, cmd_export};
use nodescope_cli::config_handlers::handle_config_command;
use nodescope_cli::{Cli, Command, NodescopeConfig};
use std::io::BufWriter;

/// Loads the config file and applies the command-line overrides.
fn load_config(cli: &Cli) -> Result<NodescopeConfig> {
    let mut config = NodescopeConfig::load(cli.config.as_deref())?;
    if let Some(kind) = cli.store {
        config.store.kind = kind;
    }
    if let Some(path) = &cli.data {
        config.store.path = path.clone();
    }
    tracing::debug!(
        store = ?config.store.kind,
        path = %config.store.path.display(),
        "Using dataset"
    );
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose {
        "info,nodescope=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Command::Analyze { node_id } => {
            let engine = load_config(&cli)?.engine();
            cmd_analyze(&engine, node_id, std::io::stdout().lock()).await?;
        }
        Command::Export { node_ids, output } => {
            let config = load_config(&cli)?;
            let engine = config.engine();
            let generated_at = chrono::Utc::now();
            let pretty = config.export.pretty;

            match output {
                Some(path) => {
                    let file = std::fs::File::create(path)
                        .with_context(|| format!("cannot create {}", path.display()))?;
                    cmd_export(&engine, node_ids, generated_at, pretty, BufWriter::new(file))
                        .await?;
                    tracing::info!(path = %path.display(), "Export written");
                }
                None => {
                    let out = std::io::stdout().lock();
                    cmd_export(&engine, node_ids, generated_at, pretty, out).await?;
                }
            }
        }
        Command::Config { action } => {
            handle_config_command(cli.config.as_deref(), action.clone(), std::io::stdout().lock())?;
        }
    }

    Ok(())
}
