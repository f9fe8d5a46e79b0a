//! Command-line arguments.

use crate::config::{CONFIG_ENV, StoreKind};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Nodescope: collaboration and productivity analytics for network nodes
#[derive(Parser, Debug)]
#[command(name = "nodescope", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = CONFIG_ENV)]
    pub config: Option<String>,

    /// Dataset format, overriding the config file
    #[arg(long, global = true, value_enum)]
    pub store: Option<StoreKind>,

    /// Dataset file or directory, overriding the config file
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print collaboration and productivity for one node as JSON
    Analyze {
        /// Node id
        node_id: String,
    },

    /// Write export records for one or more nodes
    Export {
        /// Node ids
        #[arg(required = true)]
        node_ids: Vec<String>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Configuration file management
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `config` subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,

    /// Print a configuration value by dotted key
    Get {
        /// Dotted key, e.g. `goals.default`
        key: String,
    },

    /// Write a default config file
    Init {
        /// Where to write it (default location if omitted)
        #[arg(long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
