//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// backman - inspect resolved configuration and bound services
#[derive(Parser, Debug)]
#[command(name = "backman")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory containing config.json (defaults to the working directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the resolved configuration with secrets masked
    Config,

    /// List effective services
    ///
    /// Examples:
    ///   backman services                  # Every supported service
    ///   backman services --type postgres  # Services with that label
    ///   backman services --name db1       # A single instance
    Services {
        /// Only services with this label
        #[arg(long = "type", value_name = "LABEL")]
        service_type: Option<String>,

        /// Only the service with this instance name
        #[arg(long)]
        name: Option<String>,
    },

    /// Show one service by label and instance name
    Service {
        /// Service label, e.g. postgres
        label: String,

        /// Instance name
        name: String,
    },
}
