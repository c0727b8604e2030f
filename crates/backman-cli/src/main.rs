//! backman CLI
//!
//! Resolves configuration and derives the service registry exactly as the
//! backman service would, then prints the result.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    // Configuration problems are fatal: nothing runs on a partial config
    let config = context::config(&root)?;
    logging::init(config, cli.verbose)?;
    tracing::debug!(root = %root.display(), "Configuration loaded");

    match cli.command {
        Commands::Config => commands::run_config(config),
        Commands::Services { service_type, name } => {
            let registry = context::registry(config)?;
            commands::run_services(registry, service_type.as_deref(), name.as_deref())
        }
        Commands::Service { label, name } => {
            let registry = context::registry(config)?;
            commands::run_service(registry, &label, &name)
        }
    }
}
