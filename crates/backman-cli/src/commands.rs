//! Command implementations

use backman_config::ResolvedConfig;
use backman_service::ServiceRegistry;
use serde::Serialize;

use crate::error::{CliError, Result};

/// Print the resolved configuration, secrets masked.
pub fn run_config(config: &ResolvedConfig) -> Result<()> {
    print_json(&config.redacted())
}

/// Print services matching the optional filters.
pub fn run_services(
    registry: &ServiceRegistry,
    service_type: Option<&str>,
    name: Option<&str>,
) -> Result<()> {
    let services = registry.services(service_type.unwrap_or_default(), name.unwrap_or_default());
    tracing::debug!(count = services.len(), "Listing services");
    print_json(&services)
}

/// Print a single service, failing when it does not exist.
pub fn run_service(registry: &ServiceRegistry, label: &str, name: &str) -> Result<()> {
    match registry.service(label, name) {
        Some(service) => print_json(service),
        None => Err(CliError::user(format!(
            "No service named '{name}' with label '{label}'"
        ))),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
