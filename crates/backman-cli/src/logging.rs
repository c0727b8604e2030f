use backman_config::ResolvedConfig;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{CliError, Result};

/// Initialize a tracing subscriber writing to stderr.
///
/// The filter comes from `RUST_LOG` when set, otherwise from the configured
/// log level. `verbose` forces debug output. The configured timestamp flag
/// decides whether lines carry a timestamp.
pub fn init(config: &ResolvedConfig, verbose: bool) -> Result<()> {
    let filter_layer = if verbose {
        EnvFilter::try_new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level_directive(&config.log_level)))
            .or_else(|_| EnvFilter::try_new("info"))
    }
    .map_err(|e| CliError::Logging {
        message: e.to_string(),
    })?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact();

    let registry = tracing_subscriber::registry().with(filter_layer);
    let installed = if config.logging_timestamp {
        registry.with(fmt_layer).try_init()
    } else {
        registry.with(fmt_layer.without_time()).try_init()
    };

    installed.map_err(|e| CliError::Logging {
        message: e.to_string(),
    })
}

/// Map configured level names onto tracing filter directives.
///
/// Unknown names fall back to `info`.
fn level_directive(level: &str) -> &'static str {
    match level.trim().to_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "warn" | "warning" => "warn",
        "error" | "fatal" | "panic" | "critical" => "error",
        _ => "info",
    }
}
