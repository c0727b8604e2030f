//! Process-wide configuration and service registry
//!
//! Both are built on first use and shared for the rest of the process.

use std::path::Path;

use backman_config::{ConfigResolver, ProcessEnv, ResolvedConfig, Shared};
use backman_service::{Catalog, ServiceRegistry};

use crate::error::Result;

static CONFIG: Shared<ResolvedConfig> = Shared::new();
static REGISTRY: Shared<ServiceRegistry> = Shared::new();

/// The resolved configuration, reading `config.json` from `root` on first use.
pub fn config(root: &Path) -> Result<&'static ResolvedConfig> {
    let config = CONFIG.get_or_try_init(|| ConfigResolver::new(root).resolve())?;
    Ok(config)
}

/// The service registry, built from `VCAP_SERVICES` on first use.
pub fn registry(config: &ResolvedConfig) -> Result<&'static ServiceRegistry> {
    let registry = REGISTRY.get_or_try_init(|| {
        let catalog = Catalog::from_env(&ProcessEnv)?;
        Ok::<_, backman_service::Error>(ServiceRegistry::derive(&catalog, config))
    })?;
    Ok(registry)
}
