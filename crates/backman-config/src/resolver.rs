//! Configuration resolution with layered merge
//!
//! The `ConfigResolver` loads configuration from every source in ascending
//! precedence and produces the single [`ResolvedConfig`] a process runs with.

use std::fs;
use std::ops::Deref;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::document::{ConfigDocument, ServiceConfig};
use crate::env::{self, EnvSource, ProcessEnv};
use crate::{Error, Result};

/// Name of the optional configuration file inside the resolver root.
pub const CONFIG_FILE: &str = "config.json";

const REDACTED: &str = "***";

/// The effective configuration after merging all sources
///
/// Read-only: fields are reachable through `Deref` to [`ConfigDocument`],
/// but there is no way to mutate a resolved configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedConfig(ConfigDocument);

impl ResolvedConfig {
    /// Look up the override entry for a service instance.
    pub fn service(&self, name: &str) -> Option<&ServiceConfig> {
        self.0.services.get(name)
    }

    /// A copy safe for display, with secrets masked.
    pub fn redacted(&self) -> ConfigDocument {
        let mut document = self.0.clone();
        for secret in [&mut document.password, &mut document.s3.encryption_key] {
            if !secret.is_empty() {
                *secret = REDACTED.to_string();
            }
        }
        document
    }

    pub fn into_inner(self) -> ConfigDocument {
        self.0
    }
}

impl Deref for ResolvedConfig {
    type Target = ConfigDocument;

    fn deref(&self) -> &ConfigDocument {
        &self.0
    }
}

/// Resolves configuration by merging multiple sources
///
/// Sources, lowest precedence first:
/// 1. `config.json` in the root directory
/// 2. The `BACKMAN_CONFIG` environment variable (a JSON document)
/// 3. Built-in defaults for fields still unset
/// 4. Single-value environment variables (credentials, encryption key,
///    Teams webhook and events), which always win when set
pub struct ConfigResolver<E = ProcessEnv> {
    /// Directory containing `config.json`
    root: PathBuf,

    /// Where environment variables are read from
    env: E,
}

impl ConfigResolver<ProcessEnv> {
    /// Create a resolver reading the process environment.
    ///
    /// # Arguments
    ///
    /// * `root` - The directory expected to contain `config.json`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_env(root, ProcessEnv)
    }
}

impl<E: EnvSource> ConfigResolver<E> {
    /// Create a resolver reading variables from `env` instead of the process.
    ///
    /// This is primarily useful for testing, where each test needs its own
    /// environment without touching the real one.
    pub fn with_env(root: impl Into<PathBuf>, env: E) -> Self {
        Self {
            root: root.into(),
            env,
        }
    }

    /// Get the root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the configuration file, whether or not it exists
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Check if a configuration file exists
    pub fn has_config_file(&self) -> bool {
        self.config_path().exists()
    }

    /// Resolve the configuration by merging all sources
    ///
    /// A missing `config.json` is skipped. A `config.json` that exists but
    /// cannot be read fails with [`Error::FileAccess`]; invalid JSON in the
    /// file or in `BACKMAN_CONFIG` fails with [`Error::MalformedDocument`].
    /// Callers should treat either failure as fatal.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use backman_config::ConfigResolver;
    ///
    /// let env = HashMap::from([(
    ///     "BACKMAN_CONFIG".to_string(),
    ///     r#"{"username": "admin"}"#.to_string(),
    /// )]);
    /// let dir = std::env::temp_dir().join("backman-doc-missing");
    /// let config = ConfigResolver::with_env(dir, env).resolve().unwrap();
    /// assert_eq!(config.username, "admin");
    /// assert_eq!(config.log_level, "info");
    /// ```
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let mut document = ConfigDocument::default();

        // Layer 1 - config.json
        let config_path = self.config_path();
        if config_path.exists() {
            tracing::debug!(?config_path, "Loading config file (layer 1)");
            let content = fs::read_to_string(&config_path)
                .map_err(|e| Error::file_access(&config_path, e))?;
            document = ConfigDocument::parse(&content, &config_path.display().to_string())?;
        } else {
            tracing::debug!(?config_path, "No config file found (layer 1), skipping");
        }

        // Layer 2 - BACKMAN_CONFIG document
        match self.env.var(env::BACKMAN_CONFIG)? {
            Some(raw) if !raw.is_empty() => {
                tracing::debug!("Merging {} document (layer 2)", env::BACKMAN_CONFIG);
                let overlay = ConfigDocument::parse(&raw, env::BACKMAN_CONFIG)?;
                document = document.merged(&overlay);
            }
            _ => tracing::debug!("{} not set (layer 2), skipping", env::BACKMAN_CONFIG),
        }

        let document = self.apply_env_overrides(document.with_defaults())?;
        tracing::debug!(
            services = document.services.len(),
            log_level = %document.log_level,
            "Configuration resolved"
        );

        Ok(ResolvedConfig(document))
    }

    /// Apply the single-value environment variables over `document`.
    fn apply_env_overrides(&self, mut document: ConfigDocument) -> Result<ConfigDocument> {
        let scalars = [
            (env::BACKMAN_USERNAME, &mut document.username),
            (env::BACKMAN_PASSWORD, &mut document.password),
            (env::BACKMAN_ENCRYPTION_KEY, &mut document.s3.encryption_key),
            (env::BACKMAN_TEAMS_WEBHOOK, &mut document.notifications.teams.webhook),
        ];
        for (key, field) in scalars {
            if let Some(value) = self.env.var(key)?.filter(|v| !v.is_empty()) {
                tracing::debug!(key, "Overriding from environment (layer 4)");
                *field = value;
            }
        }

        // An empty event list is meaningful: it clears configured events
        if let Some(events) = self.env.var(env::BACKMAN_TEAMS_EVENTS)? {
            tracing::debug!(key = env::BACKMAN_TEAMS_EVENTS, "Overriding from environment (layer 4)");
            document.notifications.teams.events = env::split_list(&events);
        }

        Ok(document)
    }
}
