//! Configuration resolution for backman
//!
//! This crate turns the configuration sources a backman process sees into one
//! immutable [`ResolvedConfig`]:
//!
//! 1. **Config file** - `config.json` in the working directory, if present
//! 2. **Environment document** - `BACKMAN_CONFIG`, merged field by field
//! 3. **Defaults** - log level and object-store service label
//! 4. **Single-value variables** - credentials, encryption key, Teams settings
//!
//! # Example
//!
//! ```ignore
//! use backman_config::ConfigResolver;
//!
//! let config = ConfigResolver::new(std::env::current_dir()?).resolve()?;
//! println!("log level: {}", config.log_level);
//! ```

pub mod document;
pub mod duration;
pub mod env;
pub mod error;
pub mod resolver;
pub mod shared;

pub use document::{
    ConfigDocument, NotificationConfig, RetentionConfig, S3Config, ServiceConfig,
    TeamsNotificationConfig,
};
pub use duration::TimeoutDuration;
pub use env::{EnvSource, ProcessEnv};
pub use error::{Error, Result};
pub use resolver::{CONFIG_FILE, ConfigResolver, ResolvedConfig};
pub use shared::Shared;
