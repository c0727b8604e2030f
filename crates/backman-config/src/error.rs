//! Error types for backman-config

use std::fmt;
use std::path::PathBuf;

/// Result type for backman-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration file exists but could not be read
    #[error("Could not read configuration file {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration document is not valid JSON for the schema
    #[error("Could not parse {origin}: {message}")]
    MalformedDocument { origin: String, message: String },

    /// A duration value is neither nanoseconds nor a duration string
    #[error("Invalid duration: {message}")]
    InvalidDuration { message: String },

    /// A mandatory environment variable is absent or empty
    #[error("Required environment variable [{key}] is missing")]
    MissingRequiredEnv { key: String },

    /// An environment variable is set but not valid unicode
    #[error("Environment variable [{key}] is not valid unicode")]
    NonUnicodeEnv { key: String },
}

impl Error {
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(origin: impl Into<String>, cause: impl fmt::Display) -> Self {
        Self::MalformedDocument {
            origin: origin.into(),
            message: cause.to_string(),
        }
    }

    pub fn invalid_duration(message: impl Into<String>) -> Self {
        Self::InvalidDuration {
            message: message.into(),
        }
    }
}
