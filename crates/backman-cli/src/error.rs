//! Error types for backman-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from backman-config
    #[error(transparent)]
    Config(#[from] backman_config::Error),

    /// Error from backman-service
    #[error(transparent)]
    Service(#[from] backman_service::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Logging could not be set up
    #[error("Logging setup failed: {message}")]
    Logging { message: String },

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
