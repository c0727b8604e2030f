//! Error types for backman-service

/// Result type for backman-service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading the service catalog
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Label is not one of the supported service types
    #[error("Unknown service type: {label}")]
    UnknownServiceType { label: String },

    /// The platform catalog document could not be parsed
    #[error("Malformed service catalog: {message}")]
    MalformedCatalog { message: String },

    /// Configuration error from backman-config
    #[error(transparent)]
    Config(#[from] backman_config::Error),
}
