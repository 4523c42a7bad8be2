use thiserror::Error;

/// Top-level error type for Fabsense.
///
/// Subsystem crates define their own error types and implement
/// `From<FabsenseError>` so that `?` works across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FabsenseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for FabsenseError {
    fn from(err: toml::de::Error) -> Self {
        FabsenseError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for FabsenseError {
    fn from(err: toml::ser::Error) -> Self {
        FabsenseError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for FabsenseError {
    fn from(err: serde_json::Error) -> Self {
        FabsenseError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Fabsense operations.
pub type Result<T> = std::result::Result<T, FabsenseError>;
