use thiserror::Error;

/// Top-level error type for the Mythos backend.
#[derive(Error, Debug)]
pub enum MythosError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
