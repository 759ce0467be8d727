//! Error types for newsms.

use thiserror::Error;

/// Common error type for the relay.
#[derive(Error, Debug)]
pub enum RelayError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Feed retrieval or parsing error.
    #[error("feed error: {0}")]
    Feed(String),

    /// SMS provider error.
    #[error("SMS error: {0}")]
    Sms(String),

    /// Subscriber store error.
    #[error("store error: {0}")]
    Store(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Validation error for user or config input.
    #[error("validation error: {0}")]
    Validation(String),
}

/// Result type alias for relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;
