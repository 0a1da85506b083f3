//! Error types for Turbo Push API operations.

use thiserror::Error;

/// Result type alias for Turbo Push API operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors related to Turbo Push API operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service answered with a nonzero business code.
    #[error("Turbo Push API error (code {code}): {msg}")]
    Api {
        /// Application-level failure code (nonzero)
        code: i64,
        /// Human-readable message from the service
        msg: String,
    },

    /// The service returned a body we could not make sense of.
    #[error("Invalid response from Turbo Push API: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
