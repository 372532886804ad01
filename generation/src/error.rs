//! Error types for the generation boundary.

use thiserror::Error;

/// Result type alias for generation operations.
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Errors that can occur while generating an answer.
///
/// These are per-request failures and must surface to the caller as
/// failures. They are never converted into the "no policy info" fallback
/// answer: "I don't know" and "the answering service is down" are
/// different outcomes.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// API request failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// Invalid response from provider.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Request timed out.
    #[error("generation request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// HTTP error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
