//! Error types for the embeddings system.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for embedding operations.
pub type Result<T, E = EmbeddingError> = std::result::Result<T, E>;

/// Errors that can occur while generating embeddings.
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// API request failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// Invalid response from provider.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Dimension mismatch.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Request timed out.
    #[error("embedding request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// HTTP error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Errors that can occur while loading or searching the vector index.
///
/// Load failures are fatal at startup: the process must refuse to serve
/// questions with a missing or corrupt index rather than fail lazily on
/// the first query.
#[derive(Error, Debug)]
pub enum IndexError {
    /// Index file could not be read.
    #[error("failed to read index file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Index file could not be parsed.
    #[error("failed to parse index file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Index file could not be written.
    #[error("failed to write index file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Vector dimension does not match the index.
    #[error("dimension mismatch: index expects {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Same id inserted twice.
    #[error("duplicate id in index: {0}")]
    DuplicateId(u32),
}
