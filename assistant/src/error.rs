//! Error types for the assistant pipeline.
//!
//! Failures stay typed all the way to the caller so front ends can branch
//! on the failure kind: a broken embedding service, a missing index, and a
//! broken generation service are different on-call issues.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for assistant operations.
pub type Result<T> = std::result::Result<T, AssistantError>;

/// Errors that can occur in the question-answering pipeline.
#[derive(Error, Debug)]
pub enum AssistantError {
    /// Embedding provider error.
    #[error("embedding error: {0}")]
    Embedding(#[from] hrdesk_embeddings::EmbeddingError),

    /// Vector index error.
    #[error("index error: {0}")]
    Index(#[from] hrdesk_embeddings::IndexError),

    /// Generation provider error.
    #[error("generation error: {0}")]
    Generation(#[from] hrdesk_generation::GenerationError),

    /// Chunk table error.
    #[error("chunk table error: {0}")]
    ChunkTable(#[from] ChunkTableError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors that can occur while loading the chunk lookup table.
///
/// Like index load failures these are fatal at startup.
#[derive(Error, Debug)]
pub enum ChunkTableError {
    /// Table file could not be read.
    #[error("failed to read chunk table {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Table file could not be parsed.
    #[error("failed to parse chunk table {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Table key is not a stringified integer id.
    #[error("invalid chunk id key in table: {key:?}")]
    InvalidId { key: String },
}
