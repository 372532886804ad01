//! Configuration for the assistant pipeline.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{AssistantError, Result};

/// Default number of candidates retrieved per question.
pub const DEFAULT_TOP_K: usize = 4;

/// Default minimum similarity a candidate must meet to be used as context.
///
/// The threshold is a precision/recall knob, not a constant: the right
/// value depends on the corpus and the embedding model and should be tuned
/// empirically. 0.3 is the serving default inherited from tuning against
/// the HR policy corpus with all-minilm embeddings.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.3;

/// Configuration for the assistant pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Ollama API base URL, shared by both providers.
    pub ollama_base_url: String,

    /// Embedding model identifier.
    pub embedding_model: String,

    /// Dimension of the embedding model's vectors. Must match the index.
    pub embedding_dimension: usize,

    /// Generation model identifier.
    pub generation_model: String,

    /// Path to the persisted vector index.
    pub index_path: PathBuf,

    /// Path to the id-to-chunk lookup table.
    pub chunk_table_path: PathBuf,

    /// Number of candidates retrieved per question.
    pub top_k: usize,

    /// Minimum similarity score (inclusive) to keep a candidate.
    pub similarity_threshold: f32,

    /// Timeout in seconds applied to each provider call.
    pub request_timeout_secs: u64,
}

impl AssistantConfig {
    /// Set the Ollama base URL.
    pub fn with_ollama_base_url(mut self, url: impl Into<String>) -> Self {
        self.ollama_base_url = url.into();
        self
    }

    /// Set the index file path.
    pub fn with_index_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.index_path = path.into();
        self
    }

    /// Set the chunk table file path.
    pub fn with_chunk_table_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chunk_table_path = path.into();
        self
    }

    /// Set the number of candidates retrieved per question.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the similarity threshold.
    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(AssistantError::Config(
                "top_k must be at least 1".to_string(),
            ));
        }
        if !self.similarity_threshold.is_finite() {
            return Err(AssistantError::Config(format!(
                "similarity_threshold must be finite, got {}",
                self.similarity_threshold
            )));
        }
        if self.embedding_dimension == 0 {
            return Err(AssistantError::Config(
                "embedding_dimension must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            ollama_base_url: "http://localhost:11434".to_string(),
            embedding_model: "all-minilm".to_string(),
            embedding_dimension: 384,
            generation_model: "llama3".to_string(),
            index_path: PathBuf::from("data/embeddings/index.json"),
            chunk_table_path: PathBuf::from("data/embeddings/id_to_chunk.json"),
            top_k: DEFAULT_TOP_K,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            request_timeout_secs: 120,
        }
    }
}
