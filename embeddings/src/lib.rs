//! # Embeddings
//!
//! This crate provides query embedding and exact nearest-neighbor search
//! for the hrdesk retrieval pipeline.
//!
//! ## Features
//!
//! - **Embedding Generation**: Convert text to unit-normalized dense vectors
//! - **Vector Index**: Immutable inner-product index over policy chunks
//! - **Offline Build**: Insert/save API used by the index build step
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Embeddings System                           │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  EmbeddingProvider ──► Embedding ──► VectorIndex.search         │
//! │       │                                   │                     │
//! │       ▼                                   ▼                     │
//! │  Ollama HTTP API                  (score, id) candidates        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All stored vectors are normalized to unit length, so the inner-product
//! scores returned by `VectorIndex::search` are cosine similarities in the
//! range [-1.0, 1.0].

pub mod error;
pub mod index;
pub mod provider;
pub mod similarity;

pub use error::{EmbeddingError, IndexError, Result};
pub use index::{ScoredId, VectorIndex};
pub use provider::{EmbeddingProvider, OllamaEmbedder};
pub use similarity::{dot_product, l2_norm, normalize};

/// A dense vector embedding.
pub type Embedding = Vec<f32>;
