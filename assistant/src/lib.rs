//! # Assistant
//!
//! This crate provides the hrdesk question-answering pipeline: a
//! retrieval-augmented assistant over a small, fixed corpus of HR policy
//! documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      PolicyAssistant                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  question ──► EmbeddingProvider ──► VectorIndex.search          │
//! │                                          │                      │
//! │                                          ▼                      │
//! │                    threshold filter + ChunkTable lookup         │
//! │                                          │                      │
//! │                                          ▼                      │
//! │              ┌──── zero records ────► fixed fallback            │
//! │              │                                                  │
//! │              └──── context records ─► prompt ─► generation      │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The vector index and chunk table are loaded once at startup and shared
//! read-only for the process lifetime; every question is an independent,
//! stateless request.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use hrdesk_assistant::{AssistantConfig, PolicyAssistant};
//! use hrdesk_embeddings::OllamaEmbedder;
//! use hrdesk_generation::OllamaGenerator;
//!
//! let config = AssistantConfig::default();
//! let embedder = Arc::new(OllamaEmbedder::new(
//!     &config.ollama_base_url,
//!     &config.embedding_model,
//!     config.embedding_dimension,
//! ));
//! let generator = Arc::new(OllamaGenerator::new(
//!     &config.ollama_base_url,
//!     &config.generation_model,
//! ));
//!
//! let assistant = PolicyAssistant::new(config, embedder, generator)?;
//! let result = assistant.answer_question("How many casual leave days?").await?;
//! ```

pub mod chunks;
pub mod composer;
pub mod config;
pub mod engine;
pub mod error;
pub mod retriever;

pub use chunks::{Chunk, ChunkTable};
pub use composer::{AnswerComposer, AnswerResult, FALLBACK_ANSWER, SourceRef};
pub use config::AssistantConfig;
pub use engine::{AssistantStats, PolicyAssistant};
pub use error::{AssistantError, ChunkTableError, Result};
pub use retriever::{ContextRecord, Retriever};

// Re-export from dependencies for convenience
pub use hrdesk_embeddings::{EmbeddingProvider, VectorIndex};
pub use hrdesk_generation::GenerationProvider;
