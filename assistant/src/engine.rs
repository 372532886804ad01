//! The question-answering engine.
//!
//! `PolicyAssistant` wires the pipeline together: it loads the vector
//! index and chunk table once at construction, receives its providers by
//! injection, and exposes `answer_question` as the single entry point for
//! front ends.

use std::sync::Arc;

use tracing::{debug, info, warn};

use hrdesk_embeddings::{EmbeddingProvider, VectorIndex};
use hrdesk_generation::GenerationProvider;

use crate::chunks::ChunkTable;
use crate::composer::{AnswerComposer, AnswerResult};
use crate::config::AssistantConfig;
use crate::error::{AssistantError, Result};
use crate::retriever::{ContextRecord, Retriever};

/// Retrieval-augmented assistant over the HR policy corpus.
///
/// The index and chunk table are immutable after construction, so one
/// assistant can serve any number of concurrent questions without
/// synchronization.
pub struct PolicyAssistant {
    config: AssistantConfig,
    index: Arc<VectorIndex>,
    chunks: Arc<ChunkTable>,
    retriever: Retriever,
    composer: AnswerComposer,
}

impl PolicyAssistant {
    /// Construct the assistant, loading the index and chunk table.
    ///
    /// Fails up front on a missing or corrupt index or table: the process
    /// must refuse to serve questions rather than fail lazily on the first
    /// one.
    pub fn new(
        config: AssistantConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn GenerationProvider>,
    ) -> Result<Self> {
        config.validate()?;

        info!("Initializing policy assistant");

        let index = Arc::new(VectorIndex::load(&config.index_path)?);
        let chunks = Arc::new(ChunkTable::load(&config.chunk_table_path)?);

        if embedder.dimension() != index.dimension() {
            return Err(AssistantError::Config(format!(
                "embedding model produces {}-dimensional vectors but the index was built with {}",
                embedder.dimension(),
                index.dimension()
            )));
        }

        let missing = index.ids().filter(|id| !chunks.contains(*id)).count();
        if missing > 0 {
            // Retrieval skips these defensively, but a healthy build never
            // produces them.
            warn!(
                "{missing} of {} indexed ids have no chunk record",
                index.len()
            );
        }

        let retriever = Retriever::new(
            embedder,
            index.clone(),
            chunks.clone(),
            config.top_k,
            config.similarity_threshold,
        );
        let composer = AnswerComposer::new(generator);

        info!(
            "Policy assistant ready: {} vectors, {} chunks, top_k={}, threshold={}",
            index.len(),
            chunks.len(),
            config.top_k,
            config.similarity_threshold
        );

        Ok(Self {
            config,
            index,
            chunks,
            retriever,
            composer,
        })
    }

    /// Answer a question from the HR policy corpus.
    ///
    /// Returns a grounded answer when context was retrieved, the fixed
    /// fallback when nothing met the threshold, or a typed error when a
    /// provider or the index failed.
    pub async fn answer_question(&self, question: &str) -> Result<AnswerResult> {
        debug!("Received question: {question}");

        let records = self.retriever.retrieve(question).await?;
        let result = self.composer.compose(question, &records).await?;

        debug!(
            "Answered question (sourced: {}, sources: {})",
            result.sourced,
            result.sources.len()
        );
        Ok(result)
    }

    /// Retrieve raw context records without composing an answer.
    ///
    /// Used by the CLI search command and for retrieval diagnostics.
    pub async fn search(&self, question: &str) -> Result<Vec<ContextRecord>> {
        self.retriever.retrieve(question).await
    }

    /// The active configuration.
    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Corpus statistics.
    pub fn stats(&self) -> AssistantStats {
        AssistantStats {
            indexed_vectors: self.index.len(),
            chunks: self.chunks.len(),
            dimension: self.index.dimension(),
        }
    }
}

/// Statistics about the loaded corpus.
#[derive(Debug, Clone)]
pub struct AssistantStats {
    /// Number of vectors in the index.
    pub indexed_vectors: usize,

    /// Number of records in the chunk table.
    pub chunks: usize,

    /// Vector dimension.
    pub dimension: usize,
}
