//! Context retrieval: embed, search, filter, dereference.
//!
//! The retriever is the only component with a similarity-based correctness
//! contract: kept records all score at or above the configured threshold
//! and are ordered by descending similarity.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use hrdesk_embeddings::{EmbeddingProvider, VectorIndex};

use crate::chunks::ChunkTable;
use crate::error::Result;

/// One retrieved context record, consumed immediately by the composer.
#[derive(Debug, Clone, Serialize)]
pub struct ContextRecord {
    /// Composed "Q/A" text placed into the generation prompt.
    pub text: String,

    /// Inner-product similarity of the chunk to the question.
    pub similarity: f32,

    /// Source policy document.
    pub document_name: String,

    /// Identifier of the supporting chunk.
    pub chunk_id: u32,
}

/// Retrieves policy context for a question.
///
/// Holds shared read-only handles to the index and chunk table; every
/// retrieval is an independent, stateless request.
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<VectorIndex>,
    chunks: Arc<ChunkTable>,
    top_k: usize,
    similarity_threshold: f32,
}

impl Retriever {
    /// Create a new retriever.
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<VectorIndex>,
        chunks: Arc<ChunkTable>,
        top_k: usize,
        similarity_threshold: f32,
    ) -> Self {
        Self {
            embedder,
            index,
            chunks,
            top_k,
            similarity_threshold,
        }
    }

    /// Retrieve context records for a question, ordered by descending
    /// similarity.
    ///
    /// An empty result is a normal outcome, not an error: either the index
    /// holds no vectors or no candidate met the threshold. Provider and
    /// index failures propagate unchanged.
    pub async fn retrieve(&self, question: &str) -> Result<Vec<ContextRecord>> {
        let query = self.embedder.embed(question).await?;

        let candidates = self.index.search(&query, self.top_k)?;

        if candidates.is_empty() {
            // Distinct from the below-threshold case: nothing was indexed.
            debug!("Vector index returned no candidates (index is empty)");
            return Ok(Vec::new());
        }

        let mut records = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            if candidate.score < self.similarity_threshold {
                continue;
            }

            // The build step guarantees every indexed id has a chunk
            // record; a miss here is a data-integrity anomaly, logged and
            // skipped so the rest of the context survives.
            let Some(chunk) = self.chunks.get(candidate.id) else {
                warn!(
                    "Id {} present in index but missing from chunk table, skipping",
                    candidate.id
                );
                continue;
            };

            records.push(ContextRecord {
                text: chunk.context_text(),
                similarity: candidate.score,
                document_name: chunk.document_name.clone(),
                chunk_id: chunk.chunk_id,
            });
        }

        if records.is_empty() {
            debug!(
                "All {} candidates scored below threshold {}",
                candidates.len(),
                self.similarity_threshold
            );
        } else {
            debug!("Retrieved {} context records", records.len());
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use hrdesk_embeddings::{Embedding, EmbeddingError};

    use crate::chunks::Chunk;

    /// Embedder that always returns a fixed vector.
    struct FixedEmbedder(Embedding);

    #[async_trait]
    impl EmbeddingProvider for FixedEmbedder {
        fn model(&self) -> &str {
            "fixed"
        }

        fn dimension(&self) -> usize {
            self.0.len()
        }

        async fn embed(&self, _text: &str) -> std::result::Result<Embedding, EmbeddingError> {
            Ok(self.0.clone())
        }
    }

    fn chunk(id: u32, document: &str, question: &str, answer: &str) -> (u32, Chunk) {
        (
            id,
            Chunk {
                chunk_id: id,
                document_name: document.to_string(),
                question: question.to_string(),
                answer: answer.to_string(),
            },
        )
    }

    fn sample_retriever(query: Embedding, top_k: usize, threshold: f32) -> Retriever {
        let mut index = VectorIndex::new(3);
        index.insert(0, vec![1.0, 0.0, 0.0]).unwrap();
        index.insert(1, vec![0.0, 1.0, 0.0]).unwrap();
        index.insert(2, vec![0.7, 0.7, 0.0]).unwrap();

        let chunks = ChunkTable::from_records([
            chunk(0, "Leave Policy", "How many casual leave days?", "12 days per year."),
            chunk(1, "Travel Policy", "Who approves travel?", "Your reporting manager."),
            chunk(2, "Leave Policy", "Can leave be carried forward?", "Up to 5 days."),
        ]);

        Retriever::new(
            Arc::new(FixedEmbedder(query)),
            Arc::new(index),
            Arc::new(chunks),
            top_k,
            threshold,
        )
    }

    #[tokio::test]
    async fn test_records_ordered_and_above_threshold() {
        let retriever = sample_retriever(vec![1.0, 0.0, 0.0], 4, 0.3);
        let records = retriever.retrieve("casual leave").await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].chunk_id, 0);
        assert_eq!(records[1].chunk_id, 2);
        for pair in records.windows(2) {
            assert!(pair[0].similarity >= pair[1].similarity);
        }
        for record in &records {
            assert!(record.similarity >= 0.3);
        }
    }

    #[tokio::test]
    async fn test_threshold_above_max_score_yields_empty() {
        let retriever = sample_retriever(vec![1.0, 0.0, 0.0], 4, 1.5);
        let records = retriever.retrieve("anything").await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_empty_index_yields_empty() {
        let retriever = Retriever::new(
            Arc::new(FixedEmbedder(vec![1.0, 0.0, 0.0])),
            Arc::new(VectorIndex::new(3)),
            Arc::new(ChunkTable::from_records([])),
            4,
            0.3,
        );

        let records = retriever.retrieve("anything").await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_missing_chunk_is_skipped() {
        let mut index = VectorIndex::new(3);
        index.insert(0, vec![1.0, 0.0, 0.0]).unwrap();
        index.insert(9, vec![0.9, 0.1, 0.0]).unwrap();

        // Id 9 deliberately absent from the table.
        let chunks = ChunkTable::from_records([chunk(
            0,
            "Leave Policy",
            "How many casual leave days?",
            "12 days per year.",
        )]);

        let retriever = Retriever::new(
            Arc::new(FixedEmbedder(vec![1.0, 0.0, 0.0])),
            Arc::new(index),
            Arc::new(chunks),
            4,
            0.3,
        );

        let records = retriever.retrieve("casual leave").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].chunk_id, 0);
    }

    #[tokio::test]
    async fn test_record_text_is_composed_qa() {
        let retriever = sample_retriever(vec![1.0, 0.0, 0.0], 1, 0.0);
        let records = retriever.retrieve("casual leave").await.unwrap();

        assert_eq!(
            records[0].text,
            "Q: How many casual leave days?\nA: 12 days per year."
        );
        assert_eq!(records[0].document_name, "Leave Policy");
    }
}
