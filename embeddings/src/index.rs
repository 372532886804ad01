//! Immutable vector index for exact nearest-neighbor search.
//!
//! The index is built once, offline, by embedding every policy chunk. At
//! serving time it is loaded into memory and never mutated, so any number
//! of concurrent searches can share it without locking.

use std::collections::HashSet;
use std::path::Path;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::Embedding;
use crate::error::IndexError;
use crate::similarity::{dot_product, normalize};

/// A single (score, id) search candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredId {
    /// Chunk id the vector was built from.
    pub id: u32,

    /// Inner-product similarity to the query, in [-1.0, 1.0].
    pub score: f32,
}

/// One stored (id, vector) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexEntry {
    id: u32,
    embedding: Embedding,
}

/// On-disk representation of the index.
#[derive(Serialize, Deserialize)]
struct IndexFile {
    dimension: usize,
    entries: Vec<IndexEntry>,
}

/// Exact inner-product index over the full corpus.
///
/// All stored vectors are unit-normalized, so inner-product scores are
/// cosine similarities. The corpus this system targets is small (hundreds
/// to low thousands of chunks), so a linear scan is appropriate and no
/// approximate-search structure is needed.
pub struct VectorIndex {
    dimension: usize,
    entries: Vec<IndexEntry>,
    ids: HashSet<u32>,
}

impl VectorIndex {
    /// Create an empty index for vectors of the given dimension.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            entries: Vec::new(),
            ids: HashSet::new(),
        }
    }

    /// Load a persisted index from disk.
    ///
    /// Fails if the file is absent, malformed, contains a vector whose
    /// dimension disagrees with the file header, or repeats an id.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, IndexError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|source| IndexError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let file: IndexFile =
            serde_json::from_str(&content).map_err(|source| IndexError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut index = Self::new(file.dimension);
        for entry in file.entries {
            if entry.embedding.len() != index.dimension {
                return Err(IndexError::DimensionMismatch {
                    expected: index.dimension,
                    actual: entry.embedding.len(),
                });
            }
            if !index.ids.insert(entry.id) {
                return Err(IndexError::DuplicateId(entry.id));
            }
            index.entries.push(entry);
        }

        info!(
            "Loaded vector index with {} entries (dimension {})",
            index.entries.len(),
            index.dimension
        );
        Ok(index)
    }

    /// Persist the index to disk.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), IndexError> {
        let path = path.as_ref();

        let file = IndexFile {
            dimension: self.dimension,
            entries: self.entries.clone(),
        };
        let content = serde_json::to_string(&file).map_err(|source| IndexError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        std::fs::write(path, content).map_err(|source| IndexError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Saved vector index with {} entries", self.entries.len());
        Ok(())
    }

    /// Insert a vector during the offline build.
    ///
    /// The vector is normalized to unit length before storage.
    pub fn insert(&mut self, id: u32, mut embedding: Embedding) -> Result<(), IndexError> {
        if embedding.len() != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                actual: embedding.len(),
            });
        }
        if !self.ids.insert(id) {
            return Err(IndexError::DuplicateId(id));
        }

        normalize(&mut embedding);
        self.entries.push(IndexEntry { id, embedding });
        Ok(())
    }

    /// Dimension of stored vectors.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of stored vectors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether an id is present in the index.
    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    /// All ids in the index.
    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    /// Search for the `k` nearest neighbors of a query vector.
    ///
    /// Returns at most `k` candidates ordered by descending inner-product
    /// score. Fewer than `k` stored vectors simply shorten the result.
    /// The query must already be unit-normalized (the embedding adapter
    /// guarantees this) for scores to be cosine similarities.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredId>, IndexError> {
        if query.len() != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut scored: Vec<(OrderedFloat<f32>, u32)> = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            // Dimensions were validated at insert/load time.
            let score = dot_product(query, &entry.embedding).map_err(|_| {
                IndexError::DimensionMismatch {
                    expected: self.dimension,
                    actual: entry.embedding.len(),
                }
            })?;
            scored.push((OrderedFloat(score), entry.id));
        }

        scored.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(score, id)| ScoredId { id, score: score.0 })
            .collect())
    }
}
