//! Chunk records and the id-to-chunk lookup table.
//!
//! A chunk is one retrievable question/answer unit extracted from a source
//! policy document. The lookup table is the JSON file produced by the
//! offline index build: a mapping from stringified integer id to chunk
//! record, loaded wholesale into memory at startup and read-only after
//! that.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ChunkTableError;

/// One retrievable question/answer unit.
///
/// Every field is required; a malformed record fails the table load rather
/// than surfacing as a lookup failure during retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Identifier assigned at index-build time.
    pub chunk_id: u32,

    /// Source policy document.
    #[serde(alias = "doc_name")]
    pub document_name: String,

    /// The question this chunk answers.
    pub question: String,

    /// The policy answer surfaced to the user as supporting context.
    pub answer: String,
}

impl Chunk {
    /// Text embedded at index-build time.
    pub fn embedding_text(&self) -> String {
        format!("Question: {}\nAnswer: {}", self.question, self.answer)
    }

    /// Text placed into the generation prompt as context.
    pub fn context_text(&self) -> String {
        format!("Q: {}\nA: {}", self.question, self.answer)
    }
}

/// In-memory lookup table from index id to chunk record.
pub struct ChunkTable {
    chunks: HashMap<u32, Chunk>,
}

impl ChunkTable {
    /// Load a chunk table from disk.
    ///
    /// Fails if the file is absent, malformed, has a non-integer key, or
    /// contains a record with a missing field.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChunkTableError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|source| ChunkTableError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let raw: HashMap<String, Chunk> =
            serde_json::from_str(&content).map_err(|source| ChunkTableError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut chunks = HashMap::with_capacity(raw.len());
        for (key, chunk) in raw {
            let id: u32 = key
                .parse()
                .map_err(|_| ChunkTableError::InvalidId { key: key.clone() })?;
            chunks.insert(id, chunk);
        }

        info!("Loaded chunk table with {} records", chunks.len());
        Ok(Self { chunks })
    }

    /// Build a table from records, keyed by index id. Used by tests and
    /// the offline build.
    pub fn from_records(records: impl IntoIterator<Item = (u32, Chunk)>) -> Self {
        Self {
            chunks: records.into_iter().collect(),
        }
    }

    /// Look up a chunk by index id.
    pub fn get(&self, id: u32) -> Option<&Chunk> {
        self.chunks.get(&id)
    }

    /// Whether an id is present.
    pub fn contains(&self, id: u32) -> bool {
        self.chunks.contains_key(&id)
    }

    /// Number of records in the table.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
