//! Similarity computation for embeddings.

use crate::Embedding;
use crate::error::{EmbeddingError, Result};

/// Compute the inner product between two embeddings.
///
/// For unit-normalized vectors this equals the cosine similarity:
/// 1.0 means identical direction, 0.0 orthogonal, -1.0 opposite.
pub fn dot_product(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    Ok(a.iter().zip(b.iter()).map(|(x, y)| x * y).sum())
}

/// Compute the L2 norm of an embedding.
pub fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Normalize an embedding to unit length.
///
/// Zero vectors are left unchanged; callers that require a unit vector
/// must check the norm themselves.
pub fn normalize(embedding: &mut Embedding) {
    let magnitude = l2_norm(embedding);
    if magnitude > 0.0 {
        for x in embedding.iter_mut() {
            *x /= magnitude;
        }
    }
}
