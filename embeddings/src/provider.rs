//! Embedding providers.
//!
//! The retrieval pipeline only needs one operation: text in, unit-normalized
//! vector out. The provider must be deterministic for identical input under
//! a fixed model, and must fail loudly rather than hand back a silent empty
//! vector.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::Embedding;
use crate::error::{EmbeddingError, Result};
use crate::similarity::{l2_norm, normalize};

/// Default request timeout for embedding calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Trait for embedding providers.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Model identifier used by this provider.
    fn model(&self) -> &str;

    /// Dimension of vectors this provider produces.
    ///
    /// Must match the dimension baked into the vector index at build time.
    fn dimension(&self) -> usize;

    /// Generate a unit-normalized embedding for the given text.
    async fn embed(&self, text: &str) -> Result<Embedding>;
}

/// Embedding provider backed by the Ollama HTTP API.
pub struct OllamaEmbedder {
    /// API base URL, e.g. `http://localhost:11434`.
    base_url: String,

    /// Model to embed with.
    model: String,

    /// Expected output dimension.
    dimension: usize,

    /// Per-request timeout.
    timeout: Duration,

    /// HTTP client.
    client: reqwest::Client,
}

impl OllamaEmbedder {
    /// Create a new embedder against the given Ollama endpoint.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, dimension: usize) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            dimension,
            timeout: DEFAULT_TIMEOUT,
            client: reqwest::Client::new(),
        }
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbedder {
    fn model(&self) -> &str {
        &self.model
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Result<Embedding> {
        debug!("Generating embedding with model: {}", self.model);

        let body = serde_json::json!({
            "model": self.model,
            "prompt": text,
        });

        let response = self
            .client
            .post(format!("{}/api/embeddings", self.base_url))
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EmbeddingError::Timeout {
                        timeout_ms: self.timeout.as_millis() as u64,
                    }
                } else {
                    EmbeddingError::Http(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::ApiRequest(format!(
                "{status}: {error_text}"
            )));
        }

        let result: OllamaEmbeddingResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::InvalidResponse(e.to_string()))?;

        let mut embedding = result.embedding;

        if embedding.len() != self.dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimension,
                actual: embedding.len(),
            });
        }
        if l2_norm(&embedding) == 0.0 {
            return Err(EmbeddingError::InvalidResponse(
                "provider returned a zero vector".to_string(),
            ));
        }

        // Stored index vectors are unit-normalized; the query must match so
        // inner-product scores are cosine similarities.
        normalize(&mut embedding);

        debug!("Generated embedding with {} dimensions", embedding.len());
        Ok(embedding)
    }
}

/// Ollama embeddings API response format.
#[derive(Debug, Deserialize)]
struct OllamaEmbeddingResponse {
    embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_embed_normalizes_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/embeddings"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "embedding": [3.0, 4.0, 0.0] })),
            )
            .mount(&server)
            .await;

        let embedder = OllamaEmbedder::new(server.uri(), "all-minilm", 3);
        let embedding = embedder.embed("casual leave").await.unwrap();

        assert_eq!(embedding.len(), 3);
        assert!((l2_norm(&embedding) - 1.0).abs() < 1e-6);
        assert!((embedding[0] - 0.6).abs() < 1e-6);
        assert!((embedding[1] - 0.8).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_embed_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/embeddings"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model not found"))
            .mount(&server)
            .await;

        let embedder = OllamaEmbedder::new(server.uri(), "all-minilm", 3);
        let result = embedder.embed("anything").await;

        assert!(matches!(result, Err(EmbeddingError::ApiRequest(_))));
    }

    #[tokio::test]
    async fn test_embed_malformed_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let embedder = OllamaEmbedder::new(server.uri(), "all-minilm", 3);
        let result = embedder.embed("anything").await;

        assert!(matches!(result, Err(EmbeddingError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_embed_dimension_mismatch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/embeddings"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "embedding": [1.0, 0.0] })),
            )
            .mount(&server)
            .await;

        let embedder = OllamaEmbedder::new(server.uri(), "all-minilm", 3);
        let result = embedder.embed("anything").await;

        assert!(matches!(
            result,
            Err(EmbeddingError::DimensionMismatch { expected: 3, actual: 2 })
        ));
    }

    #[tokio::test]
    async fn test_embed_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/embeddings"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "embedding": [1.0, 0.0, 0.0] }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let embedder = OllamaEmbedder::new(server.uri(), "all-minilm", 3)
            .with_timeout(Duration::from_millis(50));
        let result = embedder.embed("anything").await;

        assert!(matches!(result, Err(EmbeddingError::Timeout { .. })));
    }
}
