//! Generation providers.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::{GenerationError, Result};

/// Default request timeout for generation calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Trait for generation providers.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Model identifier used by this provider.
    fn model(&self) -> &str;

    /// Generate a completion for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Generation provider backed by the Ollama chat API.
pub struct OllamaGenerator {
    /// API base URL, e.g. `http://localhost:11434`.
    base_url: String,

    /// Model to generate with.
    model: String,

    /// Per-request timeout.
    timeout: Duration,

    /// HTTP client.
    client: reqwest::Client,
}

impl OllamaGenerator {
    /// Create a new generator against the given Ollama endpoint.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
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
impl GenerationProvider for OllamaGenerator {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!("Generating answer with model: {}", self.model);

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": prompt }
            ],
            "stream": false,
        });

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout {
                        timeout_ms: self.timeout.as_millis() as u64,
                    }
                } else {
                    GenerationError::Http(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenerationError::ApiRequest(format!(
                "{status}: {error_text}"
            )));
        }

        let result: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        debug!(
            "Generated answer with {} characters",
            result.message.content.len()
        );
        Ok(result.message.content)
    }
}

/// Ollama chat API response format.
#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaChatMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaChatMessage {
    #[allow(dead_code)]
    role: String,
    content: String,
}
