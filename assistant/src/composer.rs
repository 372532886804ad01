//! Grounded answer composition and the no-context fallback path.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use hrdesk_generation::GenerationProvider;

use crate::error::Result;
use crate::retriever::ContextRecord;

/// Fixed answer returned when no policy context meets the threshold.
///
/// The prompt instructs the model to emit this exact sentence when the
/// supplied context is insufficient, so both fallback paths surface the
/// same text. Reserved for the genuine zero-context case; provider
/// failures are errors, never this sentence.
pub const FALLBACK_ANSWER: &str =
    "The requested information is not available in the current HR policy documents.";

/// Reference to a chunk that supported an answer.
#[derive(Debug, Clone, Serialize)]
pub struct SourceRef {
    /// Source policy document.
    pub document_name: String,

    /// Identifier of the supporting chunk.
    pub chunk_id: u32,

    /// Similarity of the chunk to the question.
    pub similarity: f32,
}

/// The outcome of answering a question.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerResult {
    /// The answer text shown to the user.
    pub text: String,

    /// Whether the answer is grounded in retrieved policy context.
    /// `false` means the fixed fallback was returned.
    pub sourced: bool,

    /// Chunks used as context, ordered by descending similarity.
    pub sources: Vec<SourceRef>,
}

/// Build the constrained generation prompt from retrieved context.
///
/// Records must already be in descending-similarity order; the most
/// relevant context goes first, which affects which facts the model is
/// most likely to use when context is abundant.
pub fn build_prompt(question: &str, records: &[ContextRecord]) -> String {
    let context = records
        .iter()
        .map(|r| r.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "You are a professional HR assistant.\n\
         \n\
         Use ONLY the provided policy context to answer the employee's question.\n\
         \n\
         POLICY CONTEXT:\n\
         {context}\n\
         \n\
         EMPLOYEE QUESTION:\n\
         {question}\n\
         \n\
         RESPONSE RULES:\n\
         - Answer clearly and concisely.\n\
         - Use bullet points if listing items.\n\
         - Do NOT include phrases like \"Based on the provided context\".\n\
         - Do NOT add assumptions or external knowledge.\n\
         - If the answer is not found in the context, say:\n\
         \x20 \"{FALLBACK_ANSWER}\"\n\
         - Keep the tone professional and direct."
    )
}

/// Builds prompts from retrieved context and manages the fallback path.
pub struct AnswerComposer {
    generator: Arc<dyn GenerationProvider>,
}

impl AnswerComposer {
    /// Create a new composer.
    pub fn new(generator: Arc<dyn GenerationProvider>) -> Self {
        Self { generator }
    }

    /// Compose an answer from retrieved context.
    ///
    /// With zero records the generation provider is never called: there is
    /// no possible grounded answer, so spending a generation call would be
    /// pure cost. Generation failures surface as errors, distinct from the
    /// fallback.
    pub async fn compose(&self, question: &str, records: &[ContextRecord]) -> Result<AnswerResult> {
        if records.is_empty() {
            debug!("No context retrieved, returning fixed fallback answer");
            return Ok(AnswerResult {
                text: FALLBACK_ANSWER.to_string(),
                sourced: false,
                sources: Vec::new(),
            });
        }

        let prompt = build_prompt(question, records);
        let answer = self.generator.generate(&prompt).await?;

        let sources = records
            .iter()
            .map(|r| SourceRef {
                document_name: r.document_name.clone(),
                chunk_id: r.chunk_id,
                similarity: r.similarity,
            })
            .collect();

        Ok(AnswerResult {
            text: answer.trim().to_string(),
            sourced: true,
            sources,
        })
    }
}
