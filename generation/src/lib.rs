//! # Generation
//!
//! This crate provides the generation provider boundary for hrdesk: one
//! operation, prompt text in, free-form answer text out. The provider is an
//! opaque, potentially slow, potentially failing remote call; everything
//! interesting (prompt construction, fallback policy) lives in the answer
//! composer, not here.

pub mod error;
pub mod provider;

pub use error::{GenerationError, Result};
pub use provider::{GenerationProvider, OllamaGenerator};
