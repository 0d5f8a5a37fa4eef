//! AI provider abstractions and implementations.
//!
//! This module provides a trait-based abstraction for the external
//! generative-language API, allowing the real Gemini client and the
//! mock used in tests to be swapped behind `Arc<dyn TextProvider>`.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Non-success status from the provider, carrying its message and
    /// the HTTP status it answered with.
    #[error("API error: {message}")]
    Api { status: Option<u16>, message: String },

    #[error("Network error: {0}")]
    Network(String),

    /// The provider answered 2xx but the response envelope was empty
    /// or undecodable.
    #[error("Empty response from provider")]
    EmptyResponse,
}

/// Normalized generation outcome.
#[derive(Debug, Clone, Default)]
pub struct ProviderResponse {
    /// Generated text. Absent when the model produced no usable parts.
    pub text: Option<String>,

    /// Finish reason as reported by the provider ("STOP" is the normal
    /// completion value).
    pub finish_reason: Option<String>,

    /// Safety block reason from prompt feedback, if any.
    pub block_reason: Option<String>,
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate text for the given prompt. Makes exactly one outbound
    /// call; no retries.
    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError>;
}
