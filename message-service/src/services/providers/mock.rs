//! Mock provider implementation for testing.

use super::{ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;

/// Scriptable text provider used in place of the Gemini client.
pub struct MockTextProvider {
    outcome: MockOutcome,
}

enum MockOutcome {
    Response(ProviderResponse),
    Api {
        status: Option<u16>,
        message: String,
    },
    Empty,
}

impl MockTextProvider {
    /// Succeed with the given text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            outcome: MockOutcome::Response(ProviderResponse {
                text: Some(text.into()),
                finish_reason: Some("STOP".to_string()),
                block_reason: None,
            }),
        }
    }

    /// Respond with a safety block and no content.
    pub fn blocked(reason: impl Into<String>) -> Self {
        Self {
            outcome: MockOutcome::Response(ProviderResponse {
                text: None,
                finish_reason: None,
                block_reason: Some(reason.into()),
            }),
        }
    }

    /// Respond with no content and the given finish reason.
    pub fn finished(reason: impl Into<String>) -> Self {
        Self {
            outcome: MockOutcome::Response(ProviderResponse {
                text: None,
                finish_reason: Some(reason.into()),
                block_reason: None,
            }),
        }
    }

    /// Fail the call with a provider API error.
    pub fn api_error(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            outcome: MockOutcome::Api {
                status,
                message: message.into(),
            },
        }
    }

    /// Return an empty response envelope.
    pub fn empty() -> Self {
        Self {
            outcome: MockOutcome::Empty,
        }
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(&self, _prompt: &str) -> Result<ProviderResponse, ProviderError> {
        match &self.outcome {
            MockOutcome::Response(response) => Ok(response.clone()),
            MockOutcome::Api { status, message } => Err(ProviderError::Api {
                status: *status,
                message: message.clone(),
            }),
            MockOutcome::Empty => Err(ProviderError::EmptyResponse),
        }
    }
}
