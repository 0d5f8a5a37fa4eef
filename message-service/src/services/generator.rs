//! Core message generation: prompt construction, provider invocation,
//! and outcome normalization.

use super::providers::{ProviderError, ProviderResponse, TextProvider};
use std::sync::Arc;
use thiserror::Error;

/// Who the message is for.
pub const RECIPIENT_NAME: &str = "Arya";

/// Who the message is from.
pub const SENDER_NAME: &str = "Shrey";

/// Finish reason Gemini reports for a normally completed generation.
const FINISH_REASON_STOP: &str = "STOP";

/// Everything that can go wrong while handling one generation request.
/// The `Display` strings double as the user-visible error bodies.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No API credential was configured at startup.
    #[error("Backend AI service not configured.")]
    NotConfigured,

    /// The day count was missing or not an integer.
    #[error("Valid 'days' query parameter is required.")]
    InvalidInput,

    /// The provider returned an envelope with no usable content.
    #[error("Message generation failed: {0}")]
    BlockedOrEmpty(String),

    /// The provider call itself failed.
    #[error("{message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    /// The provider returned an empty response envelope.
    #[error("Failed to process request due to an internal server error.")]
    EmptyResponse,
}

impl GenerationError {
    fn upstream(status: Option<u16>, message: String) -> Self {
        let message = if message.trim().is_empty() {
            "AI service request failed.".to_string()
        } else {
            message
        };
        GenerationError::Upstream { status, message }
    }
}

/// Turns a day count into a prompt, invokes the provider once, and
/// normalizes the outcome. The provider handle is created at startup
/// and never mutated afterwards; `None` means no credential was
/// configured and every call fails with [`GenerationError::NotConfigured`].
#[derive(Clone)]
pub struct MessageGenerator {
    provider: Option<Arc<dyn TextProvider>>,
}

impl MessageGenerator {
    pub fn new(provider: Option<Arc<dyn TextProvider>>) -> Self {
        Self { provider }
    }

    /// Generate an anniversary message for the given raw day count.
    ///
    /// The configuration check runs before input parsing, so an
    /// unconfigured service answers every request the same way.
    pub async fn generate_message(
        &self,
        raw_days: Option<&str>,
    ) -> Result<String, GenerationError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or(GenerationError::NotConfigured)?;

        let days = parse_days(raw_days)?;
        let prompt = build_prompt(days);

        tracing::info!(days, "Generating anniversary message");

        match provider.generate(&prompt).await {
            Ok(response) => interpret_response(response),
            Err(ProviderError::Api { status, message }) => {
                Err(GenerationError::upstream(status, message))
            }
            Err(ProviderError::Network(message)) => Err(GenerationError::upstream(None, message)),
            Err(ProviderError::EmptyResponse) => Err(GenerationError::EmptyResponse),
        }
    }
}

/// Strict integer parsing. Negative values are accepted and embedded
/// verbatim in the prompt; only parseability is validated.
fn parse_days(raw: Option<&str>) -> Result<i64, GenerationError> {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .ok_or(GenerationError::InvalidInput)
}

fn build_prompt(days: i64) -> String {
    format!(
        "My girlfriend's name is {name}. We have been together for {days} days.\n\
         Please write a short, heartfelt, and romantic message for her (about 2-4 sentences).\n\
         The message should:\n\
         1. Lovingly praise {name}'s beauty (you can be descriptive and poetic, e.g., her \
         radiant smile, sparkling eyes, captivating presence, how her beauty brightens my \
         world, etc.).\n\
         2. Affectionately mention our {days} days together, emphasizing how wonderful this \
         journey has been and how each day with her is special.\n\
         3. Express my deep love and appreciation for her, and how much she means to me.\n\n\
         Make the tone very loving, personal, and a little poetic. It should sound like it's \
         coming directly from me, {sender}.",
        name = RECIPIENT_NAME,
        days = days,
        sender = SENDER_NAME,
    )
}

/// Map a provider envelope to text or a failure, in precedence order:
/// usable text wins, then the safety block reason, then an abnormal
/// finish reason, then a generic message.
fn interpret_response(response: ProviderResponse) -> Result<String, GenerationError> {
    if let Some(text) = response.text {
        return Ok(text);
    }

    let reason = if let Some(block) = response.block_reason {
        block
    } else {
        match response.finish_reason {
            Some(finish) if finish != FINISH_REASON_STOP => {
                format!("Generation stopped: {finish}")
            }
            _ => "Blocked or empty content".to_string(),
        }
    };

    Err(GenerationError::BlockedOrEmpty(reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_days_accepts_integers() {
        assert_eq!(parse_days(Some("500")).unwrap(), 500);
        assert_eq!(parse_days(Some("0")).unwrap(), 0);
        assert_eq!(parse_days(Some(" 42 ")).unwrap(), 42);
        // Negatives pass through unchanged.
        assert_eq!(parse_days(Some("-5")).unwrap(), -5);
    }

    #[test]
    fn parse_days_rejects_non_integers() {
        assert!(matches!(
            parse_days(None),
            Err(GenerationError::InvalidInput)
        ));
        assert!(matches!(
            parse_days(Some("")),
            Err(GenerationError::InvalidInput)
        ));
        assert!(matches!(
            parse_days(Some("abc")),
            Err(GenerationError::InvalidInput)
        ));
        assert!(matches!(
            parse_days(Some("12abc")),
            Err(GenerationError::InvalidInput)
        ));
        assert!(matches!(
            parse_days(Some("1.5")),
            Err(GenerationError::InvalidInput)
        ));
    }

    #[test]
    fn prompt_embeds_days_and_identities() {
        let prompt = build_prompt(500);
        assert!(prompt.contains("500 days"));
        assert!(prompt.contains(RECIPIENT_NAME));
        assert!(prompt.contains(SENDER_NAME));
    }

    #[test]
    fn text_wins_over_everything() {
        let response = ProviderResponse {
            text: Some("hello".to_string()),
            finish_reason: Some("MAX_TOKENS".to_string()),
            block_reason: None,
        };
        assert_eq!(interpret_response(response).unwrap(), "hello");
    }

    #[test]
    fn block_reason_takes_precedence_over_finish_reason() {
        let response = ProviderResponse {
            text: None,
            finish_reason: Some("MAX_TOKENS".to_string()),
            block_reason: Some("SAFETY".to_string()),
        };
        assert!(matches!(
            interpret_response(response),
            Err(GenerationError::BlockedOrEmpty(reason)) if reason == "SAFETY"
        ));
    }

    #[test]
    fn abnormal_finish_reason_is_reported() {
        let response = ProviderResponse {
            text: None,
            finish_reason: Some("MAX_TOKENS".to_string()),
            block_reason: None,
        };
        assert!(matches!(
            interpret_response(response),
            Err(GenerationError::BlockedOrEmpty(reason))
                if reason == "Generation stopped: MAX_TOKENS"
        ));
    }

    #[test]
    fn normal_stop_without_text_is_generic() {
        let response = ProviderResponse {
            text: None,
            finish_reason: Some("STOP".to_string()),
            block_reason: None,
        };
        assert!(matches!(
            interpret_response(response),
            Err(GenerationError::BlockedOrEmpty(reason))
                if reason == "Blocked or empty content"
        ));
    }

    #[tokio::test]
    async fn unconfigured_generator_fails_before_parsing() {
        let generator = MessageGenerator::new(None);
        // Even invalid input reports the missing configuration first.
        assert!(matches!(
            generator.generate_message(Some("abc")).await,
            Err(GenerationError::NotConfigured)
        ));
    }

    #[test]
    fn empty_upstream_message_gets_fallback() {
        let err = GenerationError::upstream(Some(503), String::new());
        assert!(matches!(
            err,
            GenerationError::Upstream { status: Some(503), ref message }
                if message == "AI service request failed."
        ));
    }
}
