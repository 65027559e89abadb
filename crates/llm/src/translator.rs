//! Word translator backed by a chat model
//!
//! Sends one request per word with a fixed system prompt that asks for a JSON
//! dictionary entry, then parses the reply into an [`AiEntry`]. Any failure is
//! logged and reported as `None`.

use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use bangla_dict_core::{AiEntry, AiTranslator};

use crate::backend::LlmBackend;
use crate::prompt::Message;
use crate::LlmError;

const SYSTEM_PROMPT: &str = r#"You are an expert English to Bengali dictionary and language assistant.
Provide accurate translations with context, pronunciation guide, definitions, and examples.
Always respond in JSON format with these exact fields:
{
    "bengali": "Bengali translation (include multiple variations if applicable)",
    "pronunciation": "IPA pronunciation guide",
    "definition": "Clear English definition",
    "part_of_speech": "grammatical category",
    "examples": ["example sentence 1", "example sentence 2"]
}

For Bengali translations, use proper Bengali script and include common variations.
Keep examples practical and commonly used."#;

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*```[A-Za-z]*\s*(.*?)\s*```\s*$").expect("code fence pattern is valid")
});

fn user_prompt(word: &str) -> String {
    format!(
        "Translate the English word '{}' to Bengali. Provide a comprehensive dictionary entry \
         with pronunciation, definition, part of speech, and 2-3 practical example sentences.",
        word
    )
}

/// Parse a model reply into a structured entry
///
/// Accepts a bare JSON object or one wrapped in a Markdown code fence. An
/// empty object counts as no answer.
pub fn parse_ai_entry(text: &str) -> Result<AiEntry, LlmError> {
    let body = CODE_FENCE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or(text)
        .trim();

    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Not JSON: {}", e)))?;

    match value.as_object() {
        Some(map) if map.is_empty() => {
            return Err(LlmError::InvalidResponse("Empty JSON object".to_string()))
        }
        Some(_) => {}
        None => return Err(LlmError::InvalidResponse("Expected a JSON object".to_string())),
    }

    serde_json::from_value(value)
        .map_err(|e| LlmError::InvalidResponse(format!("Unexpected field types: {}", e)))
}

/// [`AiTranslator`] over any [`LlmBackend`]
pub struct LlmTranslator {
    backend: Arc<dyn LlmBackend>,
}

impl LlmTranslator {
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self { backend }
    }

    async fn try_translate(&self, word: &str) -> Result<AiEntry, LlmError> {
        let messages = [Message::system(SYSTEM_PROMPT), Message::user(user_prompt(word))];
        let result = self.backend.generate(&messages).await?;

        tracing::debug!(
            word = %word,
            tokens = result.tokens,
            latency_ms = result.total_time_ms,
            "AI translation generated"
        );

        parse_ai_entry(&result.text)
    }
}

#[async_trait]
impl AiTranslator for LlmTranslator {
    async fn translate(&self, word: &str) -> Option<AiEntry> {
        match self.try_translate(word).await {
            Ok(entry) => Some(entry),
            Err(LlmError::InvalidResponse(reason)) => {
                tracing::warn!(word = %word, reason = %reason, "AI translation unparseable");
                None
            }
            Err(e) => {
                tracing::error!(word = %word, error = %e, "AI translation error");
                None
            }
        }
    }

    fn name(&self) -> &str {
        self.backend.model_name()
    }
}
