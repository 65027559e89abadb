//! AI translation trait

use async_trait::async_trait;

use crate::AiEntry;

/// Language-model backed word translator
///
/// Implementations never fail: transport errors, provider errors and
/// unparseable output all come back as `None` so the caller can move on to
/// its next fallback.
///
/// Implementations:
/// - `LlmTranslator` - OpenAI-compatible chat backend
/// - `DisabledTranslator` - no provider configured
#[async_trait]
pub trait AiTranslator: Send + Sync + 'static {
    /// Translate a single lowercase English word
    async fn translate(&self, word: &str) -> Option<AiEntry>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Translator used when no AI credential is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledTranslator;

#[async_trait]
impl AiTranslator for DisabledTranslator {
    async fn translate(&self, _word: &str) -> Option<AiEntry> {
        None
    }

    fn name(&self) -> &str {
        "disabled"
    }
}
