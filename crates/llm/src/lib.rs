//! Language model integration
//!
//! Features:
//! - OpenAI-compatible chat backend
//! - Word translator that turns model output into a typed entry

pub mod backend;
pub mod prompt;
pub mod translator;

pub use backend::{GenerationResult, LlmBackend, OpenAIBackend, OpenAIConfig};
pub use prompt::{Message, Role};
pub use translator::{parse_ai_entry, LlmTranslator};

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Network(err.to_string())
        }
    }
}
