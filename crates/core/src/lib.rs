//! Core traits and types for the dictionary service
//!
//! This crate provides foundational types used across all other crates:
//! - Translation records and their source tag
//! - Static dictionary entry shape
//! - Typed AI response with per-field defaults
//! - Legacy status check records
//! - The `AiTranslator` trait for pluggable language-model backends

pub mod status;
pub mod traits;
pub mod translation;

pub use status::StatusCheck;
pub use traits::{AiTranslator, DisabledTranslator};
pub use translation::{
    AiEntry, DictionaryEntry, DictionaryStats, RecordSource, TranslationContent,
    TranslationRecord,
};
