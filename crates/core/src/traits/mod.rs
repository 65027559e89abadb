//! Core traits for the dictionary service
//!
//! Collaborators behind these traits can be swapped without touching the
//! resolver:
//!
//! ```text
//! Language Models:
//!   - AiTranslator: word -> optional structured entry
//! ```

mod translator;

pub use translator::{AiTranslator, DisabledTranslator};
