//! Translation records and dictionary entry types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Bengali placeholder used when the model omits the translation
pub const AI_MISSING_BENGALI: &str = "অনুবাদ পাওয়া যায়নি";
/// Definition used when the model omits it
pub const AI_MISSING_DEFINITION: &str = "No definition available";
/// Part of speech used whenever it is not known
pub const UNKNOWN_PART_OF_SPEECH: &str = "unknown";

/// Which resolution path produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordSource {
    /// Curated static dictionary
    Offline,
    /// External language model
    Ai,
    /// Templated placeholder
    Fallback,
}

impl RecordSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Offline => "offline",
            Self::Ai => "ai",
            Self::Fallback => "fallback",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "offline" => Some(Self::Offline),
            "ai" => Some(Self::Ai),
            "fallback" => Some(Self::Fallback),
            _ => None,
        }
    }
}

impl fmt::Display for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static dictionary entry
///
/// Entries are compiled into the binary and never change at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DictionaryEntry {
    pub bengali: &'static str,
    pub pronunciation: &'static str,
    pub definition: &'static str,
    pub part_of_speech: &'static str,
    pub examples: &'static [&'static str],
}

/// The translated content of a record, independent of identity and time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationContent {
    pub bengali_translation: String,
    pub pronunciation: String,
    pub definition: String,
    pub examples: Vec<String>,
    pub part_of_speech: String,
}

impl From<&DictionaryEntry> for TranslationContent {
    fn from(entry: &DictionaryEntry) -> Self {
        Self {
            bengali_translation: entry.bengali.to_string(),
            pronunciation: entry.pronunciation.to_string(),
            definition: entry.definition.to_string(),
            examples: entry.examples.iter().map(|e| e.to_string()).collect(),
            part_of_speech: entry.part_of_speech.to_string(),
        }
    }
}

/// Structured entry as returned by the language model
///
/// Every field is optional; the model is not trusted to return all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiEntry {
    #[serde(default)]
    pub bengali: Option<String>,
    #[serde(default)]
    pub pronunciation: Option<String>,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub part_of_speech: Option<String>,
    #[serde(default)]
    pub examples: Option<Vec<String>>,
}

impl AiEntry {
    /// True when the model returned none of the expected fields
    pub fn is_empty(&self) -> bool {
        self.bengali.is_none()
            && self.pronunciation.is_none()
            && self.definition.is_none()
            && self.part_of_speech.is_none()
            && self.examples.is_none()
    }

    /// Fill missing fields with their fixed defaults
    pub fn into_content(self) -> TranslationContent {
        TranslationContent {
            bengali_translation: self
                .bengali
                .unwrap_or_else(|| AI_MISSING_BENGALI.to_string()),
            pronunciation: self.pronunciation.unwrap_or_default(),
            definition: self
                .definition
                .unwrap_or_else(|| AI_MISSING_DEFINITION.to_string()),
            examples: self.examples.unwrap_or_default(),
            part_of_speech: self
                .part_of_speech
                .unwrap_or_else(|| UNKNOWN_PART_OF_SPEECH.to_string()),
        }
    }
}

/// A resolved translation, as stored and returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRecord {
    pub id: Uuid,
    /// The word as submitted, original casing preserved
    pub word: String,
    #[serde(flatten)]
    pub content: TranslationContent,
    pub source: RecordSource,
    #[serde(rename = "timestamp", alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl TranslationRecord {
    /// Create a record with a fresh id and the current time
    pub fn new(word: impl Into<String>, content: TranslationContent, source: RecordSource) -> Self {
        Self {
            id: Uuid::new_v4(),
            word: word.into(),
            content,
            source,
            created_at: Utc::now(),
        }
    }
}

/// Aggregate counts served by the stats endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryStats {
    pub total_translations: u64,
    pub offline_words: u64,
    pub ai_enhanced_translations: u64,
    /// Offline catalog size plus AI record count; not deduplicated by word
    pub total_unique_words: u64,
}

impl DictionaryStats {
    pub fn compose(total_translations: u64, offline_words: u64, ai_enhanced_translations: u64) -> Self {
        Self {
            total_translations,
            offline_words,
            ai_enhanced_translations,
            total_unique_words: offline_words + ai_enhanced_translations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_content() -> TranslationContent {
        TranslationContent {
            bengali_translation: "বই".to_string(),
            pronunciation: "bʊk".to_string(),
            definition: "A written work".to_string(),
            examples: vec!["Read a book.".to_string()],
            part_of_speech: "noun".to_string(),
        }
    }

    #[test]
    fn test_record_wire_format() {
        let record = TranslationRecord::new("Book", sample_content(), RecordSource::Offline);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["word"], "Book");
        assert_eq!(json["bengaliTranslation"], "বই");
        assert_eq!(json["partOfSpeech"], "noun");
        assert_eq!(json["source"], "offline");
        assert!(json.get("timestamp").is_some());
        assert!(json.get("content").is_none());
    }

    #[test]
    fn test_record_accepts_created_at_alias() {
        let record = TranslationRecord::new("Book", sample_content(), RecordSource::Ai);
        let mut json = serde_json::to_value(&record).unwrap();
        let ts = json.as_object_mut().unwrap().remove("timestamp").unwrap();
        json["createdAt"] = ts;

        let parsed: TranslationRecord = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.id, record.id);
        assert_eq!(parsed.source, RecordSource::Ai);
    }

    #[test]
    fn test_ai_entry_defaults() {
        let content = AiEntry::default().into_content();
        assert_eq!(content.bengali_translation, AI_MISSING_BENGALI);
        assert_eq!(content.pronunciation, "");
        assert_eq!(content.definition, AI_MISSING_DEFINITION);
        assert_eq!(content.part_of_speech, "unknown");
        assert!(content.examples.is_empty());
    }

    #[test]
    fn test_ai_entry_keeps_present_fields() {
        let entry = AiEntry {
            bengali: Some("আকস্মিক সৌভাগ্য".to_string()),
            part_of_speech: Some("noun".to_string()),
            ..Default::default()
        };
        assert!(!entry.is_empty());

        let content = entry.into_content();
        assert_eq!(content.bengali_translation, "আকস্মিক সৌভাগ্য");
        assert_eq!(content.part_of_speech, "noun");
        assert_eq!(content.definition, AI_MISSING_DEFINITION);
    }

    #[test]
    fn test_ai_entry_null_fields_are_missing() {
        let entry: AiEntry =
            serde_json::from_str(r#"{"bengali": null, "examples": ["a", "b"]}"#).unwrap();
        assert!(entry.bengali.is_none());
        assert_eq!(entry.examples.as_deref().map(|e| e.len()), Some(2));
    }

    #[test]
    fn test_source_round_trip_strings() {
        for source in [RecordSource::Offline, RecordSource::Ai, RecordSource::Fallback] {
            assert_eq!(RecordSource::parse(source.as_str()), Some(source));
        }
        assert_eq!(RecordSource::parse("cached"), None);
    }

    #[test]
    fn test_stats_unique_words_is_a_sum() {
        let stats = DictionaryStats::compose(40, 15, 7);
        assert_eq!(stats.total_unique_words, 22);
        assert_eq!(stats.total_translations, 40);
    }
}
