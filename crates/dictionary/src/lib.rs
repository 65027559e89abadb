//! Offline dictionary
//!
//! A closed, hand-curated set of common English words with their Bengali
//! translations. The set is compiled in, built once, and never modified by
//! traffic.

mod entries;

use std::collections::HashMap;

use bangla_dict_core::DictionaryEntry;
use once_cell::sync::Lazy;

static BUILTIN: Lazy<OfflineDictionary> =
    Lazy::new(|| OfflineDictionary::from_entries(entries::ENTRIES));

/// Normalize a user-supplied word into a lookup key
pub fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Read-only word → entry map
#[derive(Debug, Clone)]
pub struct OfflineDictionary {
    entries: HashMap<&'static str, DictionaryEntry>,
}

impl OfflineDictionary {
    /// The compiled-in dictionary shared by the whole process
    pub fn builtin() -> &'static OfflineDictionary {
        &BUILTIN
    }

    /// Build from a static table; keys must already be lowercase
    pub fn from_entries(entries: &'static [(&'static str, DictionaryEntry)]) -> Self {
        Self {
            entries: entries.iter().map(|(word, entry)| (*word, *entry)).collect(),
        }
    }

    /// Look up a word, ignoring case and surrounding whitespace
    pub fn lookup(&self, word: &str) -> Option<&DictionaryEntry> {
        self.entries.get(normalize_word(word).as_str())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.lookup(word).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All keys, sorted
    pub fn words(&self) -> Vec<&'static str> {
        let mut words: Vec<&'static str> = self.entries.keys().copied().collect();
        words.sort_unstable();
        words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_size() {
        assert_eq!(OfflineDictionary::builtin().len(), 15);
    }

    #[test]
    fn test_lookup_is_case_and_whitespace_insensitive() {
        let dict = OfflineDictionary::builtin();
        for query in ["hello", "Hello", "  HELLO  ", "\thElLo\n"] {
            let entry = dict.lookup(query).expect("hello should be present");
            assert_eq!(entry.bengali, "হ্যালো / নমস্কার");
            assert_eq!(entry.part_of_speech, "interjection");
        }
    }

    #[test]
    fn test_lookup_miss() {
        let dict = OfflineDictionary::builtin();
        assert!(dict.lookup("serendipity").is_none());
        assert!(dict.lookup("").is_none());
        assert!(!dict.contains("hello world"));
    }

    #[test]
    fn test_every_entry_is_complete() {
        let dict = OfflineDictionary::builtin();
        for word in dict.words() {
            let entry = dict.lookup(word).unwrap();
            assert!(!entry.bengali.is_empty(), "{word} has no bengali");
            assert!(!entry.definition.is_empty(), "{word} has no definition");
            assert_eq!(entry.examples.len(), 2, "{word} should have two examples");
            assert_eq!(word, word.to_lowercase());
        }
    }

    #[test]
    fn test_words_sorted() {
        let words = OfflineDictionary::builtin().words();
        assert_eq!(words.first(), Some(&"beautiful"));
        assert_eq!(words.last(), Some(&"work"));
    }

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word("  Water "), "water");
        assert_eq!(normalize_word("   "), "");
    }
}
