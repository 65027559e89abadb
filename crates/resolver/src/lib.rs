//! Translation resolution
//!
//! A word is resolved by the first path that answers, in strict order:
//! 1. Offline dictionary
//! 2. AI translator
//! 3. Templated fallback
//!
//! Offline and AI results are stored before they are returned. Fallback
//! results are stored only when `persist_fallback` is set.

use std::sync::Arc;

use thiserror::Error;

use bangla_dict_core::{
    AiTranslator, DictionaryStats, RecordSource, TranslationContent, TranslationRecord,
};
use bangla_dict_dictionary::{normalize_word, OfflineDictionary};
use bangla_dict_persistence::{PersistenceError, TranslationStore};

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Word cannot be empty")]
    EmptyWord,

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Placeholder content for a word nobody could translate
///
/// `word` is expected to be normalized already.
pub fn fallback_content(word: &str) -> TranslationContent {
    TranslationContent {
        bengali_translation: format!("'{}' এর বাংলা অনুবাদ", word),
        pronunciation: String::new(),
        definition: format!("Translation for the word '{}'", word),
        examples: vec![format!("Example with {}", word)],
        part_of_speech: bangla_dict_core::translation::UNKNOWN_PART_OF_SPEECH.to_string(),
    }
}

pub struct TranslationResolver {
    dictionary: &'static OfflineDictionary,
    translator: Arc<dyn AiTranslator>,
    store: Arc<dyn TranslationStore>,
    persist_fallback: bool,
}

impl TranslationResolver {
    pub fn new(translator: Arc<dyn AiTranslator>, store: Arc<dyn TranslationStore>) -> Self {
        Self {
            dictionary: OfflineDictionary::builtin(),
            translator,
            store,
            persist_fallback: false,
        }
    }

    pub fn with_persist_fallback(mut self, persist_fallback: bool) -> Self {
        self.persist_fallback = persist_fallback;
        self
    }

    pub fn dictionary(&self) -> &OfflineDictionary {
        self.dictionary
    }

    pub fn translator_name(&self) -> &str {
        self.translator.name()
    }

    pub fn is_distributed(&self) -> bool {
        self.store.is_distributed()
    }

    /// Resolve one word into a record
    ///
    /// The record keeps `word` exactly as submitted.
    pub async fn resolve(&self, word: &str) -> Result<TranslationRecord, ResolveError> {
        let key = normalize_word(word);
        if key.is_empty() {
            return Err(ResolveError::EmptyWord);
        }

        let (content, source) = if let Some(entry) = self.dictionary.lookup(&key) {
            (TranslationContent::from(entry), RecordSource::Offline)
        } else if let Some(entry) = self.translator.translate(&key).await {
            (entry.into_content(), RecordSource::Ai)
        } else {
            (fallback_content(&key), RecordSource::Fallback)
        };

        let record = TranslationRecord::new(word, content, source);

        if source != RecordSource::Fallback || self.persist_fallback {
            self.store.save(&record).await?;
        }

        tracing::info!(word = %key, source = %source, id = %record.id, "Word resolved");
        Ok(record)
    }

    /// Most recent stored records, newest first
    pub async fn recent(&self, limit: usize) -> Result<Vec<TranslationRecord>, ResolveError> {
        Ok(self.store.list_recent(limit).await?)
    }

    pub async fn stats(&self) -> Result<DictionaryStats, ResolveError> {
        let total = self.store.count_all().await?;
        let ai = self.store.count_by_source(RecordSource::Ai).await?;
        Ok(DictionaryStats::compose(total, self.dictionary.len() as u64, ai))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bangla_dict_core::{AiEntry, DisabledTranslator};
    use bangla_dict_persistence::InMemoryTranslationStore;
    use parking_lot::Mutex;

    struct FixedTranslator {
        entry: AiEntry,
        calls: Mutex<Vec<String>>,
    }

    impl FixedTranslator {
        fn new(entry: AiEntry) -> Self {
            Self {
                entry,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AiTranslator for FixedTranslator {
        async fn translate(&self, word: &str) -> Option<AiEntry> {
            self.calls.lock().push(word.to_string());
            Some(self.entry.clone())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl TranslationStore for BrokenStore {
        async fn save(&self, _record: &TranslationRecord) -> Result<(), PersistenceError> {
            Err(PersistenceError::InvalidData("disk full".to_string()))
        }

        async fn list_recent(&self, _limit: usize) -> Result<Vec<TranslationRecord>, PersistenceError> {
            Err(PersistenceError::InvalidData("disk full".to_string()))
        }

        async fn count_all(&self) -> Result<u64, PersistenceError> {
            Err(PersistenceError::InvalidData("disk full".to_string()))
        }

        async fn count_by_source(&self, _source: RecordSource) -> Result<u64, PersistenceError> {
            Err(PersistenceError::InvalidData("disk full".to_string()))
        }

        fn is_distributed(&self) -> bool {
            false
        }
    }

    fn resolver_with(translator: Arc<dyn AiTranslator>) -> (TranslationResolver, Arc<InMemoryTranslationStore>) {
        let store = Arc::new(InMemoryTranslationStore::new());
        (TranslationResolver::new(translator, store.clone()), store)
    }

    #[tokio::test]
    async fn test_offline_hit_any_case() {
        let translator = Arc::new(FixedTranslator::new(AiEntry::default()));
        let (resolver, store) = resolver_with(translator.clone());

        for word in ["hello", "Hello", "  HELLO "] {
            let record = resolver.resolve(word).await.unwrap();
            assert_eq!(record.source, RecordSource::Offline);
            assert_eq!(record.word, word);
            assert_eq!(record.content.bengali_translation, "হ্যালো / নমস্কার");
        }

        assert!(translator.calls.lock().is_empty());
        assert_eq!(store.count_all().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_repeated_offline_hits_share_content() {
        let (resolver, _) = resolver_with(Arc::new(DisabledTranslator));
        let a = resolver.resolve("water").await.unwrap();
        let b = resolver.resolve("Water").await.unwrap();
        assert_eq!(a.content, b.content);
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_ai_hit_fills_defaults() {
        let translator = Arc::new(FixedTranslator::new(AiEntry {
            bengali: Some("ক্ষণস্থায়ী".to_string()),
            ..Default::default()
        }));
        let (resolver, store) = resolver_with(translator.clone());

        let record = resolver.resolve("Ephemeral").await.unwrap();
        assert_eq!(record.source, RecordSource::Ai);
        assert_eq!(record.word, "Ephemeral");
        assert_eq!(record.content.bengali_translation, "ক্ষণস্থায়ী");
        assert_eq!(record.content.definition, "No definition available");
        assert_eq!(record.content.part_of_speech, "unknown");
        assert_eq!(record.content.pronunciation, "");
        assert!(record.content.examples.is_empty());

        assert_eq!(*translator.calls.lock(), vec!["ephemeral".to_string()]);
        assert_eq!(store.count_by_source(RecordSource::Ai).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_fallback_not_persisted_by_default() {
        let (resolver, store) = resolver_with(Arc::new(DisabledTranslator));

        let record = resolver.resolve("ZZQQ-Nonexistent").await.unwrap();
        assert_eq!(record.source, RecordSource::Fallback);
        assert!(record.content.bengali_translation.contains("zzqq-nonexistent"));
        assert_eq!(
            record.content.definition,
            "Translation for the word 'zzqq-nonexistent'"
        );
        assert_eq!(record.content.examples, vec!["Example with zzqq-nonexistent"]);
        assert_eq!(store.count_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_fallback_persisted_when_enabled() {
        let store = Arc::new(InMemoryTranslationStore::new());
        let resolver = TranslationResolver::new(Arc::new(DisabledTranslator), store.clone())
            .with_persist_fallback(true);

        resolver.resolve("qwertyuiop").await.unwrap();
        assert_eq!(store.count_by_source(RecordSource::Fallback).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_empty_word_rejected() {
        let translator = Arc::new(FixedTranslator::new(AiEntry::default()));
        let (resolver, store) = resolver_with(translator.clone());

        for word in ["", "   ", "\t\n"] {
            assert!(matches!(resolver.resolve(word).await, Err(ResolveError::EmptyWord)));
        }
        assert!(translator.calls.lock().is_empty());
        assert_eq!(store.count_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_store_failure_surfaces() {
        let resolver = TranslationResolver::new(Arc::new(DisabledTranslator), Arc::new(BrokenStore));
        assert!(matches!(
            resolver.resolve("book").await,
            Err(ResolveError::Persistence(_))
        ));
        assert!(resolver.stats().await.is_err());
        // Fallback does not touch the store
        assert!(resolver.resolve("unknownword").await.is_ok());
    }

    #[tokio::test]
    async fn test_stats() {
        let translator = Arc::new(FixedTranslator::new(AiEntry {
            bengali: Some("x".to_string()),
            ..Default::default()
        }));
        let (resolver, _) = resolver_with(translator);

        let empty = resolver.stats().await.unwrap();
        assert_eq!(empty.total_translations, 0);
        assert_eq!(empty.offline_words, 15);

        resolver.resolve("hello").await.unwrap();
        resolver.resolve("serendipity").await.unwrap();
        resolver.resolve("wanderlust").await.unwrap();

        let stats = resolver.stats().await.unwrap();
        assert_eq!(stats.total_translations, 3);
        assert_eq!(stats.offline_words, 15);
        assert_eq!(stats.ai_enhanced_translations, 2);
        assert_eq!(stats.total_unique_words, 17);
    }

    #[test]
    fn test_fallback_content_is_pure() {
        assert_eq!(fallback_content("abc"), fallback_content("abc"));
        assert_eq!(fallback_content("abc").bengali_translation, "'abc' এর বাংলা অনুবাদ");
    }
}
