//! Translation record storage
//!
//! Every resolved translation is written here. There is no dedup key:
//! saving the same content twice creates two records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use scylla::QueryResult;
use uuid::Uuid;

use bangla_dict_core::{RecordSource, TranslationContent, TranslationRecord};

use crate::schema::TRANSLATIONS_BUCKET;
use crate::{PersistenceError, ScyllaClient};

/// Translation store trait
#[async_trait]
pub trait TranslationStore: Send + Sync {
    /// Append a record
    async fn save(&self, record: &TranslationRecord) -> Result<(), PersistenceError>;

    /// Most recent records, newest first
    ///
    /// A `limit` of 0 means no limit.
    async fn list_recent(&self, limit: usize) -> Result<Vec<TranslationRecord>, PersistenceError>;

    async fn count_all(&self) -> Result<u64, PersistenceError>;

    async fn count_by_source(&self, source: RecordSource) -> Result<u64, PersistenceError>;

    /// True when records survive a process restart
    fn is_distributed(&self) -> bool;
}

/// In-memory store used when persistence is disabled and in tests
#[derive(Default)]
pub struct InMemoryTranslationStore {
    records: RwLock<Vec<TranslationRecord>>,
}

impl InMemoryTranslationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TranslationStore for InMemoryTranslationStore {
    async fn save(&self, record: &TranslationRecord) -> Result<(), PersistenceError> {
        self.records.write().push(record.clone());
        Ok(())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<TranslationRecord>, PersistenceError> {
        // Reverse first so equal timestamps keep newest-inserted first after the stable sort
        let mut records: Vec<TranslationRecord> = self.records.read().iter().rev().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if limit > 0 {
            records.truncate(limit);
        }
        Ok(records)
    }

    async fn count_all(&self) -> Result<u64, PersistenceError> {
        Ok(self.records.read().len() as u64)
    }

    async fn count_by_source(&self, source: RecordSource) -> Result<u64, PersistenceError> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|r| r.source == source)
            .count() as u64)
    }

    fn is_distributed(&self) -> bool {
        false
    }
}

/// ScyllaDB-backed translation store
#[derive(Clone)]
pub struct ScyllaTranslationStore {
    client: ScyllaClient,
}

type TranslationRow = (
    i64,
    Uuid,
    String,
    String,
    String,
    String,
    Option<Vec<String>>,
    String,
    String,
);

impl ScyllaTranslationStore {
    pub fn new(client: ScyllaClient) -> Self {
        Self { client }
    }

    fn row_to_record(row: TranslationRow) -> Result<TranslationRecord, PersistenceError> {
        let (
            created_at,
            id,
            word,
            bengali_translation,
            pronunciation,
            definition,
            examples,
            part_of_speech,
            source,
        ) = row;

        let source = RecordSource::parse(&source)
            .ok_or_else(|| PersistenceError::InvalidData(format!("Unknown source '{}'", source)))?;

        Ok(TranslationRecord {
            id,
            word,
            content: TranslationContent {
                bengali_translation,
                pronunciation,
                definition,
                // Cassandra stores an empty list as null
                examples: examples.unwrap_or_default(),
                part_of_speech,
            },
            source,
            created_at: DateTime::<Utc>::from_timestamp_millis(created_at).ok_or_else(|| {
                PersistenceError::InvalidData(format!("Bad timestamp {}", created_at))
            })?,
        })
    }
}

/// Read the single bigint produced by `SELECT COUNT(*)`
fn read_count(result: QueryResult) -> Result<u64, PersistenceError> {
    let row = result
        .rows
        .and_then(|rows| rows.into_iter().next())
        .ok_or_else(|| PersistenceError::InvalidData("COUNT returned no rows".to_string()))?;

    let (count,): (i64,) = row
        .into_typed()
        .map_err(|e| PersistenceError::InvalidData(e.to_string()))?;

    Ok(count.max(0) as u64)
}

#[async_trait]
impl TranslationStore for ScyllaTranslationStore {
    async fn save(&self, record: &TranslationRecord) -> Result<(), PersistenceError> {
        let query = format!(
            "INSERT INTO {}.translations (
                bucket, created_at, id, word, bengali_translation,
                pronunciation, definition, examples, part_of_speech, source
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            self.client.keyspace()
        );

        self.client
            .session()
            .query_unpaged(
                query,
                (
                    TRANSLATIONS_BUCKET,
                    record.created_at.timestamp_millis(),
                    record.id,
                    record.word.as_str(),
                    record.content.bengali_translation.as_str(),
                    record.content.pronunciation.as_str(),
                    record.content.definition.as_str(),
                    &record.content.examples,
                    record.content.part_of_speech.as_str(),
                    record.source.as_str(),
                ),
            )
            .await?;

        tracing::debug!(id = %record.id, source = %record.source, "Translation persisted to ScyllaDB");
        Ok(())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<TranslationRecord>, PersistenceError> {
        let query = format!(
            "SELECT created_at, id, word, bengali_translation, pronunciation,
                    definition, examples, part_of_speech, source
             FROM {}.translations WHERE bucket = ?",
            self.client.keyspace()
        );

        let session = self.client.session();
        let result = if limit == 0 {
            session.query_unpaged(query, (TRANSLATIONS_BUCKET,)).await?
        } else {
            let limit = i32::try_from(limit).unwrap_or(i32::MAX);
            session
                .query_unpaged(format!("{} LIMIT ?", query), (TRANSLATIONS_BUCKET, limit))
                .await?
        };

        let mut records = Vec::new();
        if let Some(rows) = result.rows {
            for row in rows {
                let typed: TranslationRow = row
                    .into_typed()
                    .map_err(|e| PersistenceError::InvalidData(e.to_string()))?;
                records.push(Self::row_to_record(typed)?);
            }
        }

        Ok(records)
    }

    async fn count_all(&self) -> Result<u64, PersistenceError> {
        let query = format!(
            "SELECT COUNT(*) FROM {}.translations WHERE bucket = ?",
            self.client.keyspace()
        );
        let result = self
            .client
            .session()
            .query_unpaged(query, (TRANSLATIONS_BUCKET,))
            .await?;
        read_count(result)
    }

    async fn count_by_source(&self, source: RecordSource) -> Result<u64, PersistenceError> {
        let query = format!(
            "SELECT COUNT(*) FROM {}.translations WHERE bucket = ? AND source = ? ALLOW FILTERING",
            self.client.keyspace()
        );
        let result = self
            .client
            .session()
            .query_unpaged(query, (TRANSLATIONS_BUCKET, source.as_str()))
            .await?;
        read_count(result)
    }

    fn is_distributed(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(word: &str, source: RecordSource) -> TranslationRecord {
        TranslationRecord::new(
            word,
            TranslationContent {
                bengali_translation: format!("{word}-bn"),
                pronunciation: String::new(),
                definition: String::new(),
                examples: Vec::new(),
                part_of_speech: "noun".to_string(),
            },
            source,
        )
    }

    #[tokio::test]
    async fn test_in_memory_counts() {
        let store = InMemoryTranslationStore::new();
        store.save(&record("hello", RecordSource::Offline)).await.unwrap();
        store.save(&record("hello", RecordSource::Offline)).await.unwrap();
        store.save(&record("ephemeral", RecordSource::Ai)).await.unwrap();

        assert_eq!(store.count_all().await.unwrap(), 3);
        assert_eq!(store.count_by_source(RecordSource::Offline).await.unwrap(), 2);
        assert_eq!(store.count_by_source(RecordSource::Ai).await.unwrap(), 1);
        assert_eq!(store.count_by_source(RecordSource::Fallback).await.unwrap(), 0);
        assert!(!store.is_distributed());
    }

    #[tokio::test]
    async fn test_in_memory_list_recent_orders_newest_first() {
        let store = InMemoryTranslationStore::new();
        let base = Utc::now();
        for (i, word) in ["a", "b", "c", "d"].iter().enumerate() {
            let mut r = record(word, RecordSource::Offline);
            r.created_at = base + Duration::seconds(i as i64);
            store.save(&r).await.unwrap();
        }
        // Saved out of order
        let mut older = record("z", RecordSource::Ai);
        older.created_at = base - Duration::seconds(10);
        store.save(&older).await.unwrap();

        let recent = store.list_recent(3).await.unwrap();
        let words: Vec<&str> = recent.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["d", "c", "b"]);

        let all = store.list_recent(50).await.unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(all.last().unwrap().word, "z");
    }

    #[tokio::test]
    async fn test_in_memory_equal_timestamps_newest_insert_first() {
        let store = InMemoryTranslationStore::new();
        let now = Utc::now();
        for word in ["first", "second"] {
            let mut r = record(word, RecordSource::Offline);
            r.created_at = now;
            store.save(&r).await.unwrap();
        }
        let recent = store.list_recent(2).await.unwrap();
        assert_eq!(recent[0].word, "second");
    }

    #[tokio::test]
    async fn test_in_memory_limit_zero_is_unbounded() {
        let store = InMemoryTranslationStore::new();
        for word in ["a", "b", "c"] {
            store.save(&record(word, RecordSource::Offline)).await.unwrap();
        }
        assert_eq!(store.list_recent(0).await.unwrap().len(), 3);
        assert_eq!(store.list_recent(2).await.unwrap().len(), 2);
    }

    #[test]
    fn test_row_to_record() {
        let id = Uuid::new_v4();
        let row: TranslationRow = (
            1_700_000_000_000,
            id,
            "Water".to_string(),
            "পানি / জল".to_string(),
            "ˈwɔːtər".to_string(),
            "A clear liquid".to_string(),
            None,
            "noun".to_string(),
            "offline".to_string(),
        );
        let record = ScyllaTranslationStore::row_to_record(row).unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.source, RecordSource::Offline);
        assert!(record.content.examples.is_empty());
        assert_eq!(record.created_at.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_row_to_record_rejects_unknown_source() {
        let row: TranslationRow = (
            0,
            Uuid::new_v4(),
            "x".to_string(),
            String::new(),
            String::new(),
            String::new(),
            Some(vec![]),
            String::new(),
            "cache".to_string(),
        );
        assert!(matches!(
            ScyllaTranslationStore::row_to_record(row),
            Err(PersistenceError::InvalidData(_))
        ));
    }
}
