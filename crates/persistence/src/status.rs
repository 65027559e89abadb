//! Legacy status check storage

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use bangla_dict_core::StatusCheck;

use crate::schema::STATUS_BUCKET;
use crate::{PersistenceError, ScyllaClient};

#[async_trait]
pub trait StatusStore: Send + Sync {
    async fn save(&self, check: &StatusCheck) -> Result<(), PersistenceError>;

    /// Stored checks in insertion order, at most `limit`
    async fn list(&self, limit: usize) -> Result<Vec<StatusCheck>, PersistenceError>;
}

#[derive(Default)]
pub struct InMemoryStatusStore {
    checks: RwLock<Vec<StatusCheck>>,
}

impl InMemoryStatusStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StatusStore for InMemoryStatusStore {
    async fn save(&self, check: &StatusCheck) -> Result<(), PersistenceError> {
        self.checks.write().push(check.clone());
        Ok(())
    }

    async fn list(&self, limit: usize) -> Result<Vec<StatusCheck>, PersistenceError> {
        Ok(self.checks.read().iter().take(limit).cloned().collect())
    }
}

#[derive(Clone)]
pub struct ScyllaStatusStore {
    client: ScyllaClient,
}

impl ScyllaStatusStore {
    pub fn new(client: ScyllaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StatusStore for ScyllaStatusStore {
    async fn save(&self, check: &StatusCheck) -> Result<(), PersistenceError> {
        let query = format!(
            "INSERT INTO {}.status_checks (bucket, created_at, id, client_name) VALUES (?, ?, ?, ?)",
            self.client.keyspace()
        );

        self.client
            .session()
            .query_unpaged(
                query,
                (
                    STATUS_BUCKET,
                    check.timestamp.timestamp_millis(),
                    check.id,
                    check.client_name.as_str(),
                ),
            )
            .await?;

        Ok(())
    }

    async fn list(&self, limit: usize) -> Result<Vec<StatusCheck>, PersistenceError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let query = format!(
            "SELECT created_at, id, client_name FROM {}.status_checks WHERE bucket = ? LIMIT ?",
            self.client.keyspace()
        );

        let limit = i32::try_from(limit).unwrap_or(i32::MAX);
        let result = self
            .client
            .session()
            .query_unpaged(query, (STATUS_BUCKET, limit))
            .await?;

        let mut checks = Vec::new();
        if let Some(rows) = result.rows {
            for row in rows {
                let (created_at, id, client_name): (i64, Uuid, String) = row
                    .into_typed()
                    .map_err(|e| PersistenceError::InvalidData(e.to_string()))?;

                checks.push(StatusCheck {
                    id,
                    client_name,
                    timestamp: DateTime::<Utc>::from_timestamp_millis(created_at)
                        .unwrap_or_else(Utc::now),
                });
            }
        }

        Ok(checks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_status_store() {
        let store = InMemoryStatusStore::new();
        store.save(&StatusCheck::new("first")).await.unwrap();
        store.save(&StatusCheck::new("second")).await.unwrap();
        store.save(&StatusCheck::new("third")).await.unwrap();

        let all = store.list(1000).await.unwrap();
        let names: Vec<&str> = all.iter().map(|c| c.client_name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);

        assert_eq!(store.list(2).await.unwrap().len(), 2);
    }
}
