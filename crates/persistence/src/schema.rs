//! ScyllaDB schema creation

use crate::error::PersistenceError;
use scylla::Session;

/// Partition holding every translation record
///
/// Records are few and always read newest-first across the whole set, so a
/// single partition clustered by time keeps `list_recent` a plain slice.
pub const TRANSLATIONS_BUCKET: &str = "all";

/// Partition holding every status check
pub const STATUS_BUCKET: &str = "all";

/// Create the keyspace if it doesn't exist
pub async fn create_keyspace(
    session: &Session,
    keyspace: &str,
    replication_factor: u8,
) -> Result<(), PersistenceError> {
    let query = format!(
        "CREATE KEYSPACE IF NOT EXISTS {} WITH replication = {{'class': 'SimpleStrategy', 'replication_factor': {}}}",
        keyspace, replication_factor
    );

    session
        .query_unpaged(query, &[])
        .await
        .map_err(|e| PersistenceError::SchemaError(format!("Failed to create keyspace: {}", e)))?;

    Ok(())
}

/// Create all required tables
pub async fn create_tables(session: &Session, keyspace: &str) -> Result<(), PersistenceError> {
    let translations_table = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {}.translations (
            bucket TEXT,
            created_at BIGINT,
            id UUID,
            word TEXT,
            bengali_translation TEXT,
            pronunciation TEXT,
            definition TEXT,
            examples LIST<TEXT>,
            part_of_speech TEXT,
            source TEXT,
            PRIMARY KEY ((bucket), created_at, id)
        ) WITH CLUSTERING ORDER BY (created_at DESC, id DESC)
    "#,
        keyspace
    );

    session
        .query_unpaged(translations_table, &[])
        .await
        .map_err(|e| {
            PersistenceError::SchemaError(format!("Failed to create translations table: {}", e))
        })?;

    let status_table = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {}.status_checks (
            bucket TEXT,
            created_at BIGINT,
            id UUID,
            client_name TEXT,
            PRIMARY KEY ((bucket), created_at, id)
        ) WITH CLUSTERING ORDER BY (created_at ASC, id ASC)
    "#,
        keyspace
    );

    session
        .query_unpaged(status_table, &[])
        .await
        .map_err(|e| {
            PersistenceError::SchemaError(format!("Failed to create status_checks table: {}", e))
        })?;

    tracing::info!("All tables created successfully");
    Ok(())
}
