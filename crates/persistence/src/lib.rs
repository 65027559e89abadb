//! ScyllaDB persistence layer for the dictionary service
//!
//! Provides persistent storage for:
//! - Translation records (append-only, newest-first reads, counts)
//! - Legacy status checks
//!
//! In-memory implementations of both stores back development mode and tests.

pub mod client;
pub mod error;
pub mod schema;
pub mod status;
pub mod translations;

pub use client::{ScyllaClient, ScyllaConfig};
pub use error::PersistenceError;
pub use status::{InMemoryStatusStore, ScyllaStatusStore, StatusStore};
pub use translations::{InMemoryTranslationStore, ScyllaTranslationStore, TranslationStore};

/// Connect, ensure the schema, and build every store over one session
pub async fn init(config: ScyllaConfig) -> Result<PersistenceLayer, PersistenceError> {
    let client = ScyllaClient::connect(config).await?;
    client.ensure_schema().await?;

    Ok(PersistenceLayer {
        translations: ScyllaTranslationStore::new(client.clone()),
        status: ScyllaStatusStore::new(client),
    })
}

/// Combined persistence layer with all stores
pub struct PersistenceLayer {
    pub translations: ScyllaTranslationStore,
    pub status: ScyllaStatusStore,
}
