//! Document stores the portal can write reports into.
//!
//! The portal treats storage as create-only: it writes each new report once
//! and never reads the store back. The dashboard only reflects reports
//! submitted during the current process lifetime.

pub mod firestore;
pub mod memory;
pub mod sqlite;

pub use firestore::FirestoreClient;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use tracing::info;

use crate::config::{PortalConfig, StoreBackend};
use crate::error::PersistenceError;
use crate::model::Report;

/// The configured document store.
#[derive(Clone)]
pub enum Storage {
    Firestore(FirestoreClient),
    Sqlite(SqliteStore),
    Memory(MemoryStore),
}

impl Storage {
    /// Build the store selected by configuration.
    pub async fn connect(config: &PortalConfig) -> anyhow::Result<Self> {
        let storage = match &config.store {
            StoreBackend::Firestore(firestore) => Storage::Firestore(
                FirestoreClient::with_base_url(
                    &firestore.base_url,
                    &firestore.project_id,
                    &firestore.api_key,
                ),
            ),
            StoreBackend::Sqlite { database_url } => {
                Storage::Sqlite(SqliteStore::new(database_url).await?)
            }
            StoreBackend::Memory => Storage::Memory(MemoryStore::new()),
        };

        info!(backend = storage.backend_name(), "Document store ready");
        Ok(storage)
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Storage::Firestore(_) => "firestore",
            Storage::Sqlite(_) => "sqlite",
            Storage::Memory(_) => "memory",
        }
    }

    /// Create a document for `report` in `collection`.
    pub async fn create(&self, collection: &str, report: &Report) -> Result<(), PersistenceError> {
        match self {
            Storage::Firestore(client) => client.create(collection, report).await,
            Storage::Sqlite(store) => store.create(collection, report).await,
            Storage::Memory(store) => store.create(collection, report).await,
        }
    }
}
