//! SQLite document store.
//!
//! Keeps each report as a JSON document tagged with its collection, which is
//! all a create-only store needs. Useful for development and self-hosted
//! deployments that don't talk to Firestore.

use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::error::PersistenceError;
use crate::model::Report;

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Create a new store and initialize the schema.
    ///
    /// # Arguments
    ///
    /// * `database_url` - SQLite connection string (e.g., "sqlite:rail_feedback.db" or "sqlite::memory:")
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Each connection to ":memory:" opens its own private database.
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        let store = Self { pool };
        store.initialize_schema().await?;

        Ok(store)
    }

    /// Create the documents table if it doesn't exist.
    ///
    /// `report_id` is not unique: ids are derived from the submission clock
    /// and may repeat.
    async fn initialize_schema(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                collection TEXT NOT NULL,
                report_id TEXT NOT NULL,
                submitted_at INTEGER NOT NULL,
                body TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_documents_collection
            ON documents(collection, submitted_at)
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a report into a collection.
    pub async fn create(&self, collection: &str, report: &Report) -> Result<(), PersistenceError> {
        let body = serde_json::to_string(report)?;

        sqlx::query(
            r#"
            INSERT INTO documents (collection, report_id, submitted_at, body)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(collection)
        .bind(&report.id)
        .bind(report.submitted_at.timestamp_millis())
        .bind(body)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Count the documents stored in a collection.
    pub async fn document_count(&self, collection: &str) -> Result<i64, PersistenceError> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) as total
            FROM documents
            WHERE collection = ?
            "#,
        )
        .bind(collection)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("total"))
    }
}
