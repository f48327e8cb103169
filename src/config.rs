//! Runtime configuration.
//!
//! Everything is read from environment variables once at start-up. Unset
//! variables fall back to defaults suitable for local development (SQLite
//! file store, English, port 3000).

use std::env;

use anyhow::{Context, bail};

use crate::i18n::Language;

/// Default port if not specified via environment variable.
pub const DEFAULT_PORT: u16 = 3000;

/// Default database path if not specified via environment variable.
pub const DEFAULT_DB_URL: &str = "sqlite:rail_feedback.db?mode=rwc";

/// Collection reports are written into.
pub const DEFAULT_COLLECTION: &str = "reports";

/// Public Firestore REST endpoint.
pub const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Connection descriptor for a Firestore project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub api_key: String,
    pub base_url: String,
}

/// Which document store receives new reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Firestore(FirestoreConfig),
    Sqlite { database_url: String },
    Memory,
}

/// Portal configuration.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub port: u16,
    pub store: StoreBackend,
    /// Collection name passed to every create call.
    pub collection: String,
    /// Language used when a request expresses no preference.
    pub default_language: Language,
}

impl PortalConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("RAIL_FEEDBACK_PORT") {
            Some(p) => p
                .trim()
                .parse()
                .with_context(|| format!("RAIL_FEEDBACK_PORT is not a port number: {p}"))?,
            None => DEFAULT_PORT,
        };

        let backend = var("RAIL_FEEDBACK_STORE").unwrap_or_else(|| "sqlite".to_string());
        let store = match backend.trim().to_ascii_lowercase().as_str() {
            "firestore" => {
                let project_id = var("FIRESTORE_PROJECT_ID")
                    .context("FIRESTORE_PROJECT_ID is required for the firestore store")?;
                let api_key = var("FIRESTORE_API_KEY")
                    .context("FIRESTORE_API_KEY is required for the firestore store")?;
                StoreBackend::Firestore(FirestoreConfig {
                    project_id,
                    api_key,
                    base_url: var("FIRESTORE_BASE_URL")
                        .unwrap_or_else(|| DEFAULT_FIRESTORE_BASE_URL.to_string()),
                })
            }
            "sqlite" => StoreBackend::Sqlite {
                database_url: var("RAIL_FEEDBACK_DATABASE_URL")
                    .unwrap_or_else(|| DEFAULT_DB_URL.to_string()),
            },
            "memory" => StoreBackend::Memory,
            other => bail!("unknown RAIL_FEEDBACK_STORE '{other}' (expected firestore, sqlite or memory)"),
        };

        let default_language = match var("RAIL_FEEDBACK_LANGUAGE") {
            Some(lang) => lang.parse()?,
            None => Language::default(),
        };

        Ok(Self {
            port,
            store,
            collection: var("RAIL_FEEDBACK_COLLECTION")
                .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
            default_language,
        })
    }
}
