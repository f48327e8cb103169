//! In-process document store.
//!
//! Holds documents in memory for the lifetime of the process. A failure can
//! be injected so the rejection path of the submission flow can be driven
//! without a network.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::PersistenceError;
use crate::model::Report;

#[derive(Debug, Default)]
struct Inner {
    documents: Vec<(String, Report)>,
    failure: Option<String>,
}

/// Shared handle to an in-memory collection set. Clones see the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock only means a test panicked mid-write; the data is still usable.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Make every following write fail with `message` until [`MemoryStore::recover`].
    pub fn fail_with(&self, message: &str) {
        self.lock().failure = Some(message.to_string());
    }

    /// Accept writes again.
    pub fn recover(&self) {
        self.lock().failure = None;
    }

    pub async fn create(&self, collection: &str, report: &Report) -> Result<(), PersistenceError> {
        let mut inner = self.lock();
        if let Some(message) = &inner.failure {
            return Err(PersistenceError::Unavailable(message.clone()));
        }
        inner
            .documents
            .push((collection.to_string(), report.clone()));
        Ok(())
    }

    /// Documents written to `collection`, oldest first.
    pub fn documents(&self, collection: &str) -> Vec<Report> {
        self.lock()
            .documents
            .iter()
            .filter(|(c, _)| c == collection)
            .map(|(_, report)| report.clone())
            .collect()
    }
}
