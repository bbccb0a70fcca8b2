//! In-memory implementation of DocumentStore for testing and development

use crate::core::error::ListingsResult;
use crate::core::store::DocumentStore;
use anyhow::anyhow;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// In-memory document store
///
/// Useful for testing and development. Uses RwLock for thread-safe access
/// and counts saves so tests can assert that a no-op wrote nothing.
#[derive(Clone)]
pub struct InMemoryStore<T> {
    collection: String,
    records: Arc<RwLock<Vec<T>>>,
    saves: Arc<AtomicUsize>,
}

impl<T> InMemoryStore<T> {
    /// Create an empty in-memory collection
    pub fn new(collection: impl Into<String>) -> Self {
        Self::with_records(collection, Vec::new())
    }

    /// Create an in-memory collection holding `records`
    pub fn with_records(collection: impl Into<String>, records: Vec<T>) -> Self {
        Self {
            collection: collection.into(),
            records: Arc::new(RwLock::new(records)),
            saves: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of completed saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<T> DocumentStore<T> for InMemoryStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn collection(&self) -> &str {
        &self.collection
    }

    async fn load(&self) -> ListingsResult<Vec<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.clone())
    }

    async fn save(&self, records: &[T]) -> ListingsResult<()> {
        let mut stored = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        *stored = records.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }
}
