//! Document store trait for whole-collection persistence

use crate::core::error::ListingsResult;
use async_trait::async_trait;

/// A collection persisted as one document holding every record
///
/// Loads always return the whole collection and saves always replace it.
/// There is no partial update; callers load, mutate in memory and save.
#[async_trait]
pub trait DocumentStore<T>: Send + Sync {
    /// Name used in logs and error messages (e.g. "favorite")
    fn collection(&self) -> &str;

    /// Read every record of the collection
    async fn load(&self) -> ListingsResult<Vec<T>>;

    /// Replace the collection with `records`
    async fn save(&self, records: &[T]) -> ListingsResult<()>;
}
