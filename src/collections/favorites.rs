//! Favorites service: idempotent add, list, delete by id

use crate::core::error::{CollectionError, ListingsResult};
use crate::core::record::FavoriteRecord;
use crate::core::service::FavoriteService;
use crate::core::store::DocumentStore;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Favorites backed by a document store
///
/// Holds at most one entry per id. Mutations are load-modify-save sequences
/// serialized by a per-collection guard.
#[derive(Clone)]
pub struct FavoriteCollection {
    store: Arc<dyn DocumentStore<FavoriteRecord>>,
    write_guard: Arc<Mutex<()>>,
}

impl FavoriteCollection {
    pub fn new(store: impl DocumentStore<FavoriteRecord> + 'static) -> Self {
        Self {
            store: Arc::new(store),
            write_guard: Arc::new(Mutex::new(())),
        }
    }
}

#[async_trait]
impl FavoriteService for FavoriteCollection {
    async fn add(&self, favorite: FavoriteRecord) -> ListingsResult<bool> {
        let _guard = self.write_guard.lock().await;

        let mut favorites = self.store.load().await?;
        if favorites.iter().any(|f| f.id() == favorite.id()) {
            tracing::debug!(id = favorite.id(), "Favorite already present");
            return Ok(false);
        }

        let id = favorite.id();
        favorites.push(favorite);
        self.store.save(&favorites).await?;

        tracing::info!(id, "Added favorite");
        Ok(true)
    }

    async fn list(&self) -> ListingsResult<Vec<FavoriteRecord>> {
        self.store.load().await
    }

    async fn delete(&self, id: i64) -> ListingsResult<usize> {
        let _guard = self.write_guard.lock().await;

        let mut favorites = self.store.load().await?;
        let before = favorites.len();
        favorites.retain(|f| f.id() != id);
        let removed = before - favorites.len();

        if removed == 0 {
            tracing::warn!(id, "Favorite not found");
            return Err(CollectionError::NotFound {
                collection: self.store.collection().to_string(),
                id,
            }
            .into());
        }

        self.store.save(&favorites).await?;

        tracing::info!(id, removed, "Removed favorite");
        Ok(removed)
    }
}
