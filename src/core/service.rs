//! Service traits for the three collections
//!
//! Handlers only see these traits; the collection implementations decide
//! how records are loaded and written back.

use crate::core::error::ListingsResult;
use crate::core::query::PropertyQuery;
use crate::core::record::{FavoriteRecord, NewUser, PropertyRecord};
use async_trait::async_trait;

/// Read access to the property listings
#[async_trait]
pub trait PropertyService: Send + Sync {
    /// Every listing, unfiltered
    async fn list_all(&self) -> ListingsResult<Vec<PropertyRecord>>;

    /// Listings matching `query`, paginated after filtering
    async fn list_filtered(&self, query: &PropertyQuery) -> ListingsResult<Vec<PropertyRecord>>;
}

/// User creation
#[async_trait]
pub trait UserService: Send + Sync {
    /// Persist `user` and return the id it was assigned
    async fn create(&self, user: NewUser) -> ListingsResult<i64>;
}

/// Favorited listings
#[async_trait]
pub trait FavoriteService: Send + Sync {
    /// Add `favorite` unless an entry with the same id exists
    ///
    /// Returns `true` when the favorite was inserted.
    async fn add(&self, favorite: FavoriteRecord) -> ListingsResult<bool>;

    /// Every favorite, in insertion order
    async fn list(&self) -> ListingsResult<Vec<FavoriteRecord>>;

    /// Remove every favorite with this id
    ///
    /// Fails with a not-found error, leaving the collection untouched, when
    /// no favorite has this id. Returns the number of entries removed.
    async fn delete(&self, id: i64) -> ListingsResult<usize>;
}
