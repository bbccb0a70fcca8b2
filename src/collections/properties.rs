//! Read-only service over the property listings

use crate::core::error::ListingsResult;
use crate::core::query::{DEFAULT_LIMIT, PropertyQuery};
use crate::core::record::PropertyRecord;
use crate::core::service::PropertyService;
use crate::core::store::DocumentStore;
use async_trait::async_trait;
use std::sync::Arc;

/// Property listings backed by a document store
///
/// Every call reloads the whole collection; nothing is cached between
/// requests.
#[derive(Clone)]
pub struct PropertyCollection {
    store: Arc<dyn DocumentStore<PropertyRecord>>,
    default_limit: usize,
}

impl PropertyCollection {
    pub fn new(store: impl DocumentStore<PropertyRecord> + 'static) -> Self {
        Self {
            store: Arc::new(store),
            default_limit: DEFAULT_LIMIT,
        }
    }

    /// Page size used when a query carries no `limit`
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }
}

#[async_trait]
impl PropertyService for PropertyCollection {
    async fn list_all(&self) -> ListingsResult<Vec<PropertyRecord>> {
        self.store.load().await
    }

    async fn list_filtered(&self, query: &PropertyQuery) -> ListingsResult<Vec<PropertyRecord>> {
        // Reject bad parameters before touching the file
        let parsed = query.parse(self.default_limit)?;

        let records = self.store.load().await?;
        let total = records.len();
        let page = parsed.apply(records);

        tracing::debug!(
            total,
            returned = page.len(),
            skip = parsed.page.skip,
            limit = parsed.page.limit,
            "Filtered property listings"
        );
        Ok(page)
    }
}
