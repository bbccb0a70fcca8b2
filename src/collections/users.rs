//! User creation service

use crate::core::error::ListingsResult;
use crate::core::record::{NewUser, UserRecord};
use crate::core::service::UserService;
use crate::core::store::DocumentStore;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Users backed by a document store
///
/// New users get `count + 1` as id. Creates issued through the same
/// collection are serialized; separate processes sharing the file can still
/// hand out the same id.
#[derive(Clone)]
pub struct UserCollection {
    store: Arc<dyn DocumentStore<UserRecord>>,
    write_guard: Arc<Mutex<()>>,
}

impl UserCollection {
    pub fn new(store: impl DocumentStore<UserRecord> + 'static) -> Self {
        Self {
            store: Arc::new(store),
            write_guard: Arc::new(Mutex::new(())),
        }
    }
}

#[async_trait]
impl UserService for UserCollection {
    async fn create(&self, user: NewUser) -> ListingsResult<i64> {
        let _guard = self.write_guard.lock().await;

        let mut users = self.store.load().await?;
        let id = users.len() as i64 + 1;
        users.push(user.into_record(id));
        self.store.save(&users).await?;

        tracing::info!(collection = self.store.collection(), id, "Created user");
        Ok(id)
    }
}
