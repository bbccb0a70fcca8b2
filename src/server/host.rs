//! Server host holding the services behind the HTTP surface
//!
//! The host is transport-agnostic: it owns the collection services and the
//! CORS policy, and the REST exposure turns it into an axum `Router`.

use crate::collections::AppState;
use crate::config::CorsConfig;
use crate::core::service::{FavoriteService, PropertyService, UserService};
use std::sync::Arc;

/// Host context containing all server state
pub struct ServerHost {
    /// Property listings (read-only)
    pub properties: Arc<dyn PropertyService>,

    /// User creation
    pub users: Arc<dyn UserService>,

    /// Favorites
    pub favorites: Arc<dyn FavoriteService>,

    /// Cross-origin policy applied to every route
    pub cors: CorsConfig,
}

impl ServerHost {
    /// Build the host from builder components
    pub fn from_builder_components(
        properties: Arc<dyn PropertyService>,
        users: Arc<dyn UserService>,
        favorites: Arc<dyn FavoriteService>,
        cors: CorsConfig,
    ) -> Self {
        Self {
            properties,
            users,
            favorites,
            cors,
        }
    }

    /// State handed to the HTTP handlers
    pub fn app_state(&self) -> AppState {
        AppState {
            properties: self.properties.clone(),
            users: self.users.clone(),
            favorites: self.favorites.clone(),
        }
    }
}
