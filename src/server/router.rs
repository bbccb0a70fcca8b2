//! Route table for the collection endpoints

use crate::collections::handlers::{
    AppState, add_favorite, create_user, delete_favorite, list_all_properties, list_favorites,
    list_properties,
};
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Build the collection routes
///
/// - GET /imoveis - Filtered, paginated listings
/// - GET /itens - Every listing
/// - POST /usuarios - Create a user
/// - GET /favoritos - List favorites
/// - POST /favoritos - Add a favorite
/// - DELETE /favoritos/{id} - Remove a favorite
pub fn build_listing_routes(state: AppState) -> Router {
    Router::new()
        .route("/imoveis", get(list_properties))
        .route("/itens", get(list_all_properties))
        .route("/usuarios", post(create_user))
        .route("/favoritos", get(list_favorites).post(add_favorite))
        .route("/favoritos/{id}", delete(delete_favorite))
        .with_state(state)
}
