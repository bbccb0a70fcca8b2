//! HTTP handlers for the listing, user and favorite endpoints
//!
//! Handlers stay thin: extract, call the service, wrap the result. Extractor
//! rejections are turned into [`ValidationError`]s so every failure shares
//! the same JSON error body.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::core::error::{ListingsResult, ValidationError};
use crate::core::query::PropertyQuery;
use crate::core::record::{FavoriteRecord, NewUser, PropertyRecord};
use crate::core::service::{FavoriteService, PropertyService, UserService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub properties: Arc<dyn PropertyService>,
    pub users: Arc<dyn UserService>,
    pub favorites: Arc<dyn FavoriteService>,
}

/// Response of `POST /usuarios`
#[derive(Debug, Serialize)]
pub struct UserCreatedResponse {
    pub mensagem: String,
    pub id: i64,
}

/// Response of the favorite mutations
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ValidationError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ValidationError::InvalidJson {
            message: rejection.body_text(),
        })
}

/// List listings with filters and pagination
///
/// Route: `GET /imoveis`
pub async fn list_properties(
    State(state): State<AppState>,
    query: Result<Query<PropertyQuery>, QueryRejection>,
) -> ListingsResult<Json<Vec<PropertyRecord>>> {
    let Query(query) = query.map_err(|rejection| ValidationError::FieldError {
        field: "query".to_string(),
        message: rejection.body_text(),
    })?;

    let properties = state.properties.list_filtered(&query).await?;
    Ok(Json(properties))
}

/// List every listing
///
/// Route: `GET /itens`
pub async fn list_all_properties(
    State(state): State<AppState>,
) -> ListingsResult<Json<Vec<PropertyRecord>>> {
    Ok(Json(state.properties.list_all().await?))
}

/// Create a user
///
/// Route: `POST /usuarios`
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ListingsResult<Json<UserCreatedResponse>> {
    let user = NewUser::from_json(&json_body(body)?)?;
    let id = state.users.create(user).await?;

    Ok(Json(UserCreatedResponse {
        mensagem: "Usuário criado com sucesso!".to_string(),
        id,
    }))
}

/// Add a listing to the favorites
///
/// Route: `POST /favoritos`
///
/// Answers with the same message whether or not the id was already present.
pub async fn add_favorite(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ListingsResult<Json<MessageResponse>> {
    let favorite = FavoriteRecord::try_from(json_body(body)?)?;
    state.favorites.add(favorite).await?;

    Ok(MessageResponse::new("Imóvel adicionado aos favoritos!"))
}

/// List the favorites
///
/// Route: `GET /favoritos`
pub async fn list_favorites(
    State(state): State<AppState>,
) -> ListingsResult<Json<Vec<FavoriteRecord>>> {
    Ok(Json(state.favorites.list().await?))
}

/// Remove a listing from the favorites
///
/// Route: `DELETE /favoritos/{id}`
pub async fn delete_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ListingsResult<Json<MessageResponse>> {
    let id: i64 = id.trim().parse().map_err(|_| ValidationError::FieldError {
        field: "id".to_string(),
        message: format!("must be an integer (found: {})", id),
    })?;

    state.favorites.delete(id).await?;

    Ok(MessageResponse::new("Imóvel removido dos favoritos!"))
}
