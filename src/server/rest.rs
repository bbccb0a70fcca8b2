//! REST API exposure
//!
//! Consumes a [`ServerHost`] and produces the axum `Router`: health routes,
//! collection routes, custom routes, then the CORS and tracing layers.

use super::host::ServerHost;
use super::router::build_listing_routes;
use crate::config::CorsConfig;
use crate::core::error::ConfigError;
use anyhow::Result;
use axum::http::HeaderValue;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// # Arguments
    ///
    /// * `host` - The server host containing the collection services
    /// * `custom_routes` - Additional custom routes to merge
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let cors = Self::cors_layer(&host.cors)?;

        let mut app = Self::health_routes().merge(build_listing_routes(host.app_state()));

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app.layer(cors).layer(TraceLayer::new_for_http()))
    }

    /// CORS policy: listed origins, any method, any request header
    ///
    /// Methods and headers are mirrored from the preflight request; `*` is
    /// not allowed together with credentials.
    pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer> {
        let origins = config
            .allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|e| ConfigError::InvalidValue {
                    field: "cors.allowed_origins".to_string(),
                    value: origin.clone(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(config.allow_credentials))
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "listings-rs"
        }))
    }
}
