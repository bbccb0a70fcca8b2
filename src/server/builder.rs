//! ServerBuilder for fluent API to build HTTP servers

use super::host::ServerHost;
use super::rest::RestExposure;
use crate::collections::{FavoriteCollection, PropertyCollection, UserCollection};
use crate::config::{CorsConfig, ServerConfig};
use crate::core::service::{FavoriteService, PropertyService, UserService};
use crate::storage::JsonFileStore;
use anyhow::{Result, anyhow};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for creating the HTTP server
///
/// # Example
///
/// ```ignore
/// // Services backed by the JSON files named in the configuration
/// let config = ServerConfig::from_env()?;
/// ServerBuilder::from_config(&config)
///     .serve(&config.bind)
///     .await?;
///
/// // Or wire services by hand
/// let app = ServerBuilder::new()
///     .with_property_service(PropertyCollection::new(InMemoryStore::new("property")))
///     .with_user_service(UserCollection::new(InMemoryStore::new("user")))
///     .with_favorite_service(FavoriteCollection::new(InMemoryStore::new("favorite")))
///     .build()?;
/// ```
pub struct ServerBuilder {
    properties: Option<Arc<dyn PropertyService>>,
    users: Option<Arc<dyn UserService>>,
    favorites: Option<Arc<dyn FavoriteService>>,
    cors: CorsConfig,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            properties: None,
            users: None,
            favorites: None,
            cors: CorsConfig::default(),
            custom_routes: Vec::new(),
        }
    }

    /// Create a builder wired to the JSON collection files of `config`
    ///
    /// The listings file must exist; the favorites and users files are
    /// created on first access.
    pub fn from_config(config: &ServerConfig) -> Self {
        tracing::info!(
            properties = %config.properties_path().display(),
            favorites = %config.favorites_path().display(),
            users = %config.users_path().display(),
            "Using JSON collection files"
        );

        Self::new()
            .with_property_service(
                PropertyCollection::new(JsonFileStore::required(
                    "property",
                    config.properties_path(),
                ))
                .with_default_limit(config.default_limit),
            )
            .with_user_service(UserCollection::new(JsonFileStore::create_if_missing(
                "user",
                config.users_path(),
            )))
            .with_favorite_service(FavoriteCollection::new(
                JsonFileStore::create_if_missing("favorite", config.favorites_path()),
            ))
            .with_cors(config.cors.clone())
    }

    /// Set the property service (required)
    pub fn with_property_service(mut self, service: impl PropertyService + 'static) -> Self {
        self.properties = Some(Arc::new(service));
        self
    }

    /// Set the user service (required)
    pub fn with_user_service(mut self, service: impl UserService + 'static) -> Self {
        self.users = Some(Arc::new(service));
        self
    }

    /// Set the favorite service (required)
    pub fn with_favorite_service(mut self, service: impl FavoriteService + 'static) -> Self {
        self.favorites = Some(Arc::new(service));
        self
    }

    /// Replace the CORS policy (defaults to the two local client origins)
    pub fn with_cors(mut self, cors: CorsConfig) -> Self {
        self.cors = cors;
        self
    }

    /// Add custom routes to the server
    ///
    /// Custom routes are merged next to the collection routes and share the
    /// CORS and tracing layers.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(&mut self) -> Result<ServerHost> {
        let properties = self.properties.take().ok_or_else(|| {
            anyhow!("PropertyService is required. Call .with_property_service()")
        })?;
        let users = self
            .users
            .take()
            .ok_or_else(|| anyhow!("UserService is required. Call .with_user_service()"))?;
        let favorites = self.favorites.take().ok_or_else(|| {
            anyhow!("FavoriteService is required. Call .with_favorite_service()")
        })?;

        Ok(ServerHost::from_builder_components(
            properties,
            users,
            favorites,
            self.cors.clone(),
        ))
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        RestExposure::build_router(host, custom_routes)
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
