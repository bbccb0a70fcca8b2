//! Listings server
//!
//! Serves `imoveis.json`, `usuarios.json` and `favoritos.json` from the
//! configured data directory.
//!
//! - `LISTINGS_CONFIG`: optional YAML configuration file
//! - `LISTINGS_BIND`: listen address (default `0.0.0.0:8000`)
//! - `LISTINGS_DATA_DIR`: directory holding the JSON files (default `.`)
//! - `RUST_LOG`: log filter (default `listings=info,tower_http=info`)

use anyhow::Result;
use listings::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("listings=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    tracing::info!(
        "Starting {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    ServerBuilder::from_config(&config)
        .serve(&config.bind)
        .await
}
