//! # listings-rs
//!
//! A small HTTP service over JSON collection files: property listings,
//! users and favorites.
//!
//! ## Features
//!
//! - **Filtered listings**: purpose, kind, neighborhood, area and price ranges
//! - **Pagination**: `skip`/`limit` with a configurable default page size
//! - **Idempotent favorites**: adding the same id twice keeps one entry
//! - **Atomic persistence**: every write replaces the file through a rename
//! - **Configuration-Based**: YAML file plus environment overrides
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use listings::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     ServerBuilder::from_config(&config).serve(&config.bind).await
//! }
//! ```

pub mod collections;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{ListingsError, ListingsResult},
        query::{PropertyQuery, DEFAULT_LIMIT},
        record::{
            FavoriteRecord, NewUser, PropertyFields, PropertyRecord, Purpose, Status, UserRecord,
        },
        service::{FavoriteService, PropertyService, UserService},
        store::DocumentStore,
    };

    // === Collections ===
    pub use crate::collections::{
        AppState, FavoriteCollection, PropertyCollection, UserCollection,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryStore, JsonFileStore, MissingFile};

    // === Config ===
    pub use crate::config::{CorsConfig, ServerConfig};

    // === Server ===
    pub use crate::server::{RestExposure, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};

    // === Axum ===
    pub use axum::Router;
}
