//! Server module for building the HTTP server
//!
//! This module provides a `ServerBuilder` that registers:
//! - Listing, user and favorite routes
//! - Health check routes
//! - The CORS and request tracing layers

pub mod builder;
pub mod host;
pub mod rest;
pub mod router;

pub use builder::ServerBuilder;
pub use host::ServerHost;
pub use rest::RestExposure;
