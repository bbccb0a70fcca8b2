//! Typed error handling for the listings service
//!
//! Every operation of the service reports failures through [`ListingsError`],
//! which knows its HTTP status code and renders itself as a JSON error body.
//!
//! # Error Categories
//!
//! - [`CollectionError`]: a record or a collection file could not be found
//! - [`ValidationError`]: bad query parameters or request bodies
//! - [`StorageError`]: reading or writing a collection file failed
//! - [`ConfigError`]: the server configuration could not be loaded
//!
//! # Example
//!
//! ```rust,ignore
//! match favorites.delete(7).await {
//!     Ok(removed) => println!("removed {} favorites", removed),
//!     Err(ListingsError::Collection(CollectionError::NotFound { id, .. })) => {
//!         println!("favorite {} not found", id);
//!     }
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type for the listings service
#[derive(Debug)]
pub enum ListingsError {
    /// Record or collection lookups that found nothing
    Collection(CollectionError),

    /// Input validation errors
    Validation(ValidationError),

    /// Collection file read/write errors
    Storage(StorageError),

    /// Configuration errors
    Config(ConfigError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for ListingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingsError::Collection(e) => write!(f, "{}", e),
            ListingsError::Validation(e) => write!(f, "{}", e),
            ListingsError::Storage(e) => write!(f, "{}", e),
            ListingsError::Config(e) => write!(f, "{}", e),
            ListingsError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ListingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListingsError::Collection(e) => Some(e),
            ListingsError::Validation(e) => Some(e),
            ListingsError::Storage(e) => Some(e),
            ListingsError::Config(e) => Some(e),
            ListingsError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ListingsError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ListingsError::Collection(_) => StatusCode::NOT_FOUND,
            ListingsError::Validation(_) => StatusCode::BAD_REQUEST,
            ListingsError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ListingsError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ListingsError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ListingsError::Collection(e) => e.error_code(),
            ListingsError::Validation(_) => "VALIDATION_ERROR",
            ListingsError::Storage(e) => e.error_code(),
            ListingsError::Config(_) => "CONFIG_ERROR",
            ListingsError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ListingsError::Collection(CollectionError::NotFound { collection, id }) => {
                Some(serde_json::json!({
                    "collection": collection,
                    "id": id
                }))
            }
            ListingsError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            ListingsError::Validation(ValidationError::InvalidNumber { parameter, value }) => {
                Some(serde_json::json!({
                    "parameter": parameter,
                    "value": value
                }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ListingsError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Collection Errors
// =============================================================================

/// Lookups in a collection that came back empty
#[derive(Debug)]
pub enum CollectionError {
    /// No record with this id exists in the collection
    NotFound { collection: String, id: i64 },

    /// The backing file of a required collection does not exist
    FileMissing { collection: String, path: String },
}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionError::NotFound { collection, id } => {
                write!(f, "{} with id '{}' not found", collection, id)
            }
            CollectionError::FileMissing { collection, path } => {
                write!(f, "Collection '{}' not found at '{}'", collection, path)
            }
        }
    }
}

impl std::error::Error for CollectionError {}

impl CollectionError {
    pub fn error_code(&self) -> &'static str {
        match self {
            CollectionError::NotFound { .. } => "RECORD_NOT_FOUND",
            CollectionError::FileMissing { .. } => "COLLECTION_NOT_FOUND",
        }
    }
}

impl From<CollectionError> for ListingsError {
    fn from(err: CollectionError) -> Self {
        ListingsError::Collection(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug)]
pub enum ValidationError {
    /// Single field validation error
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    FieldErrors(Vec<FieldValidationError>),

    /// A numeric parameter that does not parse as a number
    InvalidNumber { parameter: String, value: String },

    /// Invalid JSON format
    InvalidJson { message: String },

    /// Missing required field
    MissingField { field: String },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldError { field, message } => {
                write!(f, "Validation error for field '{}': {}", field, message)
            }
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ValidationError::InvalidNumber { parameter, value } => {
                write!(f, "Parameter '{}' is not a number: '{}'", parameter, value)
            }
            ValidationError::InvalidJson { message } => {
                write!(f, "Invalid JSON: {}", message)
            }
            ValidationError::MissingField { field } => {
                write!(f, "Missing required field: {}", field)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for ListingsError {
    fn from(err: ValidationError) -> Self {
        ListingsError::Validation(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised while reading or writing collection files
#[derive(Debug)]
pub enum StorageError {
    /// The file could not be read or written
    Io { path: String, message: String },

    /// The file exists but does not hold a JSON array of records
    Corrupt { path: String, message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io { path, message } => {
                write!(f, "I/O error on '{}': {}", path, message)
            }
            StorageError::Corrupt { path, message } => {
                write!(f, "Malformed collection file '{}': {}", path, message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl StorageError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::Io { .. } => "STORAGE_IO_ERROR",
            StorageError::Corrupt { .. } => "STORAGE_CORRUPT",
        }
    }
}

impl From<StorageError> for ListingsError {
    fn from(err: StorageError) -> Self {
        ListingsError::Storage(err)
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors related to configuration loading
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    FileNotFound { path: String },

    /// IO error while reading configuration
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::FileNotFound { path } => {
                write!(f, "Configuration file not found: {}", path)
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for ListingsError {
    fn from(err: ConfigError) -> Self {
        ListingsError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for ListingsError {
    fn from(err: serde_json::Error) -> Self {
        ListingsError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for ListingsError {
    fn from(err: serde_yaml::Error) -> Self {
        ListingsError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<anyhow::Error> for ListingsError {
    fn from(err: anyhow::Error) -> Self {
        ListingsError::Internal(err.to_string())
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for listings operations
pub type ListingsResult<T> = Result<T, ListingsError>;

// =============================================================================
// Tests
// =============================================================================
