//! Typed error handling for the catalog
//!
//! The query engine itself never fails. Every error originates in a
//! collaborator: a catalog source that could not be reached, an id that does not
//! exist, a persistence backend, or configuration.
//!
//! # Example
//!
//! ```rust,ignore
//! match source.get(&id).await {
//!     Ok(Some(product)) => render(product),
//!     Ok(None) => render_not_found(),
//!     Err(e) if e.is_retryable() => render_try_again(e),
//!     Err(e) => return Err(e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Convenience alias used by collaborator traits
pub type CatalogResult<T> = Result<T, CatalogError>;

/// The main error type for the catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog source could not be reached or returned an error
    #[error("Failed to fetch {source_name}: {message}")]
    FetchFailed {
        source_name: String,
        message: String,
    },

    /// A single entity lookup found nothing
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: String },

    /// A persistence backend failed
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Stored or fetched JSON could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A request parameter was rejected
    #[error("Invalid value for '{field}': {message}")]
    InvalidInput { field: String, message: String },
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Whether the client may offer a "try again" action
    pub retryable: bool,
}

impl CatalogError {
    pub fn fetch_failed(source_name: impl Into<String>, message: impl ToString) -> Self {
        CatalogError::FetchFailed {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    pub fn not_found(entity_type: impl Into<String>, id: impl ToString) -> Self {
        CatalogError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn storage(message: impl ToString) -> Self {
        CatalogError::Storage {
            message: message.to_string(),
        }
    }

    pub fn config(message: impl ToString) -> Self {
        CatalogError::Config {
            message: message.to_string(),
        }
    }

    pub fn invalid_input(field: impl Into<String>, message: impl ToString) -> Self {
        CatalogError::InvalidInput {
            field: field.into(),
            message: message.to_string(),
        }
    }

    /// Only fetch failures warrant a manual retry
    pub fn is_retryable(&self) -> bool {
        matches!(self, CatalogError::FetchFailed { .. })
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::FetchFailed { .. } => StatusCode::BAD_GATEWAY,
            CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
            CatalogError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            CatalogError::Storage { .. }
            | CatalogError::Config { .. }
            | CatalogError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::FetchFailed { .. } => "FETCH_FAILED",
            CatalogError::NotFound { .. } => "NOT_FOUND",
            CatalogError::Storage { .. } => "STORAGE_ERROR",
            CatalogError::Config { .. } => "CONFIG_ERROR",
            CatalogError::Serialization(_) => "SERIALIZATION_ERROR",
            CatalogError::InvalidInput { .. } => "INVALID_INPUT",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            retryable: self.is_retryable(),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}
