/**
 * API Error Types
 *
 * Errors returned by handlers are converted to the JSON error envelope
 * `{"success": false, "error": <message>, "statusCode": <code>}` with the
 * status code from `ApiError::status_code`.
 */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the REST and real-time layers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Credential missing, malformed, or expired.
    ///
    /// All authentication failures map to this single variant so the
    /// response never reveals which check failed.
    #[error("Authentication error")]
    Unauthorized,

    /// Request payload failed validation; no state change occurred.
    #[error("Validation error in field '{field}': {message}")]
    Validation { field: String, message: String },

    /// Referenced entity does not exist.
    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    /// Underlying store operation failed.
    #[error("Store error: {message}")]
    Store { message: String },

    /// Serializing an entity for a response or broadcast failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    /// Create a new validation error for a named field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a not-found error for a resource kind ("Task", "Milestone", ...)
    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    /// Create a store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }
        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
            "statusCode": status.as_u16(),
        }));
        (status, body).into_response()
    }
}
