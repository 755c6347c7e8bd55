use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Stable, machine-readable identifiers used in logs. Public response
// bodies are shaped per endpoint and never carry these for 5xx.

/// Stable error code constants.
pub mod error_code {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INVALID_INPUT: &str = "INVALID_INPUT";
    pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
    pub const UPSTREAM_FAILURE: &str = "UPSTREAM_FAILURE";
    pub const INTERNAL: &str = "INTERNAL";
}

// ── ServiceError ────────────────────────────────────────────────────

/// Unified service error type.
///
/// `NotFound`, `InvalidInput` and `Unauthorized` are client-facing and
/// deterministic. `Upstream` and `Internal` carry operator-facing detail
/// that must be logged, not returned.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// No matching resource (e.g. no active release). HTTP 404.
    #[error("{0}")]
    NotFound(String),

    /// Request input is invalid (e.g. unknown platform). HTTP 400.
    #[error("{0}")]
    InvalidInput(String),

    /// Missing or wrong shared credential. HTTP 401.
    #[error("{0}")]
    Unauthorized(String),

    /// A dependency (store, internal endpoint) failed. HTTP 500.
    #[error("upstream: {0}")]
    Upstream(String),

    /// Unexpected internal error. HTTP 500.
    #[error("internal: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Stable, machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => error_code::NOT_FOUND,
            ServiceError::InvalidInput(_) => error_code::INVALID_INPUT,
            ServiceError::Unauthorized(_) => error_code::UNAUTHENTICATED,
            ServiceError::Upstream(_) => error_code::UPSTREAM_FAILURE,
            ServiceError::Internal(_) => error_code::INTERNAL,
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True for errors whose message is safe to show to the caller.
    pub fn is_client_facing(&self) -> bool {
        !self.status_code().is_server_error()
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if self.is_client_facing() {
            self.to_string()
        } else {
            "Internal server error".to_string()
        };
        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}
