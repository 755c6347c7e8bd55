pub mod cors;
pub mod credential;
pub mod download;
pub mod releases;

use std::sync::Arc;

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::service::ReleaseService;
use crate::source::ReleaseSource;
use credential::SharedCredential;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ReleaseService>,
    pub source: Arc<dyn ReleaseSource>,
    pub cache_max_age_secs: u32,
}

/// Build the release API router.
///
/// `/releases` sits behind the shared credential; `/download/{platform}`
/// is public (browsers follow it directly). Both get CORS.
pub fn router(state: AppState, shared: SharedCredential) -> Router {
    let guarded = Router::new()
        .route("/releases", get(releases::latest_release))
        .route_layer(middleware::from_fn_with_state(
            shared,
            credential::require_credential,
        ));

    let public = Router::new().route("/download/{platform}", get(download::redirect));

    guarded
        .merge(public)
        .with_state(state)
        .layer(middleware::from_fn(cors::cors))
}

/// Endpoint-specific error body: `{"error": "<message>"}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}
