use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use releasehub_core::ServiceError;
use serde::Deserialize;
use tracing::{debug, error};

use super::{ApiError, AppState};
use crate::resolver::NO_RELEASES;

const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Debug, Deserialize)]
pub struct ReleaseQuery {
    #[serde(default)]
    pub platform: Option<String>,
}

/// `GET /releases?platform=…`
pub async fn latest_release(
    State(state): State<AppState>,
    query: Result<Query<ReleaseQuery>, QueryRejection>,
) -> Response {
    let platform = match query {
        Ok(Query(q)) => q.platform.filter(|p| !p.is_empty()),
        Err(rejection) => {
            error!(error = %rejection, "malformed release query");
            return ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR).into_response();
        }
    };

    match state.service.latest(platform.as_deref()) {
        Ok(info) => {
            debug!(
                platform = platform.as_deref().unwrap_or("-"),
                version = %info.latest_version,
                direct = info.direct.is_some(),
                "served latest release"
            );
            let cache = HeaderValue::from_str(&format!("public, max-age={}", state.cache_max_age_secs))
                .unwrap_or_else(|_| HeaderValue::from_static("no-store"));
            ([(header::CACHE_CONTROL, cache)], Json(info)).into_response()
        }
        Err(ServiceError::NotFound(_)) => {
            ApiError::new(StatusCode::NOT_FOUND, NO_RELEASES).into_response()
        }
        Err(err) => {
            error!(
                platform = platform.as_deref().unwrap_or("-"),
                code = err.error_code(),
                error = %err,
                "failed to resolve latest release"
            );
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR).into_response()
        }
    }
}
