use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use releasehub_core::ServiceError;
use tracing::{debug, error};

use super::{ApiError, AppState};

const URL_NOT_FOUND: &str = "Download URL not found";
const DOWNLOAD_FAILED: &str = "Failed to process download request";

/// `GET /download/{platform}` — 302 to the platform's binary.
///
/// The platform is validated before any lookup. Lookup failures are
/// not retried.
pub async fn redirect(
    State(state): State<AppState>,
    Path(platform): Path<String>,
) -> Result<Response, ApiError> {
    let catalog = state.service.catalog();
    if !catalog.contains(&platform) {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            format!("Invalid platform. Use {}", catalog.accepted_values()),
        ));
    }

    let url = match state.source.download_url(&platform).await {
        Ok(Some(url)) => url,
        Ok(None) | Err(ServiceError::NotFound(_)) => {
            return Err(ApiError::new(StatusCode::NOT_FOUND, URL_NOT_FOUND));
        }
        Err(err) => {
            error!(platform = %platform, code = err.error_code(), error = %err, "download lookup failed");
            return Err(ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, DOWNLOAD_FAILED));
        }
    };

    let location = HeaderValue::from_str(&url).map_err(|e| {
        error!(platform = %platform, error = %e, "download url is not a valid Location");
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, DOWNLOAD_FAILED)
    })?;

    debug!(platform = %platform, url = %url, "redirecting download");
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
