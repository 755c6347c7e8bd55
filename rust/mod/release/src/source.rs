//! Release sources for the download redirect.
//!
//! The redirect only needs a platform's direct URL. It can get it
//! in-process ([`InlineSource`]) or from a release endpoint over HTTP
//! ([`HttpSource`]); both report the same error kinds.

use std::sync::Arc;
use std::time::Duration;

use releasehub_core::ServiceError;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::resolver::NO_RELEASES;
use crate::service::ReleaseService;

/// Where the redirect resolver looks up a platform's binary URL.
///
/// `Ok(None)` means the latest release has no URL for the platform.
/// `Err(NotFound)` means there is no active release at all; any other
/// error is a dependency failure.
#[async_trait::async_trait]
pub trait ReleaseSource: Send + Sync + 'static {
    async fn download_url(&self, platform: &str) -> Result<Option<String>, ServiceError>;
}

/// Resolves against the local service, no network hop.
pub struct InlineSource {
    service: Arc<ReleaseService>,
}

impl InlineSource {
    pub fn new(service: Arc<ReleaseService>) -> Self {
        Self { service }
    }
}

#[async_trait::async_trait]
impl ReleaseSource for InlineSource {
    async fn download_url(&self, platform: &str) -> Result<Option<String>, ServiceError> {
        let info = self.service.latest(Some(platform))?;
        Ok(info.direct.map(|d| d.url))
    }
}

/// Only the field the redirect needs; the rest of the body is ignored.
#[derive(Deserialize)]
struct UpstreamRelease {
    #[serde(default)]
    url: Option<String>,
}

/// Queries a `GET /releases?platform=…` endpoint. No retries.
pub struct HttpSource {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpSource {
    /// `endpoint` is the full releases URL, e.g. `https://host/releases`.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Internal(format!("http client: {e}")))?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key,
        })
    }
}

#[async_trait::async_trait]
impl ReleaseSource for HttpSource {
    async fn download_url(&self, platform: &str) -> Result<Option<String>, ServiceError> {
        let mut request = self
            .http
            .get(&self.endpoint)
            .query(&[("platform", platform)]);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| ServiceError::Upstream(format!("release endpoint: {e}")))?;

        match resp.status() {
            StatusCode::NOT_FOUND => return Err(ServiceError::NotFound(NO_RELEASES.into())),
            status if !status.is_success() => {
                return Err(ServiceError::Upstream(format!(
                    "release endpoint returned {status}"
                )));
            }
            _ => {}
        }

        let body: UpstreamRelease = resp
            .json()
            .await
            .map_err(|e| ServiceError::Upstream(format!("release endpoint body: {e}")))?;
        Ok(body.url.filter(|u| !u.trim().is_empty()))
    }
}
