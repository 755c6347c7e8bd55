//! Optional shared credential for the release endpoint.
//!
//! Accepts `Authorization: Bearer <key>` or `apikey: <key>`. With no key
//! configured every request passes.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use releasehub_core::ServiceError;
use subtle::ConstantTimeEq;
use tracing::warn;

#[derive(Clone, Default)]
pub struct SharedCredential(Option<Arc<str>>);

impl SharedCredential {
    pub fn new(key: Option<String>) -> Self {
        Self(key.filter(|k| !k.is_empty()).map(Arc::from))
    }

    fn accepts(&self, headers: &HeaderMap) -> bool {
        let Some(expected) = self.0.as_deref() else {
            return true;
        };
        presented_keys(headers).any(|given| bool::from(given.as_bytes().ct_eq(expected.as_bytes())))
    }
}

/// Both candidate headers; either one carrying the key is enough.
fn presented_keys(headers: &HeaderMap) -> impl Iterator<Item = &str> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    let apikey = headers.get("apikey").and_then(|v| v.to_str().ok());
    bearer.into_iter().chain(apikey)
}

pub async fn require_credential(
    State(credential): State<SharedCredential>,
    request: Request,
    next: Next,
) -> Response {
    if credential.accepts(request.headers()) {
        return next.run(request).await;
    }
    warn!(path = %request.uri().path(), "rejected request without valid credential");
    ServiceError::Unauthorized("Unauthorized".into()).into_response()
}
