pub mod api;
pub mod model;
pub mod platform;
pub mod resolver;
pub mod service;
pub mod source;
pub mod store;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use axum::Router;
use releasehub_core::Module;

use api::AppState;
use api::credential::SharedCredential;
use service::ReleaseService;
use source::ReleaseSource;

/// Release module — latest-release endpoint and download redirects.
pub struct ReleaseModule {
    state: AppState,
    credential: SharedCredential,
}

impl ReleaseModule {
    pub fn new(
        service: Arc<ReleaseService>,
        source: Arc<dyn ReleaseSource>,
        cache_max_age_secs: u32,
        api_key: Option<String>,
    ) -> Self {
        Self {
            state: AppState {
                service,
                source,
                cache_max_age_secs,
            },
            credential: SharedCredential::new(api_key),
        }
    }
}

impl Module for ReleaseModule {
    fn name(&self) -> &str {
        "release"
    }

    fn routes(&self) -> Router {
        api::router(self.state.clone(), self.credential.clone())
    }
}
