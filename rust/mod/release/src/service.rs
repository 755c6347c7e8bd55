use std::sync::Arc;

use releasehub_core::ServiceError;

use crate::model::ReleaseInfo;
use crate::platform::PlatformCatalog;
use crate::resolver;
use crate::store::ReleaseStore;

/// Release service — reads a store snapshot per call and resolves it.
///
/// Holds no cached release; freshness is bounded by HTTP caching only.
pub struct ReleaseService {
    store: Arc<dyn ReleaseStore>,
    catalog: PlatformCatalog,
    display_base_url: String,
}

impl ReleaseService {
    pub fn new(
        store: Arc<dyn ReleaseStore>,
        catalog: PlatformCatalog,
        display_base_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            catalog,
            display_base_url: display_base_url.into(),
        }
    }

    pub fn catalog(&self) -> &PlatformCatalog {
        &self.catalog
    }

    /// Latest active release, shaped for `platform`.
    pub fn latest(&self, platform: Option<&str>) -> Result<ReleaseInfo, ServiceError> {
        let snapshot = self.store.active_releases()?;
        resolver::resolve(&snapshot, platform, &self.catalog, &self.display_base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingStore, MemoryStore, release};

    #[test]
    fn latest_reads_store_each_call() {
        let store = Arc::new(MemoryStore::new(vec![release(1, "1.0.0", 1, true)]));
        let svc = ReleaseService::new(store.clone(), PlatformCatalog::default(), "https://site");
        assert_eq!(svc.latest(None).unwrap().latest_version, "1.0.0");

        store.replace(vec![release(1, "1.0.0", 1, true), release(2, "1.1.0", 2, true)]);
        assert_eq!(svc.latest(None).unwrap().latest_version, "1.1.0");
    }

    #[test]
    fn store_failure_propagates() {
        let svc = ReleaseService::new(Arc::new(FailingStore), PlatformCatalog::default(), "https://site");
        assert!(matches!(svc.latest(Some("android")), Err(ServiceError::Upstream(_))));
    }
}
