//! In-memory stores shared by unit tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::{TimeZone, Utc};
use releasehub_core::ServiceError;

use crate::model::{PlatformAssets, Release};
use crate::store::ReleaseStore;

pub struct MemoryStore {
    releases: Mutex<Vec<Release>>,
}

impl MemoryStore {
    pub fn new(releases: Vec<Release>) -> Self {
        Self {
            releases: Mutex::new(releases),
        }
    }

    pub fn replace(&self, releases: Vec<Release>) {
        *self.releases.lock().unwrap() = releases;
    }
}

impl ReleaseStore for MemoryStore {
    fn active_releases(&self) -> Result<Vec<Release>, ServiceError> {
        Ok(self
            .releases
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.is_active)
            .cloned()
            .collect())
    }
}

/// Store that is always unreachable.
pub struct FailingStore;

impl ReleaseStore for FailingStore {
    fn active_releases(&self) -> Result<Vec<Release>, ServiceError> {
        Err(ServiceError::Upstream("connection refused (10.0.0.5:5432)".into()))
    }
}

/// Release with complete android/windows artifacts under `https://cdn.example/{version}/`.
pub fn release(id: i64, version: &str, day: u32, active: bool) -> Release {
    let mut assets = BTreeMap::new();
    assets.insert(
        "android".to_string(),
        PlatformAssets {
            download_url: Some(format!("https://cdn.example/{version}/app.apk")),
            sha256: Some(format!("{version}-android-sha256")),
        },
    );
    assets.insert(
        "windows".to_string(),
        PlatformAssets {
            download_url: Some(format!("https://cdn.example/{version}/setup.exe")),
            sha256: Some(format!("{version}-windows-sha256")),
        },
    );
    Release {
        id,
        version: version.to_string(),
        release_notes: format!("Release {version}"),
        created_at: Utc.with_ymd_and_hms(2025, 1, day, 12, 0, 0).unwrap(),
        is_active: active,
        assets,
    }
}
