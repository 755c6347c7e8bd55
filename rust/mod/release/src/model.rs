use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Artifact location and checksum for one platform, as stored.
///
/// Either field may be missing; only a complete pair is ever served.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformAssets {
    pub download_url: Option<String>,
    pub sha256: Option<String>,
}

impl PlatformAssets {
    /// The servable download, if both URL and checksum are present and non-blank.
    pub fn direct_download(&self) -> Option<DirectDownload> {
        let url = self.download_url.as_deref().filter(|s| !s.trim().is_empty())?;
        let sha256 = self.sha256.as_deref().filter(|s| !s.trim().is_empty())?;
        Some(DirectDownload {
            url: url.to_string(),
            sha256: sha256.to_string(),
        })
    }
}

/// A published release, one row of the release store.
#[derive(Debug, Clone, PartialEq)]
pub struct Release {
    /// Monotonic store identifier. Breaks `created_at` ties.
    pub id: i64,

    /// Semantic version string (e.g. "1.4.2").
    pub version: String,

    /// Free-form notes; empty when the store has none.
    pub release_notes: String,

    pub created_at: DateTime<Utc>,

    pub is_active: bool,

    /// Per-platform artifacts keyed by platform id.
    pub assets: BTreeMap<String, PlatformAssets>,
}

impl Release {
    pub fn assets_for(&self, platform: &str) -> Option<&PlatformAssets> {
        self.assets.get(platform)
    }
}

/// Direct binary location plus checksum, surfaced for a known platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectDownload {
    pub url: String,
    pub sha256: String,
}

/// Response body of `GET /releases`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    pub latest_version: String,
    pub notes: String,
    pub release_date: DateTime<Utc>,

    /// Human-facing per-platform download page links.
    pub download_urls: BTreeMap<String, String>,

    /// Top-level `url` + `sha256`, present only for a known platform
    /// with a complete artifact.
    #[serde(flatten)]
    pub direct: Option<DirectDownload>,
}
