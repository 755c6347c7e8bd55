//! Server configuration — `/etc/releasehub/<name>.toml` or an explicit path.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use release::platform::{PlatformCatalog, PlatformColumns};
use releasehub_core::ServiceError;
use serde::Deserialize;

const CONFIG_DIR: &str = "/etc/releasehub";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub storage: StorageConfig,

    pub release: ReleaseConfig,

    /// Recognized platforms. Empty means the built-in android + windows.
    #[serde(default)]
    pub platforms: BTreeMap<String, PlatformEntry>,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub download: DownloadConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub sqlite_path: String,

    /// Open the store read-only and skip schema bootstrap.
    #[serde(default)]
    pub read_only: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseConfig {
    /// Base for human-facing `/download/{platform}` links.
    pub display_base_url: String,

    #[serde(default = "default_cache_max_age")]
    pub cache_max_age_secs: u32,
}

/// Column overrides; unset columns use `{id}_download_url` / `{id}_sha256`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlatformEntry {
    pub url_column: Option<String>,
    pub sha256_column: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Shared credential for `/releases`. Unset leaves it open.
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DownloadConfig {
    /// Full URL of a remote `/releases` endpoint. Unset resolves in-process.
    pub upstream_url: Option<String>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            upstream_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_cache_max_age() -> u32 {
    300
}

fn default_timeout() -> u64 {
    10
}

impl ServerConfig {
    /// A bare context name maps to `/etc/releasehub/<name>.toml`; anything
    /// containing `/` or `.` is taken as a path.
    pub fn resolve_path(name_or_path: &str) -> PathBuf {
        if name_or_path.contains('/') || name_or_path.contains('.') {
            PathBuf::from(name_or_path)
        } else {
            Path::new(CONFIG_DIR).join(format!("{name_or_path}.toml"))
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn catalog(&self) -> Result<PlatformCatalog, ServiceError> {
        if self.platforms.is_empty() {
            return Ok(PlatformCatalog::default());
        }
        PlatformCatalog::new(self.platforms.iter().map(|(id, entry)| {
            let conventional = PlatformColumns::conventional(id);
            let columns = PlatformColumns {
                url_column: entry.url_column.clone().unwrap_or(conventional.url_column),
                sha256_column: entry.sha256_column.clone().unwrap_or(conventional.sha256_column),
            };
            (id.clone(), columns)
        }))
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download.timeout_secs)
    }
}
