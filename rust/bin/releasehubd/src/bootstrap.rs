//! Bootstrap — configuration checks and store setup.
//!
//! When releasehubd starts:
//! 1. Verify the config — refuse to start on anything unusable.
//! 2. Open the release store; when writable, ensure the table exists.

use std::path::Path;
use std::sync::Arc;

use release::platform::PlatformCatalog;
use release::store::SqlReleaseStore;
use releasehub_sql::{SQLStore, SqliteStore};
use tracing::info;

use crate::config::ServerConfig;

/// Upper bound for `Cache-Control: max-age`; keeps post-release staleness short.
pub const MAX_CACHE_AGE_SECS: u32 = 3600;

/// Verify server configuration is ready to serve.
pub fn verify_config(config: &ServerConfig) -> anyhow::Result<PlatformCatalog> {
    if config.storage.sqlite_path.is_empty() {
        anyhow::bail!("storage.sqlite_path is empty in configuration.");
    }
    let base = config.release.display_base_url.trim();
    if base.is_empty() {
        anyhow::bail!("release.display_base_url is empty in configuration.");
    }
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        anyhow::bail!("release.display_base_url must be an http(s) URL, got '{}'.", base);
    }
    let age = config.release.cache_max_age_secs;
    if age == 0 || age > MAX_CACHE_AGE_SECS {
        anyhow::bail!(
            "release.cache_max_age_secs must be within 1..={}, got {}.",
            MAX_CACHE_AGE_SECS,
            age
        );
    }
    if config.download.timeout_secs == 0 {
        anyhow::bail!("download.timeout_secs must be positive.");
    }
    if let Some(url) = &config.download.upstream_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("download.upstream_url must be an http(s) URL, got '{}'.", url);
        }
    }
    config
        .catalog()
        .map_err(|e| anyhow::anyhow!("invalid [platforms] configuration: {}", e))
}

/// Open the SQLite release store. Writable stores get the schema ensured.
pub fn open_store(
    config: &ServerConfig,
    catalog: &PlatformCatalog,
) -> anyhow::Result<Arc<dyn SQLStore>> {
    let path = Path::new(&config.storage.sqlite_path);

    if config.storage.read_only {
        let store = SqliteStore::open_read_only(path)
            .map_err(|e| anyhow::anyhow!("failed to open release store read-only: {}", e))?;
        info!("Release store opened read-only at {}", path.display());
        return Ok(Arc::new(store));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let store = SqliteStore::open(path)
        .map_err(|e| anyhow::anyhow!("failed to open release store: {}", e))?;
    SqlReleaseStore::init_schema(&store, catalog)
        .map_err(|e| anyhow::anyhow!("failed to initialize release schema: {}", e))?;
    info!("Release store ready at {}", path.display());
    Ok(Arc::new(store))
}
