//! Release resolver — selects the current release and shapes the response.
//!
//! Pure: the caller supplies a point-in-time snapshot of the store.

use std::collections::BTreeMap;

use releasehub_core::ServiceError;
use tracing::warn;

use crate::model::{Release, ReleaseInfo};
use crate::platform::PlatformCatalog;

/// Public message for the no-active-release case.
pub const NO_RELEASES: &str = "No releases found";

/// Pick the newest active release: max `created_at`, ties to the higher id.
pub fn select_latest(releases: &[Release]) -> Option<&Release> {
    releases
        .iter()
        .filter(|r| r.is_active)
        .max_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
}

/// Display link per catalog platform: `{base}/download/{platform}`.
pub fn display_links(catalog: &PlatformCatalog, display_base_url: &str) -> BTreeMap<String, String> {
    let base = display_base_url.trim_end_matches('/');
    catalog
        .ids()
        .map(|id| (id.to_string(), format!("{base}/download/{id}")))
        .collect()
}

/// Resolve the response for an optional platform.
///
/// Unknown platforms are not an error here: the response simply carries
/// no `url`/`sha256`.
pub fn resolve(
    releases: &[Release],
    platform: Option<&str>,
    catalog: &PlatformCatalog,
    display_base_url: &str,
) -> Result<ReleaseInfo, ServiceError> {
    let latest = select_latest(releases)
        .ok_or_else(|| ServiceError::NotFound(NO_RELEASES.into()))?;

    let direct = platform
        .filter(|p| catalog.contains(p))
        .and_then(|p| {
            let direct = latest.assets_for(p).and_then(|a| a.direct_download());
            if direct.is_none() {
                warn!(
                    platform = p,
                    version = %latest.version,
                    "latest release has no complete artifact for platform"
                );
            }
            direct
        });

    Ok(ReleaseInfo {
        latest_version: latest.version.clone(),
        notes: latest.release_notes.clone(),
        release_date: latest.created_at,
        download_urls: display_links(catalog, display_base_url),
        direct,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DirectDownload;
    use crate::testing::release;
    use chrono::{TimeZone, Utc};

    const BASE: &str = "https://site.example";

    #[test]
    fn picks_newest_active() {
        let releases = vec![
            release(1, "1.0.0", 1, true),
            release(2, "1.1.0", 5, true),
            release(3, "1.2.0", 9, false),
            release(4, "1.0.1", 3, true),
        ];
        let info = resolve(&releases, None, &PlatformCatalog::default(), BASE).unwrap();
        assert_eq!(info.latest_version, "1.1.0");
        assert_eq!(info.notes, "Release 1.1.0");
        assert_eq!(info.release_date, Utc.with_ymd_and_hms(2025, 1, 5, 12, 0, 0).unwrap());
    }

    #[test]
    fn input_order_does_not_matter() {
        let mut releases = vec![
            release(1, "1.0.0", 1, true),
            release(2, "1.1.0", 5, true),
            release(3, "1.0.5", 4, true),
        ];
        let first = select_latest(&releases).unwrap().version.clone();
        releases.reverse();
        assert_eq!(select_latest(&releases).unwrap().version, first);
    }

    #[test]
    fn timestamp_ties_go_to_higher_id() {
        let a = release(10, "2.0.0-a", 7, true);
        let b = release(11, "2.0.0-b", 7, true);
        for input in [vec![a.clone(), b.clone()], vec![b.clone(), a.clone()]] {
            for _ in 0..3 {
                assert_eq!(select_latest(&input).unwrap().id, 11);
            }
        }
    }

    #[test]
    fn no_active_release_is_not_found() {
        let releases = vec![release(1, "1.0.0", 1, false)];
        let err = resolve(&releases, Some("android"), &PlatformCatalog::default(), BASE).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == NO_RELEASES));

        let err = resolve(&[], None, &PlatformCatalog::default(), BASE).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn known_platform_copies_url_and_checksum() {
        let releases = vec![release(1, "3.1.4", 2, true)];
        let catalog = PlatformCatalog::default();

        let android = resolve(&releases, Some("android"), &catalog, BASE).unwrap();
        assert_eq!(
            android.direct,
            Some(DirectDownload {
                url: "https://cdn.example/3.1.4/app.apk".into(),
                sha256: "3.1.4-android-sha256".into(),
            })
        );

        let windows = resolve(&releases, Some("windows"), &catalog, BASE).unwrap();
        assert_eq!(windows.direct.unwrap().url, "https://cdn.example/3.1.4/setup.exe");
    }

    #[test]
    fn omitted_or_unknown_platform_has_links_only() {
        let releases = vec![release(1, "1.0.0", 1, true)];
        let catalog = PlatformCatalog::default();
        for platform in [None, Some("linux"), Some("ANDROID"), Some("")] {
            let info = resolve(&releases, platform, &catalog, BASE).unwrap();
            assert_eq!(info.direct, None, "platform {platform:?}");
            assert_eq!(info.download_urls.len(), 2);
            assert_eq!(info.download_urls["android"], "https://site.example/download/android");
            assert_eq!(info.download_urls["windows"], "https://site.example/download/windows");
        }
    }

    #[test]
    fn incomplete_artifact_is_omitted() {
        let mut r = release(1, "1.0.0", 1, true);
        r.assets.get_mut("windows").unwrap().sha256 = None;
        r.assets.remove("android");
        let catalog = PlatformCatalog::default();

        assert_eq!(resolve(&[r.clone()], Some("windows"), &catalog, BASE).unwrap().direct, None);
        assert_eq!(resolve(&[r], Some("android"), &catalog, BASE).unwrap().direct, None);
    }

    #[test]
    fn links_follow_catalog_and_trim_base() {
        let catalog = PlatformCatalog::conventional(["android", "macos", "windows"]).unwrap();
        let links = display_links(&catalog, "https://site.example/");
        assert_eq!(links.len(), 3);
        assert_eq!(links["macos"], "https://site.example/download/macos");
    }
}
