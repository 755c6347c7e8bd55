use std::collections::BTreeMap;
use std::sync::Arc;

use releasehub_core::{ServiceError, parse_timestamp};
use releasehub_sql::{Row, SQLStore};

use crate::model::{PlatformAssets, Release};
use crate::platform::PlatformCatalog;

/// Table holding every release ever published.
pub const RELEASES_TABLE: &str = "app_releases";

/// Read access to the release store.
///
/// The serving path never writes; publishing happens out of band.
pub trait ReleaseStore: Send + Sync {
    /// Point-in-time snapshot of all active releases.
    fn active_releases(&self) -> Result<Vec<Release>, ServiceError>;
}

/// ReleaseStore over the `app_releases` SQL table.
pub struct SqlReleaseStore {
    sql: Arc<dyn SQLStore>,
    catalog: PlatformCatalog,
}

impl SqlReleaseStore {
    pub fn new(sql: Arc<dyn SQLStore>, catalog: PlatformCatalog) -> Self {
        Self { sql, catalog }
    }

    /// Create the releases table with one column pair per catalog platform.
    ///
    /// Existing tables are left untouched; a platform added later needs
    /// its columns added by the publisher.
    pub fn init_schema(sql: &dyn SQLStore, catalog: &PlatformCatalog) -> Result<(), ServiceError> {
        let mut columns = vec![
            "id INTEGER PRIMARY KEY AUTOINCREMENT".to_string(),
            "version TEXT NOT NULL UNIQUE".to_string(),
            "release_notes TEXT NOT NULL DEFAULT ''".to_string(),
            "created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP".to_string(),
            "is_active INTEGER NOT NULL DEFAULT 1".to_string(),
        ];
        for (_, cols) in catalog.iter() {
            columns.push(format!("{} TEXT", cols.url_column));
            columns.push(format!("{} TEXT", cols.sha256_column));
        }

        let ddl = [
            format!(
                "CREATE TABLE IF NOT EXISTS {RELEASES_TABLE} (\n    {}\n)",
                columns.join(",\n    ")
            ),
            format!(
                "CREATE INDEX IF NOT EXISTS idx_{RELEASES_TABLE}_active \
                 ON {RELEASES_TABLE} (is_active, created_at)"
            ),
        ];
        for stmt in &ddl {
            sql.exec(stmt, &[])
                .map_err(|e| ServiceError::Upstream(format!("schema init: {e}")))?;
        }
        Ok(())
    }

    fn row_to_release(&self, row: &Row) -> Result<Release, ServiceError> {
        let id = row
            .get_i64("id")
            .ok_or_else(|| ServiceError::Internal("release row without id".into()))?;
        let version = row
            .get_str("version")
            .ok_or_else(|| ServiceError::Internal(format!("release {id} has no version")))?
            .to_string();
        let raw_created = row
            .get_str("created_at")
            .ok_or_else(|| ServiceError::Internal(format!("release {id} has no created_at")))?;
        let created_at = parse_timestamp(raw_created).ok_or_else(|| {
            ServiceError::Internal(format!("release {id} has unparseable created_at '{raw_created}'"))
        })?;

        let mut assets = BTreeMap::new();
        for (platform, cols) in self.catalog.iter() {
            assets.insert(
                platform.to_string(),
                PlatformAssets {
                    download_url: row.get_str(&cols.url_column).map(str::to_string),
                    sha256: row.get_str(&cols.sha256_column).map(str::to_string),
                },
            );
        }

        Ok(Release {
            id,
            version,
            release_notes: row.get_str("release_notes").unwrap_or_default().to_string(),
            created_at,
            is_active: row.get_bool("is_active").unwrap_or(false),
            assets,
        })
    }
}

impl ReleaseStore for SqlReleaseStore {
    fn active_releases(&self) -> Result<Vec<Release>, ServiceError> {
        let sql = format!(
            "SELECT * FROM {RELEASES_TABLE} WHERE is_active = 1 ORDER BY created_at DESC, id DESC"
        );
        let rows = self
            .sql
            .query(&sql, &[])
            .map_err(|e| ServiceError::Upstream(format!("release store: {e}")))?;

        rows.iter().map(|row| self.row_to_release(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use releasehub_sql::{SqliteStore, Value};

    fn seeded(catalog: &PlatformCatalog) -> Arc<dyn SQLStore> {
        let sql: Arc<dyn SQLStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
        SqlReleaseStore::init_schema(sql.as_ref(), catalog).unwrap();
        sql
    }

    fn insert(sql: &dyn SQLStore, version: &str, created_at: &str, active: i64, android_url: Option<&str>) {
        sql.exec(
            "INSERT INTO app_releases (version, release_notes, created_at, is_active, \
             android_download_url, android_sha256) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            &[
                Value::Text(version.into()),
                Value::Text(format!("notes {version}")),
                Value::Text(created_at.into()),
                Value::Integer(active),
                android_url.map(|u| Value::Text(u.into())).unwrap_or(Value::Null),
                android_url.map(|_| Value::Text("abc123".into())).unwrap_or(Value::Null),
            ],
        )
        .unwrap();
    }

    #[test]
    fn returns_only_active_rows() {
        let catalog = PlatformCatalog::default();
        let sql = seeded(&catalog);
        insert(sql.as_ref(), "1.0.0", "2025-01-01T00:00:00Z", 1, Some("https://cdn/1.apk"));
        insert(sql.as_ref(), "1.1.0", "2025-02-01T00:00:00Z", 0, Some("https://cdn/2.apk"));
        insert(sql.as_ref(), "1.2.0", "2025-03-01 00:00:00", 1, None);

        let store = SqlReleaseStore::new(sql, catalog);
        let releases = store.active_releases().unwrap();
        let versions: Vec<_> = releases.iter().map(|r| r.version.as_str()).collect();
        assert_eq!(versions, vec!["1.2.0", "1.0.0"]);
        assert!(releases.iter().all(|r| r.is_active));

        let old = &releases[1];
        assert_eq!(old.release_notes, "notes 1.0.0");
        let android = old.assets_for("android").unwrap();
        assert_eq!(android.download_url.as_deref(), Some("https://cdn/1.apk"));
        assert_eq!(android.sha256.as_deref(), Some("abc123"));
        assert_eq!(old.assets_for("windows"), Some(&PlatformAssets::default()));

        assert_eq!(releases[0].assets_for("android").unwrap().direct_download(), None);
    }

    #[test]
    fn ids_are_monotonic() {
        let catalog = PlatformCatalog::default();
        let sql = seeded(&catalog);
        insert(sql.as_ref(), "1.0.0", "2025-01-01T00:00:00Z", 1, None);
        insert(sql.as_ref(), "1.0.1", "2025-01-01T00:00:00Z", 1, None);

        let releases = SqlReleaseStore::new(sql, catalog).active_releases().unwrap();
        assert_eq!(releases[0].version, "1.0.1");
        assert!(releases[0].id > releases[1].id);
    }

    #[test]
    fn extra_platform_reads_its_columns() {
        let catalog = PlatformCatalog::conventional(["android", "linux", "windows"]).unwrap();
        let sql = seeded(&catalog);
        sql.exec(
            "INSERT INTO app_releases (version, created_at, linux_download_url, linux_sha256) \
             VALUES ('0.9.0', '2025-01-01T00:00:00Z', 'https://cdn/app.AppImage', 'beef')",
            &[],
        )
        .unwrap();

        let releases = SqlReleaseStore::new(sql, catalog).active_releases().unwrap();
        let linux = releases[0].assets_for("linux").unwrap().direct_download().unwrap();
        assert_eq!(linux.url, "https://cdn/app.AppImage");
        assert_eq!(linux.sha256, "beef");
        assert_eq!(releases[0].release_notes, "");
    }

    #[test]
    fn bad_timestamp_is_an_error() {
        let catalog = PlatformCatalog::default();
        let sql = seeded(&catalog);
        insert(sql.as_ref(), "1.0.0", "last tuesday", 1, None);

        let err = SqlReleaseStore::new(sql, catalog).active_releases().unwrap_err();
        assert!(matches!(err, ServiceError::Internal(_)));
    }

    #[test]
    fn missing_table_is_upstream_failure() {
        let sql: Arc<dyn SQLStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
        let err = SqlReleaseStore::new(sql, PlatformCatalog::default())
            .active_releases()
            .unwrap_err();
        assert!(matches!(err, ServiceError::Upstream(_)));
    }

    #[test]
    fn init_schema_is_idempotent() {
        let catalog = PlatformCatalog::default();
        let sql = seeded(&catalog);
        SqlReleaseStore::init_schema(sql.as_ref(), &catalog).unwrap();
    }
}
