//! Platform catalog — the configured set of recognized platform ids and
//! the store columns carrying each platform's artifact.
//!
//! Adding a platform is a catalog entry plus two store columns; nothing
//! else in the service branches on platform names.

use std::collections::BTreeMap;

use releasehub_core::ServiceError;

/// Store columns holding one platform's download URL and checksum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformColumns {
    pub url_column: String,
    pub sha256_column: String,
}

impl PlatformColumns {
    /// Conventional columns: `{id}_download_url` and `{id}_sha256`.
    pub fn conventional(id: &str) -> Self {
        let stem = id.replace('-', "_");
        Self {
            url_column: format!("{stem}_download_url"),
            sha256_column: format!("{stem}_sha256"),
        }
    }
}

/// Recognized platforms, ordered by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformCatalog {
    platforms: BTreeMap<String, PlatformColumns>,
}

impl Default for PlatformCatalog {
    fn default() -> Self {
        let platforms = ["android", "windows"]
            .into_iter()
            .map(|id| (id.to_string(), PlatformColumns::conventional(id)))
            .collect();
        Self { platforms }
    }
}

impl PlatformCatalog {
    /// Build a catalog from explicit entries, validating ids and column names.
    pub fn new<I>(entries: I) -> Result<Self, ServiceError>
    where
        I: IntoIterator<Item = (String, PlatformColumns)>,
    {
        let mut platforms = BTreeMap::new();
        for (id, columns) in entries {
            if !is_valid_platform_id(&id) {
                return Err(ServiceError::InvalidInput(format!(
                    "invalid platform id '{id}': use lowercase letters, digits, '-' or '_'"
                )));
            }
            for column in [&columns.url_column, &columns.sha256_column] {
                if !is_valid_column(column) {
                    return Err(ServiceError::InvalidInput(format!(
                        "invalid column '{column}' for platform '{id}'"
                    )));
                }
            }
            platforms.insert(id, columns);
        }
        if platforms.is_empty() {
            return Err(ServiceError::InvalidInput(
                "platform catalog must not be empty".into(),
            ));
        }
        Ok(Self { platforms })
    }

    /// Build a catalog using conventional column names for every id.
    pub fn conventional<I, S>(ids: I) -> Result<Self, ServiceError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ids.into_iter().map(|id| {
            let id = id.into();
            let columns = PlatformColumns::conventional(&id);
            (id, columns)
        }))
    }

    pub fn get(&self, id: &str) -> Option<&PlatformColumns> {
        self.platforms.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.platforms.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlatformColumns)> {
        self.platforms.iter().map(|(id, cols)| (id.as_str(), cols))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.platforms.keys().map(String::as_str)
    }

    /// Human-readable accepted values, e.g. `"android" or "windows"`.
    pub fn accepted_values(&self) -> String {
        let quoted: Vec<String> = self.ids().map(|id| format!("\"{id}\"")).collect();
        match quoted.split_last() {
            None => String::new(),
            Some((last, [])) => last.clone(),
            Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
        }
    }
}

fn is_valid_platform_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

/// Column names are interpolated into DDL, so keep them to plain identifiers.
fn is_valid_column(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
