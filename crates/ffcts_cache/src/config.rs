//! Cache configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, CacheResult};

/// Which assets to keep offline and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache name.
    pub name: String,
    /// Cache version. Changing it starts a fresh cache.
    pub version: String,
    /// Absolute asset paths fetched on install.
    pub assets: Vec<String>,
    /// Parent directory for on-disk caches; `None` keeps everything in memory.
    pub directory: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            name: "pwa-cache".to_string(),
            version: "v2.4".to_string(),
            assets: vec!["/ffcts/index.html".to_string(), "/ffcts/particles.js".to_string()],
            directory: None,
        }
    }
}

impl CacheConfig {
    /// `name-version`, the directory name of this cache.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }

    /// On-disk location of this cache, if any.
    #[must_use]
    pub fn root(&self) -> Option<PathBuf> {
        self.directory.as_ref().map(|dir| dir.join(self.key()))
    }

    /// Rejects empty names or versions and relative asset paths.
    pub fn validate(&self) -> CacheResult<()> {
        let bad_name = |s: &str| s.is_empty() || s.contains(['/', '\\']) || s.starts_with('.');
        if bad_name(&self.name) {
            return Err(CacheError::InvalidConfig {
                field: "name",
                reason: format!("`{}` is not a usable directory name", self.name),
            });
        }
        if bad_name(&self.version) {
            return Err(CacheError::InvalidConfig {
                field: "version",
                reason: format!("`{}` is not a usable directory name", self.version),
            });
        }
        if let Some(asset) = self.assets.iter().find(|a| !a.starts_with('/')) {
            return Err(CacheError::InvalidConfig {
                field: "assets",
                reason: format!("`{asset}` must be an absolute path"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_deployed_worker() {
        let config = CacheConfig::default();
        assert_eq!(config.key(), "pwa-cache-v2.4");
        assert_eq!(config.assets.len(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_name() {
        let config = CacheConfig {
            name: String::new(),
            ..CacheConfig::default()
        };
        assert!(matches!(config.validate(), Err(CacheError::InvalidConfig { field: "name", .. })));
    }

    #[test]
    fn test_rejects_relative_asset() {
        let config = CacheConfig {
            assets: vec!["ffcts/index.html".to_string()],
            ..CacheConfig::default()
        };
        assert!(matches!(config.validate(), Err(CacheError::InvalidConfig { field: "assets", .. })));
    }

    #[test]
    fn test_partial_toml() {
        let config: CacheConfig = toml::from_str("version = \"v3\"").unwrap();
        assert_eq!(config.key(), "pwa-cache-v3");
        assert!(config.directory.is_none());
    }
}
