//! # Asset Store
//!
//! A versioned, cache-first store. The cache is keyed `name-version`; a new
//! version never sees the assets of an old one.
//!
//! ## On-disk layout
//!
//! ```text
//! <directory>/
//!   pwa-cache-v2.4/
//!     manifest.toml            name, version, one entry per asset
//!     1a2b3c4d-index.html      asset bytes, file named crc32(path)-basename
//!     5e6f7a8b-particles.js
//!   pwa-cache-v2.3/            stale, removed by purge_stale()
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::CacheConfig;
use crate::error::{CacheError, CacheResult};
use crate::fetcher::Fetcher;

const MANIFEST: &str = "manifest.toml";

/// Where a response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Served from the cache.
    Cache,
    /// Cache miss, served by the fetcher.
    Network,
}

/// Asset bytes plus their origin.
#[derive(Debug, Clone)]
pub struct Response {
    /// Requested path.
    pub path: String,
    /// Asset bytes.
    pub body: Arc<[u8]>,
    /// Cache hit or network fallback.
    pub source: Source,
}

/// Outcome of [`AssetCache::install`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// Assets stored.
    pub stored: usize,
    /// Total bytes stored.
    pub bytes: usize,
}

#[derive(Debug, Clone)]
struct Entry {
    body: Arc<[u8]>,
    crc32: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Manifest {
    name: String,
    version: String,
    #[serde(default)]
    assets: Vec<ManifestEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ManifestEntry {
    path: String,
    file: String,
    crc32: u32,
    len: usize,
}

fn file_name(path: &str) -> String {
    let base = path.rsplit('/').next().filter(|s| !s.is_empty()).unwrap_or("index");
    format!("{:08x}-{base}", crc32fast::hash(path.as_bytes()))
}

/// Versioned cache-first asset store.
#[derive(Debug)]
pub struct AssetCache {
    config: CacheConfig,
    root: Option<PathBuf>,
    entries: RwLock<HashMap<String, Entry>>,
}

impl AssetCache {
    /// Opens (or creates) the cache for `config`.
    ///
    /// With a directory configured, previously installed assets are loaded
    /// and verified; entries whose checksum no longer matches are dropped.
    pub fn open(config: CacheConfig) -> CacheResult<Self> {
        config.validate()?;
        let root = config.root();
        let mut entries = HashMap::new();

        if let Some(root) = &root {
            std::fs::create_dir_all(root).map_err(|e| CacheError::io(root, e))?;
            let manifest_path = root.join(MANIFEST);
            if manifest_path.exists() {
                entries = load(root, &manifest_path)?;
            }
        }

        info!(key = %config.key(), assets = entries.len(), "asset cache opened");
        Ok(Self {
            config,
            root,
            entries: RwLock::new(entries),
        })
    }

    /// `name-version` of this cache.
    #[must_use]
    pub fn key(&self) -> String {
        self.config.key()
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Whether `path` is cached.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.entries.read().contains_key(path)
    }

    /// Number of cached assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Fetches every configured asset and stores them.
    ///
    /// All assets are fetched before anything is written: if one fetch
    /// fails, the cache is left exactly as it was.
    pub fn install(&self, fetcher: &dyn Fetcher) -> CacheResult<InstallReport> {
        let mut fetched = Vec::with_capacity(self.config.assets.len());
        for path in &self.config.assets {
            let body = fetcher.fetch(path)?;
            fetched.push((path.clone(), body));
        }

        let mut report = InstallReport::default();
        let mut staged = HashMap::with_capacity(fetched.len());
        for (path, body) in fetched {
            report.stored += 1;
            report.bytes += body.len();
            let entry = Entry {
                crc32: crc32fast::hash(&body),
                body: Arc::from(body),
            };
            staged.insert(path, entry);
        }

        let mut entries = self.entries.write();
        let mut merged = entries.clone();
        merged.extend(staged);
        if let Some(root) = &self.root {
            self.persist(root, &merged)?;
        }
        *entries = merged;

        info!(key = %self.key(), stored = report.stored, bytes = report.bytes, "assets installed");
        Ok(report)
    }

    /// Cache-first lookup with network fallback.
    ///
    /// A network response is returned but not stored.
    pub fn respond(&self, path: &str, fetcher: &dyn Fetcher) -> CacheResult<Response> {
        if let Some(entry) = self.entries.read().get(path) {
            debug!(path, "cache hit");
            return Ok(Response {
                path: path.to_string(),
                body: Arc::clone(&entry.body),
                source: Source::Cache,
            });
        }

        debug!(path, "cache miss, fetching");
        let body = fetcher.fetch(path)?;
        Ok(Response {
            path: path.to_string(),
            body: Arc::from(body),
            source: Source::Network,
        })
    }

    /// Deletes sibling caches with the same name and a different version.
    ///
    /// Returns the removed directories. A memory-only cache has nothing to purge.
    pub fn purge_stale(&self) -> CacheResult<Vec<PathBuf>> {
        let Some(parent) = &self.config.directory else {
            return Ok(Vec::new());
        };
        let prefix = format!("{}-", self.config.name);
        let current = self.key();
        let mut removed = Vec::new();

        let listing = std::fs::read_dir(parent).map_err(|e| CacheError::io(parent, e))?;
        for dirent in listing {
            let dirent = dirent.map_err(|e| CacheError::io(parent, e))?;
            let name = dirent.file_name().to_string_lossy().into_owned();
            let path = dirent.path();
            if name == current || !name.starts_with(&prefix) || !path.join(MANIFEST).exists() {
                continue;
            }
            std::fs::remove_dir_all(&path).map_err(|e| CacheError::io(&path, e))?;
            info!(cache = %name, "stale cache removed");
            removed.push(path);
        }
        Ok(removed)
    }

    fn persist(&self, root: &Path, entries: &HashMap<String, Entry>) -> CacheResult<()> {
        let mut manifest = Manifest {
            name: self.config.name.clone(),
            version: self.config.version.clone(),
            assets: Vec::with_capacity(entries.len()),
        };

        for (path, entry) in entries {
            let file = file_name(path);
            let target = root.join(&file);
            std::fs::write(&target, &entry.body).map_err(|e| CacheError::io(&target, e))?;
            manifest.assets.push(ManifestEntry {
                path: path.clone(),
                file,
                crc32: entry.crc32,
                len: entry.body.len(),
            });
        }
        manifest.assets.sort_by(|a, b| a.path.cmp(&b.path));

        // Manifest goes last so a crash mid-install leaves the old one in place
        let text = toml::to_string(&manifest)?;
        let tmp = root.join("manifest.toml.tmp");
        std::fs::write(&tmp, text).map_err(|e| CacheError::io(&tmp, e))?;
        let manifest_path = root.join(MANIFEST);
        std::fs::rename(&tmp, &manifest_path).map_err(|e| CacheError::io(&manifest_path, e))?;
        Ok(())
    }
}

fn load(root: &Path, manifest_path: &Path) -> CacheResult<HashMap<String, Entry>> {
    let text = std::fs::read_to_string(manifest_path).map_err(|e| CacheError::io(manifest_path, e))?;
    let manifest: Manifest = toml::from_str(&text)?;
    let mut entries = HashMap::with_capacity(manifest.assets.len());

    for asset in manifest.assets {
        let file = root.join(&asset.file);
        let body = match std::fs::read(&file) {
            Ok(body) => body,
            Err(e) => {
                warn!(path = %asset.path, error = %e, "cached asset missing, dropping");
                continue;
            }
        };
        let actual = crc32fast::hash(&body);
        if actual != asset.crc32 {
            let error = CacheError::Corrupt {
                path: asset.path.clone(),
                expected: asset.crc32,
                actual,
            };
            warn!(%error, "dropping cached asset");
            continue;
        }
        entries.insert(
            asset.path,
            Entry {
                body: Arc::from(body),
                crc32: actual,
            },
        );
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::MemoryFetcher;

    fn site() -> MemoryFetcher {
        MemoryFetcher::new()
            .with("/ffcts/index.html", "<html></html>")
            .with("/ffcts/particles.js", "render();")
            .with("/ffcts/other.css", "body {}")
    }

    #[test]
    fn test_memory_cache_first() {
        let cache = AssetCache::open(CacheConfig::default()).unwrap();
        let fetcher = site();
        cache.install(&fetcher).unwrap();
        assert_eq!(fetcher.requests(), 2);

        let hit = cache.respond("/ffcts/index.html", &fetcher).unwrap();
        assert_eq!(hit.source, Source::Cache);
        assert_eq!(&*hit.body, b"<html></html>");
        assert_eq!(fetcher.requests(), 2);

        let miss = cache.respond("/ffcts/other.css", &fetcher).unwrap();
        assert_eq!(miss.source, Source::Network);
        assert!(!cache.contains("/ffcts/other.css"));
    }

    #[test]
    fn test_install_is_all_or_nothing() {
        let cache = AssetCache::open(CacheConfig::default()).unwrap();
        let partial = MemoryFetcher::new().with("/ffcts/index.html", "x");

        assert!(matches!(cache.install(&partial), Err(CacheError::Fetch { .. })));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_file_names_are_distinct() {
        assert_ne!(file_name("/a/b_c"), file_name("/a_b/c"));
        assert!(file_name("/ffcts/").ends_with("-index"));
    }
}
