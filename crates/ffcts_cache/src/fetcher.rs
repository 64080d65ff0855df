//! # Fetchers
//!
//! The "network" side of the cache. A [`Fetcher`] turns an absolute asset
//! path into bytes or an error; the cache never cares how.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{CacheError, CacheResult};

/// Source of asset bytes when the cache misses.
pub trait Fetcher: Send + Sync {
    /// Fetches the asset at `path` (absolute, `/`-separated).
    fn fetch(&self, path: &str) -> CacheResult<Vec<u8>>;
}

/// Serves files from a local directory, `/a/b.js` -> `root/a/b.js`.
#[derive(Debug, Clone)]
pub struct DirectoryFetcher {
    root: PathBuf,
}

impl DirectoryFetcher {
    /// Serves files below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Maps an asset path onto the filesystem. Refuses anything that would
    /// leave the root.
    fn resolve(&self, path: &str) -> CacheResult<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative.as_os_str().is_empty()
            || relative.components().any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(CacheError::Fetch {
                path: path.to_string(),
                reason: "path escapes the served directory".to_string(),
            });
        }
        Ok(self.root.join(relative))
    }
}

impl Fetcher for DirectoryFetcher {
    fn fetch(&self, path: &str) -> CacheResult<Vec<u8>> {
        let file = self.resolve(path)?;
        std::fs::read(&file).map_err(|e| CacheError::Fetch {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }
}

/// In-memory fetcher that counts how often it is asked.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    assets: HashMap<String, Vec<u8>>,
    requests: AtomicUsize,
}

impl MemoryFetcher {
    /// Empty fetcher; every request fails.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an asset.
    #[must_use]
    pub fn with(mut self, path: &str, body: impl Into<Vec<u8>>) -> Self {
        self.assets.insert(path.to_string(), body.into());
        self
    }

    /// Number of `fetch` calls so far.
    #[must_use]
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }
}

impl Fetcher for MemoryFetcher {
    fn fetch(&self, path: &str) -> CacheResult<Vec<u8>> {
        self.requests.fetch_add(1, Ordering::Relaxed);
        self.assets.get(path).cloned().ok_or_else(|| CacheError::Fetch {
            path: path.to_string(),
            reason: "not found".to_string(),
        })
    }
}
