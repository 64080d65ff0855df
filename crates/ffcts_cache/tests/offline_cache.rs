//! # Offline Cache
//!
//! Disk-backed behaviour: reopen, version bump, purge, corruption.

use std::path::Path;

use ffcts_cache::{AssetCache, CacheConfig, DirectoryFetcher, Fetcher, MemoryFetcher, Source};

fn config(dir: &Path, version: &str) -> CacheConfig {
    CacheConfig {
        version: version.to_string(),
        directory: Some(dir.to_path_buf()),
        ..CacheConfig::default()
    }
}

fn site() -> MemoryFetcher {
    MemoryFetcher::new()
        .with("/ffcts/index.html", "<html>v1</html>")
        .with("/ffcts/particles.js", "particles();")
}

/// Test: installed assets survive a reopen and are served without the network.
#[test]
fn test_reopen_serves_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let cache = AssetCache::open(config(dir.path(), "v2.4")).unwrap();
    let report = cache.install(&site()).unwrap();
    assert_eq!(report.stored, 2);
    drop(cache);

    let reopened = AssetCache::open(config(dir.path(), "v2.4")).unwrap();
    assert_eq!(reopened.len(), 2);

    let offline = MemoryFetcher::new();
    let response = reopened.respond("/ffcts/particles.js", &offline).unwrap();
    assert_eq!(response.source, Source::Cache);
    assert_eq!(&*response.body, b"particles();");
    assert_eq!(offline.requests(), 0);
}

/// Test: a new version starts empty, and purging removes only the old one.
#[test]
fn test_version_bump_and_purge() {
    let dir = tempfile::tempdir().unwrap();
    AssetCache::open(config(dir.path(), "v2.3")).unwrap().install(&site()).unwrap();
    std::fs::create_dir_all(dir.path().join("unrelated")).unwrap();

    let current = AssetCache::open(config(dir.path(), "v2.4")).unwrap();
    assert!(current.is_empty());
    current.install(&site()).unwrap();

    let removed = current.purge_stale().unwrap();
    assert_eq!(removed, vec![dir.path().join("pwa-cache-v2.3")]);
    assert!(dir.path().join("pwa-cache-v2.4").exists());
    assert!(dir.path().join("unrelated").exists());
}

/// Test: an asset whose bytes changed on disk is dropped on open.
#[test]
fn test_corrupt_asset_is_dropped() {
    let dir = tempfile::tempdir().unwrap();
    AssetCache::open(config(dir.path(), "v2.4")).unwrap().install(&site()).unwrap();

    let root = dir.path().join("pwa-cache-v2.4");
    let victim = std::fs::read_dir(&root)
        .unwrap()
        .map(|e| e.unwrap().path())
        .find(|p| p.to_string_lossy().ends_with("-index.html"))
        .unwrap();
    std::fs::write(&victim, b"tampered").unwrap();

    let reopened = AssetCache::open(config(dir.path(), "v2.4")).unwrap();
    assert!(!reopened.contains("/ffcts/index.html"));
    assert!(reopened.contains("/ffcts/particles.js"));
}

/// Test: installing from a served directory, then serving offline.
#[test]
fn test_directory_fetcher_install() {
    let site = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(site.path().join("ffcts")).unwrap();
    std::fs::write(site.path().join("ffcts/index.html"), b"index").unwrap();
    std::fs::write(site.path().join("ffcts/particles.js"), b"js").unwrap();
    let network = DirectoryFetcher::new(site.path());
    assert_eq!(network.fetch("/ffcts/index.html").unwrap(), b"index");

    let cache_dir = tempfile::tempdir().unwrap();
    let cache = AssetCache::open(config(cache_dir.path(), "v2.4")).unwrap();
    let report = cache.install(&network).unwrap();
    assert_eq!(report.bytes, 7);

    drop(site);
    let response = cache.respond("/ffcts/index.html", &network).unwrap();
    assert_eq!(response.source, Source::Cache);
}
