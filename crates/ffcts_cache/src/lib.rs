//! # FFCTS Cache
//!
//! Keeps the web front-end's assets available offline.
//!
//! The cache is versioned: `name-version` is the key, so bumping the version
//! starts from an empty cache and leaves the old one for
//! [`AssetCache::purge_stale`]. Lookups are cache-first with a fallback to
//! the [`Fetcher`]; fallback responses are not stored.

#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod fetcher;
pub mod store;
pub mod worker;

pub use config::CacheConfig;
pub use error::{CacheError, CacheResult};
pub use fetcher::{DirectoryFetcher, Fetcher, MemoryFetcher};
pub use store::{AssetCache, InstallReport, Response, Source};
pub use worker::CacheWorker;
