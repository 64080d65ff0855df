//! # Cache Error Types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the asset cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Filesystem failure.
    #[error("i/o error at {path}: {source}")]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The network (fetcher) could not supply an asset.
    #[error("fetch of `{path}` failed: {reason}")]
    Fetch {
        /// Requested asset path.
        path: String,
        /// Why it failed.
        reason: String,
    },

    /// Stored bytes do not match their recorded checksum.
    #[error("checksum mismatch for `{path}`: expected {expected:08x}, got {actual:08x}")]
    Corrupt {
        /// Asset path.
        path: String,
        /// CRC32 from the manifest.
        expected: u32,
        /// CRC32 of the bytes on disk.
        actual: u32,
    },

    /// Manifest could not be parsed.
    #[error("bad manifest: {0}")]
    ManifestParse(#[from] toml::de::Error),

    /// Manifest could not be written.
    #[error("manifest serialization failed: {0}")]
    ManifestWrite(#[from] toml::ser::Error),

    /// A configuration value is out of range.
    #[error("invalid cache config `{field}`: {reason}")]
    InvalidConfig {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The worker thread could not be started.
    #[error("failed to start cache worker: {0}")]
    Spawn(#[source] std::io::Error),

    /// The background worker has shut down.
    #[error("cache worker is not running")]
    WorkerGone,
}

impl CacheError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
