//! # Application Error Types
//!
//! Everything the binaries can fail with, wrapping the library errors.

use std::path::PathBuf;

use ffcts_cache::CacheError;
use ffcts_core::CoreError;
use ffcts_rendering::RenderError;
use thiserror::Error;

/// Errors surfaced by the engine and the binaries.
#[derive(Error, Debug)]
pub enum AppError {
    /// Simulation configuration or state error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Surface or presenter error, including missing graphics capability.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Offline cache error.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Config file is not valid TOML for [`crate::AppConfig`].
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A configuration value is out of range.
    #[error("invalid config `{field}`: {reason}")]
    InvalidConfig {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// Reading a file failed.
    #[error("cannot read {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Window system failure.
    #[error("window error: {0}")]
    Window(String),
}

impl AppError {
    /// True when the failure means "no graphics here", as opposed to a bug
    /// or a bad config.
    #[must_use]
    pub fn is_capability_unavailable(&self) -> bool {
        matches!(self, Self::Render(RenderError::CapabilityUnavailable(_)))
    }
}

/// Result type for application code.
pub type AppResult<T> = Result<T, AppError>;
