//! Rendering errors.

use thiserror::Error;

/// Errors raised by surfaces and presenters.
#[derive(Debug, Error)]
pub enum RenderError {
    /// No usable graphics context. The frame loop must not start.
    #[error("graphics capability unavailable: {0}")]
    CapabilityUnavailable(String),

    /// A configuration value is out of range.
    #[error("invalid render config `{field}`: {reason}")]
    InvalidConfig {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// Presenting a frame failed in a way that will not fix itself.
    #[error("present failed: {0}")]
    Present(String),
}

/// Result alias for rendering.
pub type RenderResult<T> = Result<T, RenderError>;
