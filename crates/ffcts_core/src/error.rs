//! # Core Error Types
//!
//! Errors raised by configuration loading and by motion rules.

use thiserror::Error;

/// Errors that can occur in the core crate.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A configuration value is out of its valid range.
    #[error("invalid configuration: {field}: {reason}")]
    InvalidConfig {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The configuration text could not be parsed.
    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Failure of a single particle's motion rule.
///
/// The simulation step drops the particle that produced it and keeps going.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    /// The rule left a field at NaN or infinity.
    #[error("motion rule produced a non-finite {field}")]
    NonFinite {
        /// Which particle field went non-finite.
        field: &'static str,
    },

    /// The rule rejected its own state.
    #[error("motion rule failed: {0}")]
    Rule(String),
}
