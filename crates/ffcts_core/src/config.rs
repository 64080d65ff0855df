//! # Simulation Configuration
//!
//! Loaded once at startup from the `[simulation]` table of the app config.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Default life decrement per frame for particles without their own fade speed.
pub const DEFAULT_FADE_RATE: f32 = 0.003;

/// Configuration for the simulation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Life decrement applied when a particle carries no `fade_speed`.
    pub default_fade_rate: f32,
    /// Seed for the generator and motion-rule RNGs.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            default_fade_rate: DEFAULT_FADE_RATE,
            seed: 0x00FF_C75E,
        }
    }
}

impl SimulationConfig {
    /// Parses a standalone `[simulation]`-shaped TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigParse`] on malformed TOML and
    /// [`CoreError::InvalidConfig`] when a value is out of range.
    pub fn from_toml_str(text: &str) -> CoreResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable by the simulation step.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] for a non-finite or
    /// non-positive default fade rate.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.default_fade_rate.is_finite() || self.default_fade_rate <= 0.0 {
            return Err(CoreError::InvalidConfig {
                field: "simulation.default_fade_rate",
                reason: format!("must be finite and > 0, got {}", self.default_fade_rate),
            });
        }
        Ok(())
    }
}
