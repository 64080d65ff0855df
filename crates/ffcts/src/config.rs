//! # Application Configuration
//!
//! One TOML file, one table per concern. Every table is optional.
//!
//! ```toml
//! [window]
//! title = "ffcts"
//! width = 1280
//! height = 720
//!
//! [simulation]
//! default_fade_rate = 0.003
//! seed = 42
//!
//! [render]
//! background = [0.0, 0.0, 0.0, 1.0]
//! blend = "replace"
//!
//! [spawner]
//! interval_ms = 1500
//! effects = ["orange_burst", "galaxy"]
//!
//! [cache]
//! version = "v2.4"
//! directory = "/var/cache/ffcts"
//! ```

use std::path::Path;

use ffcts_cache::CacheConfig;
use ffcts_core::SimulationConfig;
use ffcts_rendering::RenderConfig;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::spawner::SpawnerConfig;

/// `[window]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title.
    pub title: String,
    /// Initial surface width in pixels.
    pub width: u32,
    /// Initial surface height in pixels.
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "ffcts".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// The whole config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Window and surface size.
    pub window: WindowConfig,
    /// Simulation step.
    pub simulation: SimulationConfig,
    /// Renderer.
    pub render: RenderConfig,
    /// Spawn timer.
    pub spawner: SpawnerConfig,
    /// Offline asset cache.
    pub cache: CacheConfig,
}

impl AppConfig {
    /// Reads and validates a config file.
    ///
    /// # Errors
    ///
    /// I/O, parse and validation failures.
    pub fn load(path: &Path) -> AppResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// [`load`](Self::load) when a path is given, defaults otherwise.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_or_default(path: Option<&Path>) -> AppResult<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Parses and validates a config document.
    ///
    /// # Errors
    ///
    /// Parse and validation failures.
    pub fn from_toml_str(text: &str) -> AppResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// The first section that fails.
    pub fn validate(&self) -> AppResult<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(AppError::InvalidConfig {
                field: "window",
                reason: format!("{}x{} has no pixels", self.window.width, self.window.height),
            });
        }
        self.simulation.validate()?;
        self.render.validate()?;
        self.spawner.validate()?;
        self.cache.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffcts_effects::EffectKind;
    use ffcts_rendering::BlendMode;

    #[test]
    fn test_empty_file_is_all_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.cache.key(), "pwa-cache-v2.4");
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::from_toml_str(
            r#"
            [simulation]
            seed = 7

            [render]
            blend = "source_over"

            [spawner]
            effects = ["galaxy", "matrix_rain"]
            "#,
        )
        .unwrap();

        assert_eq!(config.simulation.seed, 7);
        assert!((config.simulation.default_fade_rate - 0.003).abs() < f32::EPSILON);
        assert_eq!(config.render.blend, BlendMode::SourceOver);
        assert_eq!(config.spawner.effects, [EffectKind::Galaxy, EffectKind::MatrixRain]);
        assert_eq!(config.spawner.interval_ms, 1500);
    }

    #[test]
    fn test_unknown_effect_is_a_parse_error() {
        let result = AppConfig::from_toml_str("[spawner]\neffects = [\"warp\"]\n");
        assert!(matches!(result, Err(AppError::ConfigParse(_))));
    }

    #[test]
    fn test_invalid_sections_are_rejected() {
        for text in [
            "[window]\nwidth = 0\n",
            "[simulation]\ndefault_fade_rate = 0.0\n",
            "[spawner]\ninterval_ms = 0\n",
            "[cache]\nname = \"\"\n",
        ] {
            assert!(AppConfig::from_toml_str(text).is_err(), "{text}");
        }
    }

    #[test]
    fn test_load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("ffcts.toml");
        assert!(matches!(AppConfig::load(&missing), Err(AppError::Io { .. })));
    }
}
