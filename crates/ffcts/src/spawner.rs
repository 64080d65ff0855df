//! # Spawn Timer
//!
//! Periodically picks the next effect and the point it appears at. The
//! spawn origin lives here and nowhere else; the engine receives it as a
//! parameter on each generator call.

use std::time::Duration;

use ffcts_effects::{EffectKind, SpawnOrigin};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Phase step of the origin path per firing, in radians.
const ORIGIN_STEP: f32 = 0.35;

/// `[spawner]` section of the app config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    /// Whether the timer runs at all.
    pub enabled: bool,
    /// Milliseconds between firings.
    pub interval_ms: u64,
    /// Effects fired in turn.
    pub effects: Vec<EffectKind>,
    /// Move the spawn point along a Lissajous path instead of letting each
    /// effect pick a random point.
    pub moving_origin: bool,
    /// Half-extent of the origin path in normalized units.
    pub origin_drift: f32,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: 1500,
            effects: vec![
                EffectKind::OrangeBurst,
                EffectKind::GreenTrail,
                EffectKind::BlueRain,
                EffectKind::RedExplode,
                EffectKind::Fire,
            ],
            moving_origin: true,
            origin_drift: 0.6,
        }
    }
}

impl SpawnerConfig {
    /// Time between firings.
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Rejects a zero interval, an empty effect list and a drift outside `[0, 1]`.
    pub fn validate(&self) -> AppResult<()> {
        if self.interval_ms == 0 {
            return Err(AppError::InvalidConfig {
                field: "spawner.interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.effects.is_empty() {
            return Err(AppError::InvalidConfig {
                field: "spawner.effects",
                reason: "needs at least one effect".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.origin_drift) {
            return Err(AppError::InvalidConfig {
                field: "spawner.origin_drift",
                reason: format!("must be within [0, 1], got {}", self.origin_drift),
            });
        }
        Ok(())
    }
}

/// Cycles through the configured effects and moves the spawn origin.
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    effects: Vec<EffectKind>,
    next: usize,
    moving: bool,
    drift: f32,
    phase: f32,
    fired: u64,
}

impl SpawnTimer {
    /// Creates a timer from a config section.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidConfig`] when the section does not validate.
    pub fn new(config: &SpawnerConfig) -> AppResult<Self> {
        config.validate()?;
        Ok(Self {
            effects: config.effects.clone(),
            next: 0,
            moving: config.moving_origin,
            drift: config.origin_drift,
            phase: 0.0,
            fired: 0,
        })
    }

    /// The effect the next firing will spawn.
    #[must_use]
    pub fn current(&self) -> EffectKind {
        self.effects[self.next]
    }

    /// Where the next firing will spawn.
    #[must_use]
    pub fn origin(&self) -> SpawnOrigin {
        if !self.moving {
            return SpawnOrigin::random();
        }
        let d = self.drift;
        SpawnOrigin::at(d * (3.0 * self.phase).sin(), d * (2.0 * self.phase).sin())
    }

    /// Firings so far.
    #[must_use]
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Returns the effect and origin for this firing and advances both.
    pub fn fire(&mut self) -> (EffectKind, SpawnOrigin) {
        let shot = (self.current(), self.origin());
        self.next = (self.next + 1) % self.effects.len();
        self.phase = (self.phase + ORIGIN_STEP) % std::f32::consts::TAU;
        self.fired += 1;
        shot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycles_through_effects() {
        let config = SpawnerConfig {
            effects: vec![EffectKind::Nova, EffectKind::Snow],
            ..SpawnerConfig::default()
        };
        let mut timer = SpawnTimer::new(&config).unwrap();
        let fired: Vec<_> = (0..5).map(|_| timer.fire().0).collect();
        assert_eq!(
            fired,
            [EffectKind::Nova, EffectKind::Snow, EffectKind::Nova, EffectKind::Snow, EffectKind::Nova]
        );
        assert_eq!(timer.fired(), 5);
    }

    #[test]
    fn test_origin_moves_inside_drift_box() {
        let mut timer = SpawnTimer::new(&SpawnerConfig::default()).unwrap();
        let mut seen = Vec::new();
        for _ in 0..100 {
            let (_, origin) = timer.fire();
            let [x, y] = origin.center.unwrap();
            assert!(x.abs() <= 0.6 + 1e-6 && y.abs() <= 0.6 + 1e-6);
            seen.push([x, y]);
        }
        seen.dedup();
        assert!(seen.len() > 50);
    }

    #[test]
    fn test_fixed_origin_off_means_random() {
        let config = SpawnerConfig {
            moving_origin: false,
            ..SpawnerConfig::default()
        };
        let mut timer = SpawnTimer::new(&config).unwrap();
        assert_eq!(timer.fire().1, SpawnOrigin::random());
    }

    #[test]
    fn test_validation() {
        let empty = SpawnerConfig {
            effects: Vec::new(),
            ..SpawnerConfig::default()
        };
        assert!(SpawnTimer::new(&empty).is_err());

        let zero = SpawnerConfig {
            interval_ms: 0,
            ..SpawnerConfig::default()
        };
        assert!(zero.validate().is_err());

        let wide = SpawnerConfig {
            origin_drift: 1.5,
            ..SpawnerConfig::default()
        };
        assert!(wide.validate().is_err());
    }
}
