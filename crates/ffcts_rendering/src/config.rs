//! Renderer configuration.

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

/// How a particle rectangle combines with what is already in the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Overwrite the rectangle with the particle color, alpha included.
    /// This is what a scissored clear does.
    #[default]
    Replace,
    /// Straight-alpha source-over.
    SourceOver,
}

/// Renderer settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Color the whole surface is cleared to at the start of each frame.
    pub background: [f32; 4],
    /// Particle compositing mode.
    pub blend: BlendMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: [0.0, 0.0, 0.0, 1.0],
            blend: BlendMode::Replace,
        }
    }
}

impl RenderConfig {
    /// Rejects background channels outside `[0, 1]`.
    pub fn validate(&self) -> RenderResult<()> {
        if self.background.iter().any(|c| !c.is_finite() || !(0.0..=1.0).contains(c)) {
            return Err(RenderError::InvalidConfig {
                field: "background",
                reason: format!("channels must be in [0, 1], got {:?}", self.background),
            });
        }
        Ok(())
    }
}
