//! The particle record.
//!
//! Common fields live in a fixed struct. Everything effect-specific (orbit
//! angle, phase offsets, base positions, gravity constants) lives inside
//! the particle's [`MotionRule`], captured when the generator builds it.

use std::fmt;

use crate::error::MotionError;
use crate::motion::{MotionContext, MotionRule};

/// Edge length in pixels for particles that don't pick their own size.
pub const DEFAULT_SIZE: f32 = 4.0;

/// Base color with an optional authoritative alpha channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red, green, blue in `[0, 1]`.
    pub rgb: [f32; 3],
    /// When set, used as the display alpha instead of the particle's life.
    pub alpha: Option<f32>,
}

impl Color {
    /// Three-channel color; alpha derives from life.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self {
            rgb: [r, g, b],
            alpha: None,
        }
    }

    /// Four-channel color; the motion rule owns the alpha.
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            rgb: [r, g, b],
            alpha: Some(a),
        }
    }

    /// Same RGB with an explicit alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self {
            rgb: self.rgb,
            alpha: Some(a),
        }
    }
}

impl From<[f32; 3]> for Color {
    fn from([r, g, b]: [f32; 3]) -> Self {
        Self::rgb(r, g, b)
    }
}

/// One live visual element.
pub struct Particle {
    /// Normalized device position.
    pub position: [f32; 2],
    /// Per-frame displacement in normalized units.
    pub velocity: [f32; 2],
    /// Remaining life; doubles as alpha when the color has no alpha channel.
    pub life: f32,
    /// Per-particle override of the default fade rate.
    pub fade_speed: Option<f32>,
    /// Base color.
    pub color: Color,
    /// Edge length of the rendered square, pixels.
    pub size: f32,
    motion: Option<Box<dyn MotionRule>>,
}

impl Particle {
    /// A white particle at `position` moving by `velocity` each frame, full life.
    #[must_use]
    pub fn new(position: [f32; 2], velocity: [f32; 2]) -> Self {
        Self {
            position,
            velocity,
            life: 1.0,
            fade_speed: None,
            color: Color::rgb(1.0, 1.0, 1.0),
            size: DEFAULT_SIZE,
            motion: None,
        }
    }

    /// Sets the starting life.
    #[must_use]
    pub fn with_life(mut self, life: f32) -> Self {
        self.life = life;
        self
    }

    /// Overrides the default fade rate for this particle.
    #[must_use]
    pub fn with_fade_speed(mut self, fade_speed: f32) -> Self {
        self.fade_speed = Some(fade_speed);
        self
    }

    /// Sets the base color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    /// Sets the rendered edge length in pixels.
    #[must_use]
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Replaces default linear motion with `rule`.
    #[must_use]
    pub fn with_motion(mut self, rule: impl MotionRule + 'static) -> Self {
        self.motion = Some(Box::new(rule));
        self
    }

    /// Whether a custom motion rule is attached.
    #[must_use]
    pub fn has_motion(&self) -> bool {
        self.motion.is_some()
    }

    /// Name of the attached motion rule, for logs.
    #[must_use]
    pub fn motion_name(&self) -> &'static str {
        self.motion.as_ref().map_or("linear", |rule| rule.name())
    }

    /// Life decrement this particle uses when none of its own is set.
    #[must_use]
    pub fn fade_or(&self, default_fade_rate: f32) -> f32 {
        self.fade_speed.unwrap_or(default_fade_rate)
    }

    /// Runs one frame of motion: the custom rule if present, else `position += velocity`.
    ///
    /// # Errors
    ///
    /// Propagates the rule's own error, or [`MotionError::NonFinite`] if the
    /// rule left position, velocity or size at NaN/infinity.
    pub fn advance(&mut self, ctx: &mut MotionContext<'_>) -> Result<(), MotionError> {
        match self.motion.take() {
            Some(mut rule) => {
                let result = rule.advance(self, ctx);
                self.motion = Some(rule);
                result?;
                self.check_finite()
            }
            None => {
                self.position[0] += self.velocity[0];
                self.position[1] += self.velocity[1];
                Ok(())
            }
        }
    }

    fn check_finite(&self) -> Result<(), MotionError> {
        if !self.position.iter().all(|v| v.is_finite()) {
            return Err(MotionError::NonFinite { field: "position" });
        }
        if !self.velocity.iter().all(|v| v.is_finite()) {
            return Err(MotionError::NonFinite { field: "velocity" });
        }
        if !self.size.is_finite() {
            return Err(MotionError::NonFinite { field: "size" });
        }
        Ok(())
    }
}

impl fmt::Debug for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Particle")
            .field("position", &self.position)
            .field("velocity", &self.velocity)
            .field("life", &self.life)
            .field("fade_speed", &self.fade_speed)
            .field("color", &self.color)
            .field("size", &self.size)
            .field("motion", &self.motion_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeded_rng;

    #[derive(Debug)]
    struct Poison;

    impl MotionRule for Poison {
        fn name(&self) -> &'static str {
            "poison"
        }

        fn advance(&mut self, p: &mut Particle, _ctx: &mut MotionContext<'_>) -> Result<(), MotionError> {
            p.position[0] = f32::NAN;
            Ok(())
        }
    }

    #[test]
    fn test_linear_motion_without_rule() {
        let mut rng = seeded_rng(1);
        let mut ctx = MotionContext::new(0.0, 0, &mut rng);
        let mut p = Particle::new([0.0, 0.0], [0.1, -0.2]);
        p.advance(&mut ctx).unwrap();
        assert_eq!(p.position, [0.1, -0.2]);
        assert_eq!(p.motion_name(), "linear");
    }

    #[test]
    fn test_non_finite_rule_output_is_rejected() {
        let mut rng = seeded_rng(1);
        let mut ctx = MotionContext::new(0.0, 0, &mut rng);
        let mut p = Particle::new([0.0, 0.0], [0.0, 0.0]).with_motion(Poison);
        let err = p.advance(&mut ctx).unwrap_err();
        assert_eq!(err, MotionError::NonFinite { field: "position" });
        // The rule is put back even when it fails
        assert!(p.has_motion());
    }

    #[test]
    fn test_builder_sets_fields() {
        let p = Particle::new([0.5, 0.5], [0.0, 0.0])
            .with_life(0.5)
            .with_fade_speed(0.005)
            .with_color([1.0, 0.0, 0.0])
            .with_size(3.0);
        assert!((p.fade_or(0.003) - 0.005).abs() < f32::EPSILON);
        assert_eq!(p.color, Color::rgb(1.0, 0.0, 0.0));
        assert!((p.size - 3.0).abs() < f32::EPSILON);
    }
}
