//! Motion rules shared across families.

use ffcts_core::{MotionContext, MotionError, MotionRule, Particle};

/// Constant downward pull: `vy -= g`, then linear motion.
///
/// A negative `g` gives buoyancy.
#[derive(Debug, Clone, Copy)]
pub struct Gravity {
    /// Per-frame change of vertical velocity.
    pub g: f32,
}

impl MotionRule for Gravity {
    fn name(&self) -> &'static str {
        "gravity"
    }

    fn advance(&mut self, p: &mut Particle, _ctx: &mut MotionContext<'_>) -> Result<(), MotionError> {
        p.velocity[1] -= self.g;
        p.position[0] += p.velocity[0];
        p.position[1] += p.velocity[1];
        Ok(())
    }
}

/// Velocity decays by `factor` each frame.
#[derive(Debug, Clone, Copy)]
pub struct Drag {
    /// Multiplier applied to velocity every frame, in `(0, 1]`.
    pub factor: f32,
}

impl MotionRule for Drag {
    fn name(&self) -> &'static str {
        "drag"
    }

    fn advance(&mut self, p: &mut Particle, _ctx: &mut MotionContext<'_>) -> Result<(), MotionError> {
        p.velocity[0] *= self.factor;
        p.velocity[1] *= self.factor;
        p.position[0] += p.velocity[0];
        p.position[1] += p.velocity[1];
        Ok(())
    }
}

/// Gravity with air drag.
#[derive(Debug, Clone, Copy)]
pub struct Ballistic {
    /// Per-frame change of vertical velocity.
    pub g: f32,
    /// Velocity multiplier per frame.
    pub drag: f32,
}

impl MotionRule for Ballistic {
    fn name(&self) -> &'static str {
        "ballistic"
    }

    fn advance(&mut self, p: &mut Particle, _ctx: &mut MotionContext<'_>) -> Result<(), MotionError> {
        p.velocity[0] *= self.drag;
        p.velocity[1] = p.velocity[1] * self.drag - self.g;
        p.position[0] += p.velocity[0];
        p.position[1] += p.velocity[1];
        Ok(())
    }
}
