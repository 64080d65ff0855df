//! # Orbital & Spiral Effects
//!
//! Particles that track an angle around a center. The position is
//! recomputed from `(center, angle, radius)` every frame rather than
//! accumulated from velocity, so orbits never drift apart from rounding.

use ffcts_core::{MotionContext, MotionError, MotionRule, Particle};
use rand::Rng;

use crate::context::SpawnContext;
use crate::palette;

/// Parametric orbit around a (possibly moving) center.
#[derive(Debug, Clone, Copy)]
pub struct Orbit {
    /// Orbit center.
    pub center: [f32; 2],
    /// Center displacement per frame.
    pub center_drift: [f32; 2],
    /// Current angle in radians.
    pub angle: f32,
    /// Angle advance per frame.
    pub angular_speed: f32,
    /// Current radius.
    pub radius: f32,
    /// Radius change per frame; negative spirals inward.
    pub radius_rate: f32,
    /// Radius clamp.
    pub radius_limits: (f32, f32),
    /// Random radial jitter per frame.
    pub jitter: f32,
    /// Aspect ratio captured at spawn time.
    pub aspect: f32,
}

impl Orbit {
    /// Circular orbit with no drift, growth or jitter.
    #[must_use]
    pub fn circle(center: [f32; 2], angle: f32, radius: f32, angular_speed: f32, aspect: f32) -> Self {
        Self {
            center,
            center_drift: [0.0, 0.0],
            angle,
            angular_speed,
            radius,
            radius_rate: 0.0,
            radius_limits: (0.0, f32::MAX),
            jitter: 0.0,
            aspect,
        }
    }

    /// Position on the orbit for the current angle and radius.
    #[must_use]
    pub fn position(&self) -> [f32; 2] {
        [
            self.center[0] + self.angle.cos() * self.radius / self.aspect,
            self.center[1] + self.angle.sin() * self.radius,
        ]
    }
}

impl MotionRule for Orbit {
    fn name(&self) -> &'static str {
        "orbit"
    }

    fn advance(&mut self, p: &mut Particle, ctx: &mut MotionContext<'_>) -> Result<(), MotionError> {
        self.center[0] += self.center_drift[0];
        self.center[1] += self.center_drift[1];
        self.angle += self.angular_speed;

        let noise = if self.jitter > 0.0 {
            ctx.rng.gen_range(-self.jitter..self.jitter)
        } else {
            0.0
        };
        let (lo, hi) = self.radius_limits;
        self.radius = (self.radius + self.radius_rate + noise).clamp(lo, hi);

        let next = self.position();
        p.velocity = [next[0] - p.position[0], next[1] - p.position[1]];
        p.position = next;
        Ok(())
    }
}

fn orbiting(rule: Orbit) -> Particle {
    Particle::new(rule.position(), [0.0, 0.0]).with_motion(rule)
}

/// A dense ball of charge spinning around a point.
pub fn energy_ball(ctx: &mut SpawnContext<'_>) -> usize {
    const COUNT: usize = 120;

    let center = ctx.point();
    let aspect = ctx.aspect();
    for _ in 0..COUNT {
        let color = ctx.pick(&palette::ENERGY);
        let direction = ctx.sign();
        let rule = Orbit::circle(
            center,
            ctx.angle(),
            ctx.uniform(0.05, 0.2),
            direction * ctx.uniform(0.05, 0.1),
            aspect,
        );
        let size = ctx.uniform(2.0, 4.0);
        ctx.emit(orbiting(rule).with_color(color).with_size(size).with_fade_speed(0.004));
    }
    COUNT
}

/// Bees buzzing around a hive that wanders across the screen.
pub fn bee_swarm(ctx: &mut SpawnContext<'_>) -> usize {
    const COUNT: usize = 50;

    let center = ctx.point();
    let aspect = ctx.aspect();
    let heading = ctx.angle();
    let drift = [heading.cos() * 0.0015 / aspect, heading.sin() * 0.0015];
    for _ in 0..COUNT {
        let color = ctx.pick(&palette::BEE);
        let direction = ctx.sign();
        let rule = Orbit {
            center,
            center_drift: drift,
            angle: ctx.angle(),
            angular_speed: direction * ctx.uniform(0.08, 0.15),
            radius: ctx.uniform(0.05, 0.15),
            radius_rate: 0.0,
            radius_limits: (0.03, 0.2),
            jitter: 0.006,
            aspect,
        };
        ctx.emit(orbiting(rule).with_color(color).with_size(3.0).with_fade_speed(0.003));
    }
    COUNT
}

/// Tiny fast orbits scattered across the whole surface.
pub fn micro_orbit(ctx: &mut SpawnContext<'_>) -> usize {
    const COUNT: usize = 60;

    let aspect = ctx.aspect();
    for _ in 0..COUNT {
        let color = ctx.pick(&palette::MICRO);
        let center = [ctx.signed(), ctx.signed()];
        let direction = ctx.sign();
        let rule = Orbit::circle(
            center,
            ctx.angle(),
            ctx.uniform(0.005, 0.02),
            direction * ctx.uniform(0.2, 0.3),
            aspect,
        );
        ctx.emit(orbiting(rule).with_color(color).with_size(2.0).with_fade_speed(0.004));
    }
    COUNT
}

/// A ribbon unwinding outward from a point.
pub fn solar_flare(ctx: &mut SpawnContext<'_>) -> usize {
    const COUNT: usize = 100;

    let center = ctx.point();
    let aspect = ctx.aspect();
    let base = ctx.angle();
    let direction = ctx.sign();
    for i in 0..COUNT {
        let color = ctx.pick(&palette::SOLAR);
        let t = i as f32;
        let rule = Orbit {
            center,
            center_drift: [0.0, 0.0],
            angle: base + direction * t * 0.03,
            angular_speed: direction * 0.03,
            radius: 0.02 + t * 0.002,
            radius_rate: 0.0015,
            radius_limits: (0.0, 2.0),
            jitter: 0.0,
            aspect,
        };
        let size = ctx.uniform(3.0, 5.0);
        ctx.emit(orbiting(rule).with_color(color).with_size(size).with_fade_speed(0.005));
    }
    COUNT
}

/// Three spiral arms with differential rotation.
pub fn galaxy(ctx: &mut SpawnContext<'_>) -> usize {
    const COUNT: usize = 150;
    const ARMS: u32 = 3;

    let center = ctx.point();
    let aspect = ctx.aspect();
    for _ in 0..COUNT {
        let color = ctx.pick(&palette::GALAXY);
        let arm = ctx.index(ARMS);
        let radius = ctx.uniform(0.02, 0.5);
        let angle = arm as f32 / ARMS as f32 * std::f32::consts::TAU + radius * 4.0 + ctx.signed() * 0.15;
        // Inner stars turn faster
        let rule = Orbit::circle(center, angle, radius, 0.02 / (radius + 0.1), aspect);
        let size = ctx.uniform(2.0, 3.5);
        ctx.emit(orbiting(rule).with_color(color).with_size(size).with_fade_speed(0.0025));
    }
    COUNT
}

/// A ring collapsing inward while it spins.
pub fn vortex(ctx: &mut SpawnContext<'_>) -> usize {
    const COUNT: usize = 120;

    let center = ctx.point();
    let aspect = ctx.aspect();
    let direction = ctx.sign();
    for _ in 0..COUNT {
        let color = ctx.pick(&palette::VORTEX);
        let rule = Orbit {
            center,
            center_drift: [0.0, 0.0],
            angle: ctx.angle(),
            angular_speed: direction * 0.04,
            radius: ctx.uniform(0.6, 0.8),
            radius_rate: -0.002,
            radius_limits: (0.02, 1.0),
            jitter: 0.0,
            aspect,
        };
        ctx.emit(orbiting(rule).with_color(color).with_size(3.0).with_fade_speed(0.004));
    }
    COUNT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SpawnOrigin;
    use ffcts_core::{seeded_rng, ParticleField, SimulationConfig, Viewport};

    fn distance(p: &Particle, center: [f32; 2], aspect: f32) -> f32 {
        ((p.position[0] - center[0]) * aspect).hypot(p.position[1] - center[1])
    }

    #[test]
    fn test_orbit_keeps_radius() {
        let mut rng = seeded_rng(0);
        let mut ctx = MotionContext::new(0.0, 0, &mut rng);
        let mut rule = Orbit::circle([0.2, 0.1], 0.0, 0.3, 0.1, 1.5);
        let mut p = Particle::new(rule.position(), [0.0, 0.0]);

        for _ in 0..1000 {
            rule.advance(&mut p, &mut ctx).unwrap();
            assert!((distance(&p, [0.2, 0.1], 1.5) - 0.3).abs() < 1e-4);
        }
    }

    #[test]
    fn test_vortex_spirals_inward() {
        let mut field = ParticleField::new();
        let mut rng = seeded_rng(8);
        let viewport = Viewport::new(1200, 800);
        let mut ctx = SpawnContext::new(&mut field, &mut rng, viewport, SpawnOrigin::at(0.0, 0.0));
        vortex(&mut ctx);

        let config = SimulationConfig::default();
        let mut motion_rng = seeded_rng(1);
        for frame in 0..100 {
            let mut mctx = MotionContext::new(0.0, frame, &mut motion_rng);
            field.step(&config, &mut mctx);
        }
        // Started below 0.8, shrinks by 0.002 per frame
        assert!(field.iter().all(|p| distance(p, [0.0, 0.0], viewport.aspect()) <= 0.6 + 1e-4));
    }

    #[test]
    fn test_swarm_center_moves() {
        let mut field = ParticleField::new();
        let mut rng = seeded_rng(8);
        let mut ctx = SpawnContext::new(&mut field, &mut rng, Viewport::default(), SpawnOrigin::at(0.0, 0.0));
        assert_eq!(bee_swarm(&mut ctx), 50);

        let config = SimulationConfig::default();
        let mut motion_rng = seeded_rng(1);
        for frame in 0..200 {
            let mut mctx = MotionContext::new(0.0, frame, &mut motion_rng);
            field.step(&config, &mut mctx);
        }
        let n = field.len() as f32;
        let mean = field.iter().fold([0.0f32, 0.0], |acc, p| [acc[0] + p.position[0] / n, acc[1] + p.position[1] / n]);
        assert!(mean[0].hypot(mean[1]) > 0.05, "swarm should have wandered off");
    }
}
