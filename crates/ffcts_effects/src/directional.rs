//! # Directional Streams
//!
//! Particles spawned along an edge or a band, drifting along one dominant
//! axis with a little jitter. Most of them carry a rule that bends the
//! drift every frame: gravity, buoyancy, wobble, flutter or sway.

use std::f32::consts::TAU;

use ffcts_core::{Color, MotionContext, MotionError, MotionRule, Particle};

use crate::context::SpawnContext;
use crate::palette;
use crate::rules::Gravity;

/// Side-to-side wobble driven by wall-clock time, as used by fire.
#[derive(Debug, Clone, Copy)]
pub struct Wobble {
    /// Horizontal acceleration amplitude.
    pub amplitude: f32,
    /// Aspect ratio captured at spawn time.
    pub aspect: f32,
}

impl MotionRule for Wobble {
    fn name(&self) -> &'static str {
        "wobble"
    }

    fn advance(&mut self, p: &mut Particle, ctx: &mut MotionContext<'_>) -> Result<(), MotionError> {
        let phase = (ctx.time_ms * 0.02) as f32 + p.position[0];
        p.velocity[0] += phase.sin() * self.amplitude / self.aspect;
        p.position[0] += p.velocity[0];
        p.position[1] += p.velocity[1];
        Ok(())
    }
}

/// Falling paper: gravity plus a per-particle flutter on the horizontal drift.
#[derive(Debug, Clone, Copy)]
pub struct Flutter {
    /// Downward pull per frame.
    pub g: f32,
    /// Horizontal drift before flutter.
    pub drift: f32,
    /// Flutter amplitude.
    pub amplitude: f32,
    /// Flutter angular frequency per millisecond.
    pub frequency: f32,
    /// Per-particle phase offset.
    pub phase: f32,
    /// Terminal fall speed.
    pub terminal: f32,
}

impl MotionRule for Flutter {
    fn name(&self) -> &'static str {
        "flutter"
    }

    fn advance(&mut self, p: &mut Particle, ctx: &mut MotionContext<'_>) -> Result<(), MotionError> {
        let t = ctx.time_ms as f32 * self.frequency + self.phase;
        p.velocity[0] = self.drift + t.sin() * self.amplitude;
        p.velocity[1] = (p.velocity[1] - self.g).max(-self.terminal);
        p.position[0] += p.velocity[0];
        p.position[1] += p.velocity[1];
        Ok(())
    }
}

/// Slow horizontal drift with a breathing alpha, peaking mid-life.
#[derive(Debug, Clone, Copy)]
pub struct Haze {
    /// Peak alpha.
    pub peak: f32,
}

impl MotionRule for Haze {
    fn name(&self) -> &'static str {
        "haze"
    }

    fn advance(&mut self, p: &mut Particle, _ctx: &mut MotionContext<'_>) -> Result<(), MotionError> {
        p.position[0] += p.velocity[0];
        p.position[1] += p.velocity[1];
        let progress = (1.0 - p.life).clamp(0.0, 1.0);
        let alpha = self.peak * (progress * std::f32::consts::PI).sin();
        p.color = p.color.with_alpha(alpha.max(0.0));
        Ok(())
    }
}

/// Falls straight down while swaying around a base column.
///
/// Position is recomputed from the base, not accumulated.
#[derive(Debug, Clone, Copy)]
pub struct Sway {
    /// Column the particle sways around.
    pub base_x: f32,
    /// Sway half-width.
    pub amplitude: f32,
    /// Phase advance per frame.
    pub rate: f32,
    /// Current phase.
    pub phase: f32,
}

impl MotionRule for Sway {
    fn name(&self) -> &'static str {
        "sway"
    }

    fn advance(&mut self, p: &mut Particle, _ctx: &mut MotionContext<'_>) -> Result<(), MotionError> {
        self.phase += self.rate;
        p.position[1] += p.velocity[1];
        p.position[0] = self.base_x + self.phase.sin() * self.amplitude;
        Ok(())
    }
}

/// Rising bubble: buoyancy with a capped climb rate and a sideways wiggle.
#[derive(Debug, Clone, Copy)]
pub struct Buoyancy {
    /// Upward acceleration per frame.
    pub lift: f32,
    /// Maximum climb speed.
    pub max_rise: f32,
    /// Wiggle amplitude.
    pub wiggle: f32,
    /// Current wiggle phase.
    pub phase: f32,
}

impl MotionRule for Buoyancy {
    fn name(&self) -> &'static str {
        "buoyancy"
    }

    fn advance(&mut self, p: &mut Particle, _ctx: &mut MotionContext<'_>) -> Result<(), MotionError> {
        self.phase += 0.12;
        p.velocity[1] = (p.velocity[1] + self.lift).min(self.max_rise);
        p.position[0] += p.velocity[0] + self.phase.sin() * self.wiggle;
        p.position[1] += p.velocity[1];
        Ok(())
    }
}

/// Rising smoke that spreads out and thins.
#[derive(Debug, Clone, Copy)]
pub struct Billow {
    /// Size growth per frame, pixels.
    pub growth: f32,
    /// Alpha at full life.
    pub opacity: f32,
    /// Horizontal velocity decay.
    pub drag: f32,
}

impl MotionRule for Billow {
    fn name(&self) -> &'static str {
        "billow"
    }

    fn advance(&mut self, p: &mut Particle, _ctx: &mut MotionContext<'_>) -> Result<(), MotionError> {
        p.velocity[0] *= self.drag;
        p.position[0] += p.velocity[0];
        p.position[1] += p.velocity[1];
        p.size += self.growth;
        p.color = p.color.with_alpha((self.opacity * p.life).max(0.0));
        Ok(())
    }
}

/// Particles shooting off in one shared random direction.
pub fn green_trail(ctx: &mut SpawnContext<'_>) -> usize {
    const COUNT: usize = 30;
    const MAX_SPEED: f32 = 0.005;

    let center = ctx.point();
    let direction = ctx.angle();
    let aspect = ctx.aspect();

    for _ in 0..COUNT {
        let speed = ctx.unit() * MAX_SPEED;
        ctx.emit(
            Particle::new(center, [direction.cos() * speed / aspect, direction.sin() * speed])
                .with_color(palette::TRAIL_GREEN)
                .with_size(3.0)
                .with_fade_speed(0.005),
        );
    }
    COUNT
}

/// Blue drops falling from the top edge, accelerating under gravity.
pub fn blue_rain(ctx: &mut SpawnContext<'_>) -> usize {
    const COUNT: usize = 100;
    const GRAVITY: f32 = 0.000_05;

    for _ in 0..COUNT {
        let x = ctx.signed();
        let vx = (ctx.unit() - 0.5) * 0.001;
        let vy = -0.002 - ctx.unit() * 0.002;
        ctx.emit(
            Particle::new([x, 1.0], [vx, vy])
                .with_color(palette::RAIN_BLUE)
                .with_size(4.0)
                .with_fade_speed(0.0025)
                .with_motion(Gravity { g: GRAVITY }),
        );
    }
    COUNT
}

/// Narrow flame rising from the bottom center.
pub fn fire(ctx: &mut SpawnContext<'_>) -> usize {
    const COUNT: usize = 10;
    const MAX_UPWARD: f32 = 0.006;
    const WOBBLE: f32 = 0.0002;

    let aspect = ctx.aspect();
    for _ in 0..COUNT {
        let color = ctx.pick(&palette::FLAME);
        let x = ctx.uniform(-0.1, 0.1);
        let vx = (ctx.unit() - 0.5) * 0.002 / aspect;
        let vy = 0.002 + ctx.unit() * MAX_UPWARD;
        let size = 2.0 + ctx.unit() * 3.0;
        ctx.emit(
            Particle::new([x, -1.0], [vx, vy])
                .with_color(color)
                .with_size(size)
                .with_fade_speed(0.004)
                .with_motion(Wobble {
                    amplitude: WOBBLE,
                    aspect,
                }),
        );
    }
    COUNT
}

/// Party confetti tumbling down from above the top edge.
pub fn confetti(ctx: &mut SpawnContext<'_>) -> usize {
    const COUNT: usize = 90;

    let aspect = ctx.aspect();
    for _ in 0..COUNT {
        let color = ctx.pick(&palette::CONFETTI);
        let x = ctx.signed();
        let y = ctx.uniform(0.95, 1.15);
        let drift = ctx.signed() * 0.001 / aspect;
        let rule = Flutter {
            g: 0.000_04,
            drift,
            amplitude: ctx.uniform(0.001, 0.003) / aspect,
            frequency: ctx.uniform(0.003, 0.008),
            phase: ctx.angle(),
            terminal: ctx.uniform(0.004, 0.007),
        };
        let size = ctx.uniform(4.0, 7.0);
        let vy = -ctx.uniform(0.001, 0.003);
        ctx.emit(
            Particle::new([x, y], [drift, vy])
                .with_color(color)
                .with_size(size)
                .with_fade_speed(0.003)
                .with_motion(rule),
        );
    }
    COUNT
}

/// Large faint patches drifting sideways across a horizontal band.
pub fn mist(ctx: &mut SpawnContext<'_>) -> usize {
    const COUNT: usize = 40;

    let [_, band] = ctx.point();
    let heading = ctx.sign();
    let aspect = ctx.aspect();
    for _ in 0..COUNT {
        let x = -heading * ctx.uniform(0.6, 1.2);
        let y = band + ctx.signed() * 0.15;
        let vx = heading * ctx.uniform(0.0008, 0.002) / aspect;
        let vy = ctx.signed() * 0.0002;
        let size = ctx.uniform(18.0, 30.0);
        ctx.emit(
            Particle::new([x, y], [vx, vy])
                .with_color(Color::rgba(palette::MIST[0], palette::MIST[1], palette::MIST[2], 0.0))
                .with_size(size)
                .with_fade_speed(0.002)
                .with_motion(Haze { peak: 0.18 }),
        );
    }
    COUNT
}

/// Flakes falling slowly while swaying around their column.
pub fn snow(ctx: &mut SpawnContext<'_>) -> usize {
    const COUNT: usize = 120;

    let aspect = ctx.aspect();
    for _ in 0..COUNT {
        let color = ctx.pick(&palette::SNOW);
        let base_x = ctx.signed();
        let y = ctx.uniform(0.9, 1.2);
        let vy = -ctx.uniform(0.001, 0.003);
        let rule = Sway {
            base_x,
            amplitude: ctx.uniform(0.01, 0.04) / aspect,
            rate: ctx.uniform(0.01, 0.04),
            phase: ctx.angle(),
        };
        let size = ctx.uniform(2.0, 5.0);
        ctx.emit(
            Particle::new([base_x, y], [0.0, vy])
                .with_color(color)
                .with_size(size)
                .with_fade_speed(0.0015)
                .with_motion(rule),
        );
    }
    COUNT
}

/// Bubbles rising from the bottom edge.
pub fn bubbles(ctx: &mut SpawnContext<'_>) -> usize {
    const COUNT: usize = 40;

    let aspect = ctx.aspect();
    for _ in 0..COUNT {
        let color = ctx.pick(&palette::BUBBLE);
        let x = ctx.signed();
        let y = -1.0 - ctx.unit() * 0.1;
        let rule = Buoyancy {
            lift: 0.000_03,
            max_rise: ctx.uniform(0.003, 0.006),
            wiggle: 0.0015 / aspect,
            phase: ctx.angle(),
        };
        let size = ctx.uniform(5.0, 9.0);
        ctx.emit(
            Particle::new([x, y], [0.0, 0.0005])
                .with_color(color)
                .with_size(size)
                .with_fade_speed(0.003)
                .with_motion(rule),
        );
    }
    COUNT
}

/// A column of smoke rising from a point near the bottom.
pub fn smoke(ctx: &mut SpawnContext<'_>) -> usize {
    const COUNT: usize = 30;

    let [x, _] = ctx.point();
    let aspect = ctx.aspect();
    for _ in 0..COUNT {
        let color = ctx.pick(&palette::SMOKE);
        let vx = ctx.signed() * 0.001 / aspect;
        let vy = ctx.uniform(0.002, 0.004);
        let size = ctx.uniform(6.0, 10.0);
        let x = x + ctx.signed() * 0.03;
        ctx.emit(
            Particle::new([x, -0.95], [vx, vy])
                .with_color(Color::rgba(color[0], color[1], color[2], 0.35))
                .with_size(size)
                .with_fade_speed(0.004)
                .with_motion(Billow {
                    growth: 0.08,
                    opacity: 0.35,
                    drag: 0.99,
                }),
        );
    }
    COUNT
}

/// Diagonal streaks crossing from the upper right.
pub fn meteor_shower(ctx: &mut SpawnContext<'_>) -> usize {
    const COUNT: usize = 25;

    let aspect = ctx.aspect();
    let heading = TAU * 0.6 + ctx.signed() * 0.08;
    for _ in 0..COUNT {
        let color = ctx.pick(&palette::METEOR);
        let x = ctx.uniform(0.0, 1.3);
        let y = ctx.uniform(0.7, 1.2);
        let speed = ctx.uniform(0.01, 0.016);
        ctx.emit(
            Particle::new([x, y], [heading.cos() * speed / aspect, heading.sin() * speed])
                .with_color(color)
                .with_size(3.0)
                .with_fade_speed(0.008),
        );
    }
    COUNT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SpawnOrigin;
    use ffcts_core::{seeded_rng, ParticleField, SimulationConfig, Viewport};

    fn spawn(generator: fn(&mut SpawnContext<'_>) -> usize) -> ParticleField {
        let mut field = ParticleField::new();
        let mut rng = seeded_rng(21);
        let mut ctx = SpawnContext::new(&mut field, &mut rng, Viewport::new(1600, 900), SpawnOrigin::random());
        let count = generator(&mut ctx);
        assert_eq!(count, field.len());
        field
    }

    fn run(field: &mut ParticleField, frames: u64) {
        let config = SimulationConfig::default();
        let mut rng = seeded_rng(0);
        for frame in 0..frames {
            let mut ctx = MotionContext::new(frame as f64 * 16.0, frame, &mut rng);
            field.step(&config, &mut ctx);
        }
    }

    #[test]
    fn test_rain_falls_and_speeds_up() {
        let mut field = spawn(blue_rain);
        let before: Vec<f32> = field.iter().map(|p| p.velocity[1]).collect();
        run(&mut field, 10);
        for (p, v0) in field.iter().zip(before) {
            assert!(p.velocity[1] < v0);
            assert!(p.position[1] < 1.0);
        }
    }

    #[test]
    fn test_fire_rises_from_bottom_center() {
        let field = spawn(fire);
        assert_eq!(field.len(), 10);
        for p in field.iter() {
            assert!(p.position[0].abs() <= 0.1);
            assert!((p.position[1] + 1.0).abs() < f32::EPSILON);
            assert!(p.velocity[1] >= 0.002);
        }
    }

    #[test]
    fn test_trail_shares_one_direction() {
        let field = spawn(green_trail);
        let headings: Vec<f32> = field
            .iter()
            .filter(|p| p.velocity != [0.0, 0.0])
            .map(|p| (p.velocity[1]).atan2(p.velocity[0] * 1600.0 / 900.0))
            .collect();
        assert!(headings.windows(2).all(|w| (w[0] - w[1]).abs() < 1e-3));
    }

    #[test]
    fn test_mist_carries_explicit_alpha() {
        let mut field = spawn(mist);
        run(&mut field, 100);
        for p in field.iter() {
            let alpha = p.color.alpha.unwrap();
            assert!((0.0..=0.18).contains(&alpha));
        }
    }

    #[test]
    fn test_smoke_grows() {
        let mut field = spawn(smoke);
        let before: Vec<f32> = field.iter().map(|p| p.size).collect();
        run(&mut field, 20);
        assert!(field.iter().zip(before).all(|(p, s)| p.size > s));
    }

    #[test]
    fn test_snow_keeps_falling() {
        let mut field = spawn(snow);
        run(&mut field, 200);
        assert!(field.iter().all(|p| p.velocity[1] < 0.0));
    }
}
