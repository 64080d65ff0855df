//! # Self-Sustaining Effects
//!
//! These particles never fade: they are spawned with a zero fade step and
//! their rule resets them in place when they reach a terminal condition
//! (off-screen, fully transparent). The collection size therefore stays
//! constant until the field is cleared.

use std::f32::consts::TAU;

use ffcts_core::{MotionContext, MotionError, MotionRule, Particle};
use rand::Rng;

use crate::context::SpawnContext;
use crate::palette;

/// Edge past which a particle counts as off-screen.
pub const EDGE: f32 = 1.05;

fn off_screen(p: &Particle) -> bool {
    p.position[0].abs() > EDGE || p.position[1].abs() > EDGE
}

/// Falls with a slight sway, wraps to the top when it leaves the bottom.
#[derive(Debug, Clone, Copy)]
pub struct Ember {
    /// Fall speed range, re-rolled on every wrap.
    pub fall: (f32, f32),
    /// Sway amplitude.
    pub sway: f32,
    /// Current sway phase.
    pub phase: f32,
}

impl MotionRule for Ember {
    fn name(&self) -> &'static str {
        "ember"
    }

    fn advance(&mut self, p: &mut Particle, ctx: &mut MotionContext<'_>) -> Result<(), MotionError> {
        self.phase += 0.05;
        p.velocity[0] = self.phase.sin() * self.sway;
        p.position[0] += p.velocity[0];
        p.position[1] += p.velocity[1];

        if p.position[1] < -EDGE {
            p.position = [ctx.rng.gen_range(-1.0..1.0), EDGE];
            p.velocity[1] = -ctx.rng.gen_range(self.fall.0..self.fall.1);
        }
        if p.position[0].abs() > EDGE {
            p.position[0] = -p.position[0].signum() * (EDGE - 0.01);
        }
        Ok(())
    }
}

/// Wanders slowly and blinks; relocates while dark.
#[derive(Debug, Clone, Copy)]
pub struct Blink {
    /// Phase advance per frame.
    pub rate: f32,
    /// Current phase in `[0, 2π)`.
    pub phase: f32,
    /// Largest wander speed.
    pub wander: f32,
}

impl MotionRule for Blink {
    fn name(&self) -> &'static str {
        "blink"
    }

    fn advance(&mut self, p: &mut Particle, ctx: &mut MotionContext<'_>) -> Result<(), MotionError> {
        let w = self.wander;
        p.velocity[0] = (p.velocity[0] + ctx.rng.gen_range(-w..w) * 0.1).clamp(-w, w);
        p.velocity[1] = (p.velocity[1] + ctx.rng.gen_range(-w..w) * 0.1).clamp(-w, w);
        p.position[0] += p.velocity[0];
        p.position[1] += p.velocity[1];

        self.phase += self.rate;
        if self.phase >= TAU {
            self.phase -= TAU;
            p.position = [ctx.rng.gen_range(-0.95..0.95), ctx.rng.gen_range(-0.95..0.95)];
        }
        p.color = p.color.with_alpha(self.phase.sin().max(0.0));
        Ok(())
    }
}

/// Darts around erratically; respawns at its home point when it escapes.
#[derive(Debug, Clone, Copy)]
pub struct Buzz {
    /// Respawn point.
    pub home: [f32; 2],
    /// Random acceleration per frame.
    pub jitter: f32,
    /// Speed cap.
    pub max_speed: f32,
}

impl MotionRule for Buzz {
    fn name(&self) -> &'static str {
        "buzz"
    }

    fn advance(&mut self, p: &mut Particle, ctx: &mut MotionContext<'_>) -> Result<(), MotionError> {
        let j = self.jitter;
        let m = self.max_speed;
        p.velocity[0] = (p.velocity[0] + ctx.rng.gen_range(-j..j)).clamp(-m, m);
        p.velocity[1] = (p.velocity[1] + ctx.rng.gen_range(-j..j)).clamp(-m, m);
        p.position[0] += p.velocity[0];
        p.position[1] += p.velocity[1];

        if off_screen(p) {
            let angle = ctx.rng.gen_range(0.0..TAU);
            p.position = self.home;
            p.velocity = [angle.cos() * m * 0.5, angle.sin() * m * 0.5];
        }
        Ok(())
    }
}

/// Flies outward from the center, speeding up and growing; restarts near
/// the center once it leaves the screen.
#[derive(Debug, Clone, Copy)]
pub struct Warp {
    /// Velocity multiplier per frame.
    pub acceleration: f32,
    /// Size growth per frame.
    pub growth: f32,
    /// Size on restart.
    pub base_size: f32,
    /// Aspect ratio captured at spawn time.
    pub aspect: f32,
}

impl MotionRule for Warp {
    fn name(&self) -> &'static str {
        "warp"
    }

    fn advance(&mut self, p: &mut Particle, ctx: &mut MotionContext<'_>) -> Result<(), MotionError> {
        p.velocity[0] *= self.acceleration;
        p.velocity[1] *= self.acceleration;
        p.position[0] += p.velocity[0];
        p.position[1] += p.velocity[1];
        p.size += self.growth;

        if off_screen(p) {
            let angle = ctx.rng.gen_range(0.0..TAU);
            let radius = ctx.rng.gen_range(0.01..0.1);
            let speed = ctx.rng.gen_range(0.001..0.003);
            p.position = [angle.cos() * radius / self.aspect, angle.sin() * radius];
            p.velocity = [angle.cos() * speed / self.aspect, angle.sin() * speed];
            p.size = self.base_size;
        }
        Ok(())
    }
}

/// Falls straight down a fixed column with a flickering glyph alpha.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    /// Column spacing in normalized units.
    pub spacing: f32,
    /// Fall speed range, re-rolled on every wrap.
    pub fall: (f32, f32),
}

impl MotionRule for Column {
    fn name(&self) -> &'static str {
        "column"
    }

    fn advance(&mut self, p: &mut Particle, ctx: &mut MotionContext<'_>) -> Result<(), MotionError> {
        p.position[1] += p.velocity[1];
        if ctx.rng.gen_bool(0.1) {
            p.color = p.color.with_alpha(ctx.rng.gen_range(0.4..1.0));
        }

        if p.position[1] < -EDGE {
            let columns = (2.0 / self.spacing) as u32;
            let column = ctx.rng.gen_range(0..columns.max(1));
            p.position = [-1.0 + column as f32 * self.spacing, EDGE];
            p.velocity = [0.0, -ctx.rng.gen_range(self.fall.0..self.fall.1)];
        }
        Ok(())
    }
}

/// Embers drifting down forever, wrapping back to the top.
pub fn falling_embers(ctx: &mut SpawnContext<'_>) -> usize {
    const COUNT: usize = 60;
    const FALL: (f32, f32) = (0.002, 0.006);

    for _ in 0..COUNT {
        let x = ctx.signed();
        let y = ctx.signed();
        let vy = -ctx.uniform(FALL.0, FALL.1);
        let rule = Ember {
            fall: FALL,
            sway: ctx.uniform(0.0005, 0.002),
            phase: ctx.angle(),
        };
        let color = ctx.pick(&palette::EMBER);
        let size = ctx.uniform(2.0, 4.0);
        ctx.emit(
            Particle::new([x, y], [0.0, vy])
                .with_motion(rule)
                .with_color(color)
                .with_size(size)
                .with_fade_speed(0.0),
        );
    }
    COUNT
}

/// Blinking fireflies scattered over the screen.
pub fn fireflies(ctx: &mut SpawnContext<'_>) -> usize {
    const COUNT: usize = 40;

    for _ in 0..COUNT {
        let position = [ctx.uniform(-0.95, 0.95), ctx.uniform(-0.95, 0.95)];
        let rule = Blink {
            rate: ctx.uniform(0.02, 0.05),
            phase: ctx.angle(),
            wander: 0.002,
        };
        let color = ctx.pick(&palette::FIREFLY);
        ctx.emit(
            Particle::new(position, [0.0, 0.0])
                .with_motion(rule)
                .with_color(color)
                .with_size(3.0)
                .with_fade_speed(0.0),
        );
    }
    COUNT
}

/// A cloud of flies that keeps escaping and returning to its origin.
pub fn fly_burst(ctx: &mut SpawnContext<'_>) -> usize {
    const COUNT: usize = 50;
    const MAX_SPEED: f32 = 0.012;

    let home = ctx.point();
    let aspect = ctx.aspect();
    for _ in 0..COUNT {
        let angle = ctx.angle();
        let speed = ctx.uniform(0.002, MAX_SPEED);
        let rule = Buzz {
            home,
            jitter: 0.001,
            max_speed: MAX_SPEED,
        };
        let color = ctx.pick(&palette::FLY);
        ctx.emit(
            Particle::new(home, [angle.cos() * speed / aspect, angle.sin() * speed])
                .with_motion(rule)
                .with_color(color)
                .with_size(2.0)
                .with_fade_speed(0.0),
        );
    }
    COUNT
}

/// Endless flight through a field of stars.
pub fn starfield(ctx: &mut SpawnContext<'_>) -> usize {
    const COUNT: usize = 100;

    let aspect = ctx.aspect();
    for _ in 0..COUNT {
        let angle = ctx.angle();
        let radius = ctx.uniform(0.01, 0.9);
        let speed = ctx.uniform(0.001, 0.003);
        let rule = Warp {
            acceleration: 1.02,
            growth: 0.02,
            base_size: 1.5,
            aspect,
        };
        ctx.emit(
            Particle::new(
                [angle.cos() * radius / aspect, angle.sin() * radius],
                [angle.cos() * speed / aspect, angle.sin() * speed],
            )
            .with_motion(rule)
            .with_color(palette::WHITE)
            .with_size(1.5 + radius * 2.0)
            .with_fade_speed(0.0),
        );
    }
    COUNT
}

/// Green glyph streams falling down fixed columns.
pub fn matrix_rain(ctx: &mut SpawnContext<'_>) -> usize {
    const COUNT: usize = 80;
    const FALL: (f32, f32) = (0.005, 0.015);

    // One column per 12 pixels of width
    let spacing = 24.0 / ctx.viewport.width as f32;
    let columns = ((2.0 / spacing) as u32).max(1);
    for _ in 0..COUNT {
        let column = ctx.index(columns);
        let y = ctx.signed();
        let vy = -ctx.uniform(FALL.0, FALL.1);
        let color = ctx.pick(&palette::MATRIX);
        ctx.emit(
            Particle::new([-1.0 + column as f32 * spacing, y], [0.0, vy])
                .with_motion(Column { spacing, fall: FALL })
                .with_color(color)
                .with_size(4.0)
                .with_fade_speed(0.0),
        );
    }
    COUNT
}
