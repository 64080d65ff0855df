//! # Field-Following Effects
//!
//! Positions come from a function of phase laid over a slow base drift.
//! The base point moves linearly; the visible particle sits at
//! `base + axis * offset(phase)`, so the wave shape never accumulates error.

use std::f32::consts::TAU;

use ffcts_core::{MotionContext, MotionError, MotionRule, Particle};
use rand::Rng;

use crate::context::SpawnContext;
use crate::palette;

/// Aspect-corrected unit vector for `angle`.
fn direction(angle: f32, aspect: f32) -> [f32; 2] {
    [angle.cos() / aspect, angle.sin()]
}

/// Aspect-corrected unit vector perpendicular to `angle`.
fn perpendicular(angle: f32, aspect: f32) -> [f32; 2] {
    [-angle.sin() / aspect, angle.cos()]
}

/// Sine offset along `axis` around a drifting base point.
#[derive(Debug, Clone, Copy)]
pub struct Undulate {
    /// Point the wave oscillates around.
    pub base: [f32; 2],
    /// Base displacement per frame.
    pub drift: [f32; 2],
    /// Offset direction, already aspect-corrected.
    pub axis: [f32; 2],
    /// Offset amplitude.
    pub amplitude: f32,
    /// Phase advance per frame.
    pub frequency: f32,
    /// Current phase.
    pub phase: f32,
    /// Relative strength of the second harmonic.
    pub harmonic: f32,
}

impl Undulate {
    /// Current offset from the base point along the axis.
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.amplitude * (self.phase.sin() + self.harmonic * (self.phase * 2.0).sin())
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> [f32; 2] {
        let offset = self.offset();
        [self.base[0] + self.axis[0] * offset, self.base[1] + self.axis[1] * offset]
    }
}

impl MotionRule for Undulate {
    fn name(&self) -> &'static str {
        "undulate"
    }

    fn advance(&mut self, p: &mut Particle, _ctx: &mut MotionContext<'_>) -> Result<(), MotionError> {
        self.base[0] += self.drift[0];
        self.base[1] += self.drift[1];
        self.phase += self.frequency;

        let next = self.position();
        p.velocity = [next[0] - p.position[0], next[1] - p.position[1]];
        p.position = next;
        Ok(())
    }
}

/// An undulating particle whose alpha shimmers with its phase.
#[derive(Debug, Clone, Copy)]
pub struct Veil {
    /// Underlying motion.
    pub wave: Undulate,
    /// Alpha at the brightest point of the shimmer.
    pub peak: f32,
}

impl MotionRule for Veil {
    fn name(&self) -> &'static str {
        "veil"
    }

    fn advance(&mut self, p: &mut Particle, ctx: &mut MotionContext<'_>) -> Result<(), MotionError> {
        self.wave.advance(p, ctx)?;
        let shimmer = 0.5 + 0.5 * (self.wave.phase * 0.5).sin();
        p.color = p.color.with_alpha((self.peak * shimmer * p.life).clamp(0.0, 1.0));
        Ok(())
    }
}

/// Jagged motion: the perpendicular offset jumps to a new random value
/// every `period` frames.
#[derive(Debug, Clone, Copy)]
pub struct Zigzag {
    /// Point the jags are measured from.
    pub base: [f32; 2],
    /// Base displacement per frame.
    pub drift: [f32; 2],
    /// Offset direction, already aspect-corrected.
    pub axis: [f32; 2],
    /// Largest jump away from the base line.
    pub reach: f32,
    /// Frames between jumps.
    pub period: u32,
    /// Frames until the next jump.
    pub countdown: u32,
    /// Current offset.
    pub offset: f32,
}

impl MotionRule for Zigzag {
    fn name(&self) -> &'static str {
        "zigzag"
    }

    fn advance(&mut self, p: &mut Particle, ctx: &mut MotionContext<'_>) -> Result<(), MotionError> {
        self.base[0] += self.drift[0];
        self.base[1] += self.drift[1];
        if self.countdown == 0 {
            self.offset = ctx.rng.gen_range(-self.reach..=self.reach);
            self.countdown = self.period;
        } else {
            self.countdown -= 1;
        }

        let next = [
            self.base[0] + self.axis[0] * self.offset,
            self.base[1] + self.axis[1] * self.offset,
        ];
        p.velocity = [next[0] - p.position[0], next[1] - p.position[1]];
        p.position = next;
        Ok(())
    }
}

/// Rays of charge radiating from a pole, each rippling sideways.
pub fn magnetic_rays(ctx: &mut SpawnContext<'_>) -> usize {
    const COUNT: usize = 80;
    const RAYS: u32 = 8;

    let center = ctx.point();
    let aspect = ctx.aspect();
    let twist = ctx.angle();
    for _ in 0..COUNT {
        let ray = ctx.index(RAYS);
        let angle = twist + ray as f32 / RAYS as f32 * TAU;
        let along = direction(angle, aspect);
        let distance = ctx.uniform(0.02, 0.3);
        let speed = ctx.uniform(0.002, 0.004);
        let wave = Undulate {
            base: [center[0] + along[0] * distance, center[1] + along[1] * distance],
            drift: [along[0] * speed, along[1] * speed],
            axis: perpendicular(angle, aspect),
            amplitude: 0.015,
            frequency: 0.15,
            phase: distance * 30.0,
            harmonic: 0.0,
        };
        let color = ctx.pick(&palette::MAGNETIC);
        ctx.emit(
            Particle::new(wave.position(), [0.0, 0.0])
                .with_motion(wave)
                .with_color(color)
                .with_size(2.5)
                .with_fade_speed(0.006),
        );
    }
    COUNT
}

/// A wide curtain of light across the upper sky.
pub fn aurora_veil(ctx: &mut SpawnContext<'_>) -> usize {
    const COUNT: usize = 120;

    let drift = ctx.uniform(-0.001, 0.001);
    for _ in 0..COUNT {
        let x = ctx.signed();
        let y = ctx.uniform(0.3, 0.8);
        let wave = Undulate {
            base: [x, y],
            drift: [drift, 0.0],
            axis: [0.0, 1.0],
            amplitude: ctx.uniform(0.03, 0.08),
            frequency: 0.03,
            // Neighbouring columns move together
            phase: x * 4.0,
            harmonic: 0.3,
        };
        let color = ctx.pick(&palette::AURORA);
        let size = ctx.uniform(4.0, 7.0);
        ctx.emit(
            Particle::new(wave.position(), [0.0, 0.0])
                .with_motion(Veil { wave, peak: 0.7 })
                .with_color(color)
                .with_size(size)
                .with_fade_speed(0.003),
        );
    }
    COUNT
}

/// Crackling veins branching out of one point.
pub fn electric_veins(ctx: &mut SpawnContext<'_>) -> usize {
    const COUNT: usize = 70;
    const VEINS: u32 = 5;

    let center = ctx.point();
    let aspect = ctx.aspect();
    let headings: Vec<f32> = (0..VEINS).map(|_| ctx.angle()).collect();
    for i in 0..COUNT {
        let angle = headings[i % headings.len()];
        let along = direction(angle, aspect);
        let distance = ctx.uniform(0.0, 0.4);
        let speed = ctx.uniform(0.001, 0.003);
        let countdown = ctx.index(4);
        let rule = Zigzag {
            base: [center[0] + along[0] * distance, center[1] + along[1] * distance],
            drift: [along[0] * speed, along[1] * speed],
            axis: perpendicular(angle, aspect),
            reach: 0.02,
            period: 3,
            countdown,
            offset: 0.0,
        };
        let color = ctx.pick(&palette::ELECTRIC);
        ctx.emit(
            Particle::new(rule.base, [0.0, 0.0])
                .with_motion(rule)
                .with_color(color)
                .with_size(2.0)
                .with_fade_speed(0.01),
        );
    }
    COUNT
}

/// A travelling sine wave across the whole width.
pub fn plasma_waves(ctx: &mut SpawnContext<'_>) -> usize {
    const COUNT: usize = 100;

    let [_, y] = ctx.point();
    for i in 0..COUNT {
        let x = i as f32 / (COUNT - 1) as f32 * 2.0 - 1.0;
        let wave = Undulate {
            base: [x, y],
            drift: [0.0, 0.0],
            axis: [0.0, 1.0],
            amplitude: 0.12,
            frequency: 0.08,
            phase: x * 6.0,
            harmonic: 0.0,
        };
        let color = ctx.pick(&palette::WAVE);
        ctx.emit(
            Particle::new(wave.position(), [0.0, 0.0])
                .with_motion(wave)
                .with_color(color)
                .with_size(3.0)
                .with_fade_speed(0.005),
        );
    }
    COUNT
}

/// Three rolling swells along the bottom of the screen.
pub fn tide_waves(ctx: &mut SpawnContext<'_>) -> usize {
    const COUNT: usize = 90;
    const ROWS: usize = 3;

    let per_row = COUNT / ROWS;
    for row in 0..ROWS {
        let y = -0.6 - row as f32 * 0.1;
        for i in 0..per_row {
            let x = i as f32 / (per_row - 1) as f32 * 2.0 - 1.0;
            let wave = Undulate {
                base: [x, y],
                drift: [0.0005, 0.0],
                axis: [0.0, 1.0],
                amplitude: 0.05 - row as f32 * 0.01,
                frequency: 0.05,
                phase: x * 3.0 + row as f32,
                harmonic: 0.35,
            };
            let color = ctx.pick(&palette::TIDE);
            ctx.emit(
                Particle::new(wave.position(), [0.0, 0.0])
                    .with_motion(wave)
                    .with_color(color)
                    .with_size(3.5)
                    .with_fade_speed(0.004),
            );
        }
    }
    COUNT
}
