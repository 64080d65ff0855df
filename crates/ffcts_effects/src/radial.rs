//! # Radial Bursts
//!
//! Outward explosions from a single point. Every variant runs through
//! [`burst`]: pick an angle, pick a speed, divide the horizontal component
//! by the aspect ratio so the cloud stays round on a wide surface.

use std::f32::consts::{FRAC_PI_2, TAU};

use ffcts_core::Particle;

use crate::context::SpawnContext;
use crate::palette;
use crate::rules::{Ballistic, Drag};

/// How a burst chooses each particle's direction.
#[derive(Debug, Clone, Copy)]
pub enum AngleProfile {
    /// Uniform over the full circle.
    Uniform,
    /// Evenly spaced, `index / count * 2π`, plus up to `jitter` radians.
    Even {
        /// Random offset added to each evenly spaced angle.
        jitter: f32,
    },
    /// Clustered around `lobes` evenly spaced directions.
    Lobed {
        /// Number of preferred directions.
        lobes: u32,
        /// Half-width of each cluster in radians.
        spread: f32,
    },
    /// Within `spread` radians of `heading`.
    Cone {
        /// Central direction in radians.
        heading: f32,
        /// Half-width of the cone.
        spread: f32,
    },
}

/// How a burst chooses each particle's speed.
#[derive(Debug, Clone, Copy)]
pub enum SpeedProfile {
    /// Uniform in `[0, max)`.
    UpTo(f32),
    /// Exactly this speed.
    Fixed(f32),
    /// Uniform in `[lo, hi)`.
    Between(f32, f32),
}

/// Recipe shared by every radial variant.
#[derive(Debug, Clone, Copy)]
pub struct Burst<'p> {
    /// Particles per call.
    pub count: usize,
    /// Direction sampling.
    pub angle: AngleProfile,
    /// Speed sampling.
    pub speed: SpeedProfile,
    /// Colors to pick from.
    pub palette: &'p [[f32; 3]],
    /// Size range in pixels, `[lo, hi)`.
    pub size: (f32, f32),
    /// Life decrement per frame.
    pub fade_speed: f32,
}

/// Emits one radial burst at `center`, passing each particle through `finish`.
///
/// Returns the number of particles emitted.
pub fn burst<F>(ctx: &mut SpawnContext<'_>, center: [f32; 2], recipe: &Burst<'_>, mut finish: F) -> usize
where
    F: FnMut(Particle, &mut SpawnContext<'_>) -> Particle,
{
    // Read per call: the surface may have been resized since the last one
    let aspect = ctx.aspect();

    for i in 0..recipe.count {
        let angle = match recipe.angle {
            AngleProfile::Uniform => ctx.angle(),
            AngleProfile::Even { jitter } => i as f32 / recipe.count as f32 * TAU + ctx.signed() * jitter,
            AngleProfile::Lobed { lobes, spread } => {
                let lobe = ctx.index(lobes.max(1));
                // Triangular distribution peaks on the lobe axis
                let offset = (ctx.signed() + ctx.signed()) * 0.5 * spread;
                lobe as f32 / lobes.max(1) as f32 * TAU + offset
            }
            AngleProfile::Cone { heading, spread } => heading + ctx.signed() * spread,
        };
        let speed = match recipe.speed {
            SpeedProfile::UpTo(max) => ctx.unit() * max,
            SpeedProfile::Fixed(v) => v,
            SpeedProfile::Between(lo, hi) => ctx.uniform(lo, hi),
        };

        let color = ctx.pick(recipe.palette);
        let size = ctx.uniform(recipe.size.0, recipe.size.1);
        let particle = Particle::new(center, [angle.cos() * speed / aspect, angle.sin() * speed])
            .with_color(color)
            .with_size(size)
            .with_fade_speed(recipe.fade_speed);
        let particle = finish(particle, ctx);
        ctx.emit(particle);
    }

    recipe.count
}

fn plain(p: Particle, _ctx: &mut SpawnContext<'_>) -> Particle {
    p
}

/// Warm orange explosion at a random point.
pub fn orange_burst(ctx: &mut SpawnContext<'_>) -> usize {
    let center = ctx.point();
    burst(ctx, center, &ORANGE_BURST, plain)
}

/// Recipe of [`orange_burst`].
pub const ORANGE_BURST: Burst<'static> = Burst {
    count: 80,
    angle: AngleProfile::Uniform,
    speed: SpeedProfile::UpTo(0.01),
    palette: &[palette::ORANGE],
    size: (3.0, 5.0),
    fade_speed: 0.005,
};

/// Many small, fast pure-red particles.
pub fn red_explode(ctx: &mut SpawnContext<'_>) -> usize {
    let center = ctx.point();
    let recipe = Burst {
        count: 150,
        angle: AngleProfile::Uniform,
        speed: SpeedProfile::UpTo(0.01),
        palette: &[palette::RED],
        size: (3.0, 3.0),
        fade_speed: 0.005,
    };
    burst(ctx, center, &recipe, plain)
}

/// A thin ring expanding at constant speed.
pub fn shock_ring(ctx: &mut SpawnContext<'_>) -> usize {
    let center = ctx.point();
    let recipe = Burst {
        count: 120,
        angle: AngleProfile::Even { jitter: 0.01 },
        speed: SpeedProfile::Fixed(0.012),
        palette: &palette::SHOCK,
        size: (3.0, 3.0),
        fade_speed: 0.012,
    };
    burst(ctx, center, &recipe, plain)
}

/// Bright slow core inside a fast blue shell.
pub fn nova(ctx: &mut SpawnContext<'_>) -> usize {
    let center = ctx.point();
    let core = Burst {
        count: 90,
        angle: AngleProfile::Even { jitter: 0.05 },
        speed: SpeedProfile::Between(0.003, 0.005),
        palette: &[palette::NOVA_CORE],
        size: (4.0, 6.0),
        fade_speed: 0.006,
    };
    let shell = Burst {
        count: 90,
        angle: AngleProfile::Even { jitter: 0.02 },
        speed: SpeedProfile::Fixed(0.009),
        palette: &[palette::NOVA_SHELL],
        size: (3.0, 4.0),
        fade_speed: 0.006,
    };
    burst(ctx, center, &core, plain) + burst(ctx, center, &shell, plain)
}

/// Four-lobed plasma discharge that slows as it spreads.
pub fn plasma_burst(ctx: &mut SpawnContext<'_>) -> usize {
    let center = ctx.point();
    let recipe = Burst {
        count: 100,
        angle: AngleProfile::Lobed { lobes: 4, spread: 0.5 },
        speed: SpeedProfile::Between(0.006, 0.014),
        palette: &palette::PLASMA,
        size: (3.0, 6.0),
        fade_speed: 0.006,
    };
    burst(ctx, center, &recipe, |p, _| p.with_motion(Drag { factor: 0.97 }))
}

/// Short-lived golden sparks that arc down.
pub fn sparkler(ctx: &mut SpawnContext<'_>) -> usize {
    let center = ctx.point();
    let recipe = Burst {
        count: 60,
        angle: AngleProfile::Uniform,
        speed: SpeedProfile::Between(0.002, 0.01),
        palette: &palette::SPARK,
        size: (2.0, 3.0),
        fade_speed: 0.02,
    };
    burst(ctx, center, &recipe, |p, _| p.with_motion(Ballistic { g: 0.0002, drag: 0.96 }))
}

/// Upward cone of gold that falls back under gravity.
pub fn gold_fountain(ctx: &mut SpawnContext<'_>) -> usize {
    let [x, _] = ctx.point();
    let recipe = Burst {
        count: 120,
        angle: AngleProfile::Cone {
            heading: FRAC_PI_2,
            spread: 0.35,
        },
        speed: SpeedProfile::Between(0.01, 0.018),
        palette: &palette::GOLD,
        size: (2.0, 4.0),
        fade_speed: 0.004,
    };
    burst(ctx, [x, -0.9], &recipe, |p, _| p.with_motion(Ballistic { g: 0.0003, drag: 1.0 }))
}

/// Three concentric rings at different speeds.
pub fn ripple(ctx: &mut SpawnContext<'_>) -> usize {
    let center = ctx.point();
    let mut emitted = 0;
    for ring in 1..=3u8 {
        let recipe = Burst {
            count: 48,
            angle: AngleProfile::Even { jitter: 0.0 },
            speed: SpeedProfile::Fixed(0.003 * f32::from(ring)),
            palette: &[palette::AQUA],
            size: (3.0, 3.0),
            fade_speed: 0.006,
        };
        emitted += burst(ctx, center, &recipe, plain);
    }
    emitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SpawnOrigin;
    use ffcts_core::{seeded_rng, ParticleField, Viewport};

    fn speed_corrected(p: &Particle, aspect: f32) -> f32 {
        (p.velocity[0] * aspect).hypot(p.velocity[1])
    }

    #[test]
    fn test_orange_burst_recipe() {
        let mut field = ParticleField::new();
        let mut rng = seeded_rng(11);
        let viewport = Viewport::new(1920, 1080);
        let mut ctx = SpawnContext::new(&mut field, &mut rng, viewport, SpawnOrigin::at(0.1, 0.2));

        assert_eq!(orange_burst(&mut ctx), 80);
        assert_eq!(field.len(), 80);
        for p in field.iter() {
            assert_eq!(p.position, [0.1, 0.2]);
            assert!((p.life - 1.0).abs() < f32::EPSILON);
            assert!(speed_corrected(p, viewport.aspect()) <= 0.01 + 1e-6);
            assert!((3.0..5.0).contains(&p.size));
        }
    }

    #[test]
    fn test_shock_ring_has_constant_speed() {
        let mut field = ParticleField::new();
        let mut rng = seeded_rng(2);
        let viewport = Viewport::new(1000, 500);
        let mut ctx = SpawnContext::new(&mut field, &mut rng, viewport, SpawnOrigin::random());

        shock_ring(&mut ctx);
        for p in field.iter() {
            assert!((speed_corrected(p, 2.0) - 0.012).abs() < 1e-5);
        }
    }

    #[test]
    fn test_fountain_goes_up() {
        let mut field = ParticleField::new();
        let mut rng = seeded_rng(2);
        let mut ctx = SpawnContext::new(&mut field, &mut rng, Viewport::default(), SpawnOrigin::random());

        gold_fountain(&mut ctx);
        assert!(field.iter().all(|p| p.velocity[1] > 0.0 && p.has_motion()));
    }

    #[test]
    fn test_multi_ring_counts() {
        let mut field = ParticleField::new();
        let mut rng = seeded_rng(2);
        let mut ctx = SpawnContext::new(&mut field, &mut rng, Viewport::default(), SpawnOrigin::random());
        assert_eq!(nova(&mut ctx), 180);
        assert_eq!(ripple(&mut ctx), 144);
    }
}
