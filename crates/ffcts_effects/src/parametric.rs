//! # Parametric Shapes
//!
//! Every particle leaves the spawn point along a direction sampled from a
//! closed curve. Under drag the cloud expands and settles into the curve's
//! silhouette.

use std::f32::consts::{PI, TAU};

use ffcts_core::Particle;

use crate::context::SpawnContext;
use crate::palette;
use crate::rules::Drag;

/// Shared recipe for shape bursts.
#[derive(Debug, Clone, Copy)]
pub struct Outline<'p> {
    /// Particles per call.
    pub count: usize,
    /// Speed range `[lo, hi)` applied to the curve sample.
    pub speed: (f32, f32),
    /// Scale each sample to unit length before applying the speed.
    pub normalize: bool,
    /// Colors to pick from.
    pub palette: &'p [[f32; 3]],
    /// Size range in pixels.
    pub size: (f32, f32),
    /// Life decrement per frame.
    pub fade_speed: f32,
    /// Velocity multiplier per frame.
    pub drag: f32,
}

/// Emits `recipe.count` particles whose velocities follow `shape(i)`.
pub fn outline<F>(ctx: &mut SpawnContext<'_>, recipe: &Outline<'_>, mut shape: F) -> usize
where
    F: FnMut(usize, &mut SpawnContext<'_>) -> [f32; 2],
{
    let center = ctx.point();
    let aspect = ctx.aspect();

    for i in 0..recipe.count {
        let [mut dx, mut dy] = shape(i, ctx);
        if recipe.normalize {
            let len = dx.hypot(dy);
            if len > f32::EPSILON {
                dx /= len;
                dy /= len;
            }
        }
        let speed = ctx.uniform(recipe.speed.0, recipe.speed.1);
        let color = ctx.pick(recipe.palette);
        let size = ctx.uniform(recipe.size.0, recipe.size.1);
        ctx.emit(
            Particle::new(center, [dx * speed / aspect, dy * speed])
                .with_motion(Drag { factor: recipe.drag })
                .with_color(color)
                .with_size(size)
                .with_fade_speed(recipe.fade_speed),
        );
    }
    recipe.count
}

/// Point on the classic heart curve.
#[must_use]
pub fn heart(t: f32) -> [f32; 2] {
    [
        16.0 * t.sin().powi(3),
        13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos(),
    ]
}

/// Pink petals blown out in a heart.
pub fn cherry_bloom(ctx: &mut SpawnContext<'_>) -> usize {
    let recipe = Outline {
        count: 100,
        speed: (0.004, 0.01),
        normalize: true,
        palette: &palette::CHERRY,
        size: (3.0, 5.0),
        fade_speed: 0.004,
        drag: 0.98,
    };
    outline(ctx, &recipe, |_, ctx| heart(ctx.angle()))
}

/// Eight-petal rose, `r = cos(4θ)`.
pub fn rose_curve(ctx: &mut SpawnContext<'_>) -> usize {
    const COUNT: usize = 120;
    const K: f32 = 4.0;

    let recipe = Outline {
        count: COUNT,
        speed: (0.006, 0.007),
        normalize: false,
        palette: &palette::ROSE,
        size: (3.0, 4.0),
        fade_speed: 0.004,
        drag: 0.97,
    };
    outline(ctx, &recipe, |i, ctx| {
        let theta = i as f32 / COUNT as f32 * TAU + ctx.signed() * 0.01;
        let r = (K * theta).cos();
        [r * theta.cos(), r * theta.sin()]
    })
}

/// Expanding 3:2 Lissajous figure.
pub fn lissajous(ctx: &mut SpawnContext<'_>) -> usize {
    const COUNT: usize = 100;

    let recipe = Outline {
        count: COUNT,
        speed: (0.006, 0.0065),
        normalize: false,
        palette: &palette::LIME,
        size: (2.5, 3.5),
        fade_speed: 0.004,
        drag: 0.97,
    };
    outline(ctx, &recipe, |i, _| {
        let t = i as f32 / COUNT as f32 * TAU;
        [(3.0 * t + PI / 2.0).sin(), (2.0 * t).sin()]
    })
}

/// Temple Fay's butterfly curve.
pub fn butterfly(ctx: &mut SpawnContext<'_>) -> usize {
    const COUNT: usize = 150;
    // Upper bound of the curve radius, e + 2 + 1
    const EXTENT: f32 = 5.72;

    let recipe = Outline {
        count: COUNT,
        speed: (0.007, 0.0075),
        normalize: false,
        palette: &palette::BUTTERFLY,
        size: (2.5, 4.0),
        fade_speed: 0.004,
        drag: 0.97,
    };
    outline(ctx, &recipe, |i, _| {
        let t = i as f32 / COUNT as f32 * 12.0 * PI;
        let r = t.cos().exp() - 2.0 * (4.0 * t).cos() + (t / 12.0).sin().powi(5);
        [t.sin() * r / EXTENT, t.cos() * r / EXTENT]
    })
}

/// Five-pointed star outline.
pub fn star_shape(ctx: &mut SpawnContext<'_>) -> usize {
    const POINTS: usize = 5;
    const PER_EDGE: usize = 10;
    const INNER: f32 = 0.4;

    let vertex = |k: usize| {
        let angle = PI / 2.0 + k as f32 * PI / POINTS as f32;
        let r = if k % 2 == 0 { 1.0 } else { INNER };
        [angle.cos() * r, angle.sin() * r]
    };
    let recipe = Outline {
        count: POINTS * 2 * PER_EDGE,
        speed: (0.008, 0.0085),
        normalize: false,
        palette: &palette::STAR,
        size: (3.0, 4.0),
        fade_speed: 0.005,
        drag: 0.96,
    };
    outline(ctx, &recipe, |i, _| {
        let edge = i / PER_EDGE;
        let t = (i % PER_EDGE) as f32 / PER_EDGE as f32;
        let [ax, ay] = vertex(edge);
        let [bx, by] = vertex(edge + 1);
        [ax + (bx - ax) * t, ay + (by - ay) * t]
    })
}
