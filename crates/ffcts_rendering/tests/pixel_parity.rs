//! # Pixel Parity
//!
//! Frame-level rendering behaviour: anchoring, paint order, resize, and
//! the one transparent frame a particle gets before it is pruned.

use ffcts_core::{seeded_rng, MotionContext, Particle, ParticleField, SimulationConfig};
use ffcts_rendering::{PixelSurface, RenderConfig, Renderer, Surface};

const BLACK: [u8; 4] = [0, 0, 0, 255];

fn state(p: &Particle) -> ([f32; 2], [f32; 2], f32) {
    (p.position, p.velocity, p.life)
}

fn renderer() -> Renderer {
    Renderer::new(RenderConfig::default())
}

/// Test: the square hangs down and right from the mapped pixel.
#[test]
fn test_top_left_anchoring() {
    let mut surface = PixelSurface::new(100, 100);
    let particles = [Particle::new([0.0, 0.0], [0.0, 0.0]).with_color([1.0, 1.0, 1.0])];

    let stats = renderer().render(&mut surface, &particles);

    assert_eq!(stats.drawn, 1);
    assert_eq!(surface.pixel(50, 50), Some([255, 255, 255, 255]));
    assert_eq!(surface.pixel(53, 53), Some([255, 255, 255, 255]));
    assert_eq!(surface.pixel(54, 54), Some(BLACK));
    assert_eq!(surface.pixel(49, 49), Some(BLACK));
    assert_eq!(surface.count_not(BLACK), 16);
}

/// Test: positive normalized y is near the top row.
#[test]
fn test_y_axis_points_up() {
    let mut surface = PixelSurface::new(100, 100);
    let particles = [Particle::new([0.0, 0.9], [0.0, 0.0]).with_size(3.0)];

    renderer().render(&mut surface, &particles);

    assert_ne!(surface.pixel(50, 5), Some(BLACK));
    assert_eq!(surface.pixel(50, 94), Some(BLACK));
}

/// Test: later particles cover earlier ones where they overlap.
#[test]
fn test_later_particles_paint_over() {
    let mut surface = PixelSurface::new(128, 128);
    // Second square starts two pixels right of the first
    let particles = [
        Particle::new([0.0, 0.0], [0.0, 0.0]).with_color([1.0, 0.0, 0.0]),
        Particle::new([0.031_25, 0.0], [0.0, 0.0]).with_color([0.0, 0.0, 1.0]),
    ];

    renderer().render(&mut surface, &particles);

    assert_eq!(surface.pixel(65, 64), Some([255, 0, 0, 255]));
    assert_eq!(surface.pixel(66, 64), Some([0, 0, 255, 255]));
    assert_eq!(surface.pixel(69, 64), Some([0, 0, 255, 255]));
}

/// Test: every frame starts from opaque black.
#[test]
fn test_frame_clears_previous_contents() {
    let mut surface = PixelSurface::new(50, 50);
    let r = renderer();
    r.render(&mut surface, &[Particle::new([0.0, 0.0], [0.0, 0.0])]);
    assert!(surface.count_not(BLACK) > 0);

    r.render(&mut surface, &[]);
    assert_eq!(surface.count_not(BLACK), 0);
}

/// Test: resizing changes only the pixel mapping, never particle state.
#[test]
fn test_resize_mid_flight() {
    let config = SimulationConfig::default();
    let mut field = ParticleField::new();
    field.push(Particle::new([0.5, -0.5], [0.01, 0.02]).with_size(2.0));
    let mut rng = seeded_rng(1);
    let mut surface = PixelSurface::new(100, 100);
    let r = renderer();

    let mut ctx = MotionContext::new(0.0, 0, &mut rng);
    field.step(&config, &mut ctx);
    r.render(&mut surface, field.as_slice());
    let before = state(&field.as_slice()[0]);
    assert_ne!(surface.pixel(75, 74), Some(BLACK));

    surface.resize(400, 200);
    assert_eq!(state(&field.as_slice()[0]), before);

    r.render(&mut surface, field.as_slice());
    // (0.51, -0.48) lands around (302, 148)
    assert_ne!(surface.pixel(302, 148), Some(BLACK));
    assert_eq!(surface.count_not(BLACK), 4);
}

/// Test: a particle just past zero life is painted once as transparent black.
#[test]
fn test_boundary_frame_is_transparent() {
    let config = SimulationConfig::default();
    let mut field = ParticleField::new();
    field.push(
        Particle::new([0.0, 0.0], [0.0, 0.0])
            .with_life(0.004)
            .with_fade_speed(0.005)
            .with_color([1.0, 1.0, 1.0]),
    );
    let mut rng = seeded_rng(1);
    let mut surface = PixelSurface::new(20, 20);
    let r = renderer();

    let mut ctx = MotionContext::new(0.0, 0, &mut rng);
    let report = field.step(&config, &mut ctx);
    assert_eq!(report.retained, 1);
    r.render(&mut surface, field.as_slice());
    assert_eq!(surface.pixel(10, 10), Some([0, 0, 0, 0]));

    let mut ctx = MotionContext::new(16.0, 1, &mut rng);
    let report = field.step(&config, &mut ctx);
    assert_eq!(report.pruned, 1);
    assert!(field.is_empty());
}
