//! # Particle Renderer
//!
//! One square per particle, painted with a rectangle clear at the pixel the
//! particle's normalized position maps to. The square's top-left corner
//! sits on that pixel. Particles are painted in collection order, so later
//! ones cover earlier ones.

use std::time::Instant;

use ffcts_core::{Particle, Viewport};
use tracing::trace;

use crate::config::RenderConfig;
use crate::surface::{PixelRect, Surface};

/// Per-frame draw statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderStats {
    /// Particles that touched at least one pixel.
    pub drawn: u32,
    /// Particles entirely outside the surface.
    pub clipped: u32,
    /// Particles whose size truncates to zero pixels.
    pub empty: u32,
    /// CPU time spent drawing, in milliseconds.
    pub draw_time_ms: f32,
}

impl RenderStats {
    /// Particles handed to the renderer.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.drawn + self.clipped + self.empty
    }
}

/// Final RGBA for a particle.
///
/// Without an explicit alpha the display alpha is `max(0, life)` and RGB is
/// premultiplied by it, so fading particles go dark. An explicit alpha is
/// used as given and RGB is left alone.
#[must_use]
pub fn display_color(p: &Particle) -> [f32; 4] {
    let [r, g, b] = p.color.rgb;
    match p.color.alpha {
        Some(a) => [r, g, b, a],
        None => {
            let a = p.life.max(0.0);
            [r * a, g * a, b * a, a]
        }
    }
}

/// Pixel square covered by a particle on `viewport`.
///
/// Coordinates and size truncate toward zero.
#[must_use]
pub fn pixel_rect(p: &Particle, viewport: Viewport) -> PixelRect {
    let [x, y] = viewport.to_pixel(p.position);
    let edge = if p.size.is_finite() && p.size > 0.0 {
        p.size as u32
    } else {
        0
    };
    PixelRect {
        x: x as i32,
        y: y as i32,
        width: edge,
        height: edge,
    }
}

/// Paints particles onto a [`Surface`].
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Creates a renderer.
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Clears the whole surface to the background color.
    pub fn begin_frame<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear(self.config.background);
    }

    /// Paints `particles` in order. Does not clear first.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, particles: &[Particle]) -> RenderStats {
        let start = Instant::now();
        let viewport = surface.viewport();
        let mut stats = RenderStats::default();

        for p in particles {
            let rect = pixel_rect(p, viewport);
            if rect.width == 0 {
                stats.empty += 1;
                continue;
            }
            if surface.clear_rect(rect, display_color(p), self.config.blend) {
                stats.drawn += 1;
            } else {
                stats.clipped += 1;
            }
        }

        stats.draw_time_ms = start.elapsed().as_secs_f32() * 1000.0;
        trace!(
            drawn = stats.drawn,
            clipped = stats.clipped,
            empty = stats.empty,
            "frame drawn"
        );
        stats
    }

    /// `begin_frame` followed by `draw`.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, particles: &[Particle]) -> RenderStats {
        self.begin_frame(surface);
        self.draw(surface, particles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffcts_core::Color;

    #[test]
    fn test_premultiplied_alpha() {
        let p = Particle::new([0.0, 0.0], [0.0, 0.0])
            .with_life(0.5)
            .with_fade_speed(0.005)
            .with_color([1.0, 0.0, 0.0]);
        assert_eq!(display_color(&p), [0.5, 0.0, 0.0, 0.5]);
    }

    #[test]
    fn test_explicit_alpha_is_authoritative() {
        let p = Particle::new([0.0, 0.0], [0.0, 0.0])
            .with_life(0.2)
            .with_color(Color::rgba(1.0, 0.5, 0.0, 0.3));
        assert_eq!(display_color(&p), [1.0, 0.5, 0.0, 0.3]);
    }

    #[test]
    fn test_negative_life_is_transparent_black() {
        let p = Particle::new([0.0, 0.0], [0.0, 0.0])
            .with_life(-0.001)
            .with_color([0.3, 0.6, 0.9]);
        assert_eq!(display_color(&p), [0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_pixel_rect_truncates() {
        let viewport = Viewport::new(101, 101);
        let p = Particle::new([0.0, 0.0], [0.0, 0.0]).with_size(3.9);
        // 50.5 -> 50, 3.9 -> 3
        assert_eq!(
            pixel_rect(&p, viewport),
            PixelRect { x: 50, y: 50, width: 3, height: 3 }
        );
    }

    #[test]
    fn test_corners_map_to_edges() {
        let viewport = Viewport::new(200, 100);
        let top_left = Particle::new([-1.0, 1.0], [0.0, 0.0]);
        let bottom_right = Particle::new([1.0, -1.0], [0.0, 0.0]);
        assert_eq!(pixel_rect(&top_left, viewport).x, 0);
        assert_eq!(pixel_rect(&top_left, viewport).y, 0);
        assert_eq!(pixel_rect(&bottom_right, viewport).x, 200);
        assert_eq!(pixel_rect(&bottom_right, viewport).y, 100);
    }

    #[test]
    fn test_bad_sizes_paint_nothing() {
        let viewport = Viewport::new(10, 10);
        for size in [-3.0, 0.5, f32::NAN] {
            let p = Particle::new([0.0, 0.0], [0.0, 0.0]).with_size(size);
            assert_eq!(pixel_rect(&p, viewport).width, 0);
        }
    }
}
