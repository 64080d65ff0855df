//! # Drawing Surfaces
//!
//! A [`Surface`] only needs two primitives: clear everything, and clear a
//! rectangle. That is the whole drawing vocabulary of the renderer.
//!
//! Pixel row 0 is the top of the surface.

use ffcts_core::Viewport;

use crate::config::BlendMode;

/// Axis-aligned pixel rectangle. `x`/`y` may be negative or past the edge;
/// surfaces clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    /// Left column.
    pub x: i32,
    /// Top row.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelRect {
    /// Intersects with a `width` x `height` surface, returning
    /// `(x0, y0, x1, y1)` with exclusive ends, or `None` if nothing is left.
    #[must_use]
    pub fn clip(&self, width: u32, height: u32) -> Option<(usize, usize, usize, usize)> {
        let x0 = i64::from(self.x).max(0);
        let y0 = i64::from(self.y).max(0);
        let x1 = (i64::from(self.x) + i64::from(self.width)).min(i64::from(width));
        let y1 = (i64::from(self.y) + i64::from(self.height)).min(i64::from(height));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }
}

/// Something the renderer can paint into.
pub trait Surface {
    /// Current pixel dimensions.
    fn viewport(&self) -> Viewport;

    /// Changes the pixel dimensions. Contents are undefined afterwards.
    fn resize(&mut self, width: u32, height: u32);

    /// Fills the whole surface with `rgba`.
    fn clear(&mut self, rgba: [f32; 4]);

    /// Fills the clipped part of `rect` with `rgba`.
    ///
    /// Returns `false` if the rectangle lies entirely outside the surface.
    fn clear_rect(&mut self, rect: PixelRect, rgba: [f32; 4], blend: BlendMode) -> bool;
}

/// Converts a `[0, 1]` color to 8-bit channels.
#[must_use]
pub fn to_rgba8(rgba: [f32; 4]) -> [u8; 4] {
    rgba.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Software RGBA8 frame buffer, row-major from the top-left.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl PixelSurface {
    /// Creates a transparent black surface. Zero dimensions become 1.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![[0; 4]; width as usize * height as usize],
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at `(x, y)`, or `None` out of bounds.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// All pixels, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// The frame as tightly packed RGBA bytes, ready for upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Number of pixels that differ from `rgba`.
    #[must_use]
    pub fn count_not(&self, rgba: [u8; 4]) -> usize {
        self.pixels.iter().filter(|&&p| p != rgba).count()
    }
}

fn source_over(dst: [u8; 4], src: [f32; 4]) -> [u8; 4] {
    let a = src[3].clamp(0.0, 1.0);
    let d = dst.map(|c| f32::from(c) / 255.0);
    to_rgba8([
        src[0] * a + d[0] * (1.0 - a),
        src[1] * a + d[1] * (1.0 - a),
        src[2] * a + d[2] * (1.0 - a),
        a + d[3] * (1.0 - a),
    ])
}

impl Surface for PixelSurface {
    fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.pixels.clear();
        self.pixels.resize(self.width as usize * self.height as usize, [0; 4]);
    }

    fn clear(&mut self, rgba: [f32; 4]) {
        self.pixels.fill(to_rgba8(rgba));
    }

    fn clear_rect(&mut self, rect: PixelRect, rgba: [f32; 4], blend: BlendMode) -> bool {
        let Some((x0, y0, x1, y1)) = rect.clip(self.width, self.height) else {
            return false;
        };
        let stride = self.width as usize;
        match blend {
            BlendMode::Replace => {
                let value = to_rgba8(rgba);
                for row in y0..y1 {
                    self.pixels[row * stride + x0..row * stride + x1].fill(value);
                }
            }
            BlendMode::SourceOver => {
                for row in y0..y1 {
                    for px in &mut self.pixels[row * stride + x0..row * stride + x1] {
                        *px = source_over(*px, rgba);
                    }
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_negative_origin() {
        let rect = PixelRect { x: -2, y: -1, width: 4, height: 4 };
        assert_eq!(rect.clip(10, 10), Some((0, 0, 2, 3)));
    }

    #[test]
    fn test_clip_outside() {
        let rect = PixelRect { x: 10, y: 0, width: 4, height: 4 };
        assert_eq!(rect.clip(10, 10), None);
        let empty = PixelRect { x: 1, y: 1, width: 0, height: 4 };
        assert_eq!(empty.clip(10, 10), None);
    }

    #[test]
    fn test_clear_rect_replace_writes_alpha() {
        let mut surface = PixelSurface::new(8, 8);
        surface.clear([0.0, 0.0, 0.0, 1.0]);
        let rect = PixelRect { x: 2, y: 3, width: 2, height: 2 };

        assert!(surface.clear_rect(rect, [0.5, 0.0, 0.0, 0.5], BlendMode::Replace));

        assert_eq!(surface.pixel(2, 3), Some([128, 0, 0, 128]));
        assert_eq!(surface.pixel(3, 4), Some([128, 0, 0, 128]));
        assert_eq!(surface.pixel(4, 4), Some([0, 0, 0, 255]));
        assert_eq!(surface.count_not([0, 0, 0, 255]), 4);
    }

    #[test]
    fn test_source_over_blends() {
        let mut surface = PixelSurface::new(2, 2);
        surface.clear([0.0, 0.0, 1.0, 1.0]);
        let rect = PixelRect { x: 0, y: 0, width: 1, height: 1 };

        surface.clear_rect(rect, [1.0, 0.0, 0.0, 0.5], BlendMode::SourceOver);

        assert_eq!(surface.pixel(0, 0), Some([128, 0, 128, 255]));
    }

    #[test]
    fn test_bytes_are_packed_rgba() {
        let mut surface = PixelSurface::new(3, 2);
        surface.clear([1.0, 0.0, 0.0, 1.0]);
        let bytes = surface.as_bytes();
        assert_eq!(bytes.len(), 3 * 2 * 4);
        assert_eq!(&bytes[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_resize_reallocates() {
        let mut surface = PixelSurface::new(4, 4);
        surface.resize(10, 0);
        assert_eq!(surface.viewport(), Viewport::new(10, 1));
        assert_eq!(surface.pixels().len(), 10);
        assert_eq!(surface.pixel(9, 0), Some([0; 4]));
    }
}
