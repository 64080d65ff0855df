//! Surface dimensions and the normalized-to-pixel mapping.

/// Pixel dimensions of the drawable surface.
///
/// Generators read it for aspect correction on every call; the renderer
/// reads it for the pixel mapping. Resizing replaces the viewport and
/// leaves particle state alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Creates a viewport. Zero dimensions are clamped to one pixel.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// `width / height`.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// `height / width`.
    #[must_use]
    pub fn inverse_aspect(&self) -> f32 {
        self.height as f32 / self.width as f32
    }

    /// Maps a normalized position to pixel coordinates.
    ///
    /// `x = -1` is the left edge, `y = +1` is the top row.
    #[must_use]
    pub fn to_pixel(&self, position: [f32; 2]) -> [f32; 2] {
        let [x, y] = position;
        [
            (x + 1.0) / 2.0 * self.width as f32,
            (1.0 - (y + 1.0) / 2.0) * self.height as f32,
        ]
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners_map_to_edges() {
        let vp = Viewport::new(800, 600);
        assert_eq!(vp.to_pixel([-1.0, 1.0]), [0.0, 0.0]);
        assert_eq!(vp.to_pixel([1.0, -1.0]), [800.0, 600.0]);
        assert_eq!(vp.to_pixel([0.0, 0.0]), [400.0, 300.0]);
    }

    #[test]
    fn test_zero_size_is_clamped() {
        let vp = Viewport::new(0, 0);
        assert_eq!((vp.width, vp.height), (1, 1));
        assert!((vp.aspect() - 1.0).abs() < f32::EPSILON);
    }
}
