//! # Spawn Context
//!
//! Everything a generator may touch during one invocation: the field it
//! appends to, the RNG, the viewport as of *this* call, and the current
//! spawn origin handed over by the scheduler.

use std::f32::consts::TAU;

use ffcts_core::{Particle, ParticleField, SimRng, Viewport};
use rand::Rng;

/// Where point-based effects should appear.
///
/// Owned by the spawn timer; read once by the next generator call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpawnOrigin {
    /// Fixed spawn point in normalized coordinates, or `None` for random.
    pub center: Option<[f32; 2]>,
}

impl SpawnOrigin {
    /// Let each generator pick its own random point.
    #[must_use]
    pub const fn random() -> Self {
        Self { center: None }
    }

    /// Spawn point-based effects at `(x, y)`.
    #[must_use]
    pub const fn at(x: f32, y: f32) -> Self {
        Self { center: Some([x, y]) }
    }
}

/// Inputs for one generator invocation.
pub struct SpawnContext<'a> {
    /// The live collection; generators only append.
    pub field: &'a mut ParticleField,
    /// Generator RNG.
    pub rng: &'a mut SimRng,
    /// Surface dimensions at the time of the call.
    pub viewport: Viewport,
    /// Spawn point hint.
    pub origin: SpawnOrigin,
    emitted: usize,
}

impl<'a> SpawnContext<'a> {
    /// Creates a context for a single generator call.
    pub fn new(
        field: &'a mut ParticleField,
        rng: &'a mut SimRng,
        viewport: Viewport,
        origin: SpawnOrigin,
    ) -> Self {
        Self {
            field,
            rng,
            viewport,
            origin,
            emitted: 0,
        }
    }

    /// `width / height` of the current viewport.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.viewport.aspect()
    }

    /// Appends a particle to the field.
    pub fn emit(&mut self, particle: Particle) {
        self.field.push(particle);
        self.emitted += 1;
    }

    /// Particles appended through this context so far.
    #[must_use]
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// The origin point if one was handed in, else uniform in `[-1, 1]²`.
    pub fn point(&mut self) -> [f32; 2] {
        match self.origin.center {
            Some(center) => center,
            None => [self.signed(), self.signed()],
        }
    }

    /// Uniform in `[lo, hi)`. Returns `lo` for an empty range.
    pub fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        if hi > lo {
            self.rng.gen_range(lo..hi)
        } else {
            lo
        }
    }

    /// Uniform in `[0, 1)`.
    pub fn unit(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    /// Uniform in `[-1, 1)`.
    pub fn signed(&mut self) -> f32 {
        self.rng.gen::<f32>() * 2.0 - 1.0
    }

    /// Uniform angle in `[0, 2π)`.
    pub fn angle(&mut self) -> f32 {
        self.rng.gen::<f32>() * TAU
    }

    /// Either `1.0` or `-1.0`.
    pub fn sign(&mut self) -> f32 {
        if self.rng.gen::<bool>() {
            1.0
        } else {
            -1.0
        }
    }

    /// Uniform index in `[0, len)`; `len` must be non-zero.
    pub fn index(&mut self, len: u32) -> u32 {
        self.rng.gen_range(0..len)
    }

    /// Uniformly picks one entry of a non-empty palette.
    pub fn pick<T: Copy>(&mut self, palette: &[T]) -> T {
        palette[self.rng.gen_range(0..palette.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffcts_core::seeded_rng;

    #[test]
    fn test_point_prefers_origin() {
        let mut field = ParticleField::new();
        let mut rng = seeded_rng(5);
        let mut ctx = SpawnContext::new(&mut field, &mut rng, Viewport::default(), SpawnOrigin::at(0.25, -0.5));
        assert_eq!(ctx.point(), [0.25, -0.5]);
    }

    #[test]
    fn test_random_point_is_in_range() {
        let mut field = ParticleField::new();
        let mut rng = seeded_rng(5);
        let mut ctx = SpawnContext::new(&mut field, &mut rng, Viewport::default(), SpawnOrigin::random());
        for _ in 0..1000 {
            let [x, y] = ctx.point();
            assert!((-1.0..1.0).contains(&x));
            assert!((-1.0..1.0).contains(&y));
        }
    }

    #[test]
    fn test_emit_counts_and_appends() {
        let mut field = ParticleField::new();
        let mut rng = seeded_rng(5);
        {
            let mut ctx = SpawnContext::new(&mut field, &mut rng, Viewport::default(), SpawnOrigin::random());
            ctx.emit(Particle::new([0.0, 0.0], [0.0, 0.0]));
            ctx.emit(Particle::new([0.0, 0.0], [0.0, 0.0]));
            assert_eq!(ctx.emitted(), 2);
        }
        assert_eq!(field.len(), 2);
    }

    #[test]
    fn test_uniform_empty_range() {
        let mut field = ParticleField::new();
        let mut rng = seeded_rng(5);
        let mut ctx = SpawnContext::new(&mut field, &mut rng, Viewport::default(), SpawnOrigin::random());
        assert!((ctx.uniform(3.0, 3.0) - 3.0).abs() < f32::EPSILON);
    }
}
