//! # FFCTS Core
//!
//! The particle field and its per-frame simulation step.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        ONE FRAME                             │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Effect Generators ──append──► ParticleField                 │
//! │                                     │                        │
//! │                         step(): motion → fade → prune        │
//! │                                     │                        │
//! │                         Renderer reads retained particles    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Particles live in normalized device coordinates (`[-1, 1]` on both
//! axes). Nothing in this crate knows about pixels except [`Viewport`],
//! which the renderer and the aspect-corrected generators consult.

#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod field;
pub mod motion;
pub mod particle;
pub mod viewport;

pub use config::SimulationConfig;
pub use error::{CoreError, CoreResult, MotionError};
pub use field::{ParticleField, StepReport};
pub use motion::{MotionContext, MotionRule};
pub use particle::{Color, Particle, DEFAULT_SIZE};
pub use viewport::Viewport;

/// The one RNG type used for generators and motion rules.
///
/// ChaCha8 keeps replay deterministic across platforms for a given seed.
pub type SimRng = rand_chacha::ChaCha8Rng;

/// Creates a [`SimRng`] from a 64-bit seed.
#[must_use]
pub fn seeded_rng(seed: u64) -> SimRng {
    use rand::SeedableRng;
    SimRng::seed_from_u64(seed)
}
