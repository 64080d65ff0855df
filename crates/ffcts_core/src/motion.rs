//! # Motion Rules
//!
//! A motion rule replaces the default `position += velocity` update for a
//! single particle. Rules are small strategy objects built by a generator
//! and stored in the particle they drive; they carry whatever per-effect
//! constants and per-particle state they need (gravity, orbit angle, phase).
//!
//! A rule may rewrite any field of its particle, including resetting it in
//! place to loop forever.

use std::fmt;

use crate::error::MotionError;
use crate::particle::Particle;
use crate::SimRng;

/// Per-frame inputs shared by every motion rule.
pub struct MotionContext<'a> {
    /// Wall-clock time in milliseconds, for time-driven wobble and phase.
    pub time_ms: f64,
    /// Frame counter.
    pub frame: u64,
    /// RNG for rules that re-randomize themselves (respawn, jitter).
    pub rng: &'a mut SimRng,
}

impl<'a> MotionContext<'a> {
    /// Creates a context for one simulation step.
    pub fn new(time_ms: f64, frame: u64, rng: &'a mut SimRng) -> Self {
        Self { time_ms, frame, rng }
    }
}

impl fmt::Debug for MotionContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MotionContext")
            .field("time_ms", &self.time_ms)
            .field("frame", &self.frame)
            .finish_non_exhaustive()
    }
}

/// Custom per-particle update.
pub trait MotionRule: fmt::Debug + Send {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Advances `particle` by one frame.
    ///
    /// The particle's life is decremented by the simulation step afterwards;
    /// rules must not do it themselves.
    ///
    /// # Errors
    ///
    /// A rule that cannot continue returns [`MotionError`]; the step drops
    /// only this particle.
    fn advance(&mut self, particle: &mut Particle, ctx: &mut MotionContext<'_>) -> Result<(), MotionError>;
}
