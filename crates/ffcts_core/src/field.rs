//! # Particle Field
//!
//! The live collection and the simulation step that owns it.
//!
//! Generators only append. The renderer only reads. [`ParticleField::step`]
//! is the only place particles change or disappear.

use tracing::warn;

use crate::config::SimulationConfig;
use crate::motion::MotionContext;
use crate::particle::Particle;

/// Outcome of one simulation step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Particles kept for this frame's render and the next step.
    pub retained: usize,
    /// Particles dropped because their life fell past the prune threshold.
    pub pruned: usize,
    /// Particles dropped because their motion rule failed.
    pub failed: usize,
}

/// Insertion-ordered set of live particles.
#[derive(Debug, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
    /// Total particles ever appended.
    spawned_total: u64,
}

impl ParticleField {
    /// Creates an empty field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty field with room for `capacity` particles.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            spawned_total: 0,
        }
    }

    /// Appends one particle.
    pub fn push(&mut self, particle: Particle) {
        self.spawned_total += 1;
        self.particles.push(particle);
    }

    /// Appends a batch in order.
    pub fn extend(&mut self, batch: impl IntoIterator<Item = Particle>) {
        let before = self.particles.len();
        self.particles.extend(batch);
        self.spawned_total += (self.particles.len() - before) as u64;
    }

    /// Number of live particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// True when no particle is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Total particles ever appended.
    #[must_use]
    pub fn spawned_total(&self) -> u64 {
        self.spawned_total
    }

    /// Live particles in insertion order (paint order).
    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    /// Live particles as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    /// Drops every particle.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Advances every particle by one frame and prunes the expired ones.
    ///
    /// Per particle:
    /// 1. Run its motion rule, or `position += velocity` without one.
    /// 2. Subtract its fade speed (or `config.default_fade_rate`) from life.
    /// 3. Keep it iff `life > -fade`, where `fade` is the amount just subtracted.
    ///
    /// The threshold sits one fade step below zero, so every particle gets
    /// one frame rendered at zero alpha before it goes. A failing motion rule
    /// removes only its own particle. Relative order of the survivors is kept.
    pub fn step(&mut self, config: &SimulationConfig, ctx: &mut MotionContext<'_>) -> StepReport {
        let mut report = StepReport::default();
        let default_fade = config.default_fade_rate;

        self.particles.retain_mut(|particle| {
            if let Err(err) = particle.advance(ctx) {
                warn!(
                    rule = particle.motion_name(),
                    error = %err,
                    "Dropping particle after motion rule failure"
                );
                report.failed += 1;
                return false;
            }

            let fade = particle.fade_or(default_fade);
            particle.life -= fade;

            if particle.life > -fade {
                report.retained += 1;
                true
            } else {
                report.pruned += 1;
                false
            }
        });

        report
    }
}

impl<'a> IntoIterator for &'a ParticleField {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MotionError;
    use crate::motion::MotionRule;
    use crate::seeded_rng;

    #[derive(Debug)]
    struct FailAfter(u32);

    impl MotionRule for FailAfter {
        fn name(&self) -> &'static str {
            "fail_after"
        }

        fn advance(&mut self, _p: &mut Particle, _ctx: &mut MotionContext<'_>) -> Result<(), MotionError> {
            if self.0 == 0 {
                return Err(MotionError::Rule("exhausted".into()));
            }
            self.0 -= 1;
            Ok(())
        }
    }

    fn step_once(field: &mut ParticleField, config: &SimulationConfig) -> StepReport {
        let mut rng = seeded_rng(3);
        let mut ctx = MotionContext::new(0.0, 0, &mut rng);
        field.step(config, &mut ctx)
    }

    #[test]
    fn test_default_fade_applies_without_override() {
        let config = SimulationConfig::default();
        let mut field = ParticleField::new();
        field.push(Particle::new([0.0, 0.0], [0.0, 0.0]));

        step_once(&mut field, &config);

        let life = field.iter().next().unwrap().life;
        assert!((life - (1.0 - config.default_fade_rate)).abs() < 1e-6);
    }

    #[test]
    fn test_particle_fade_overrides_default() {
        let config = SimulationConfig::default();
        let mut field = ParticleField::new();
        field.push(Particle::new([0.0, 0.0], [0.0, 0.0]).with_fade_speed(0.25));

        step_once(&mut field, &config);

        assert!((field.iter().next().unwrap().life - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_failing_rule_drops_only_its_particle() {
        let config = SimulationConfig::default();
        let mut field = ParticleField::new();
        field.push(Particle::new([0.0, 0.0], [0.0, 0.0]).with_life(0.1));
        field.push(Particle::new([0.0, 0.0], [0.0, 0.0]).with_motion(FailAfter(1)));
        field.push(Particle::new([0.5, 0.0], [0.0, 0.0]).with_life(0.2));

        let first = step_once(&mut field, &config);
        assert_eq!(first, StepReport { retained: 3, pruned: 0, failed: 0 });

        let second = step_once(&mut field, &config);
        assert_eq!(second.failed, 1);
        assert_eq!(field.len(), 2);
        assert!(field.iter().all(|p| !p.has_motion()));
    }

    #[test]
    fn test_spawned_total_counts_batches() {
        let mut field = ParticleField::with_capacity(8);
        field.push(Particle::new([0.0, 0.0], [0.0, 0.0]));
        field.extend((0..4).map(|_| Particle::new([0.0, 0.0], [0.0, 0.0])));
        assert_eq!(field.len(), 5);
        assert_eq!(field.spawned_total(), 5);

        field.clear();
        assert!(field.is_empty());
        assert_eq!(field.spawned_total(), 5);
    }
}
