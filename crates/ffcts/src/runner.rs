//! # Headless Runner
//!
//! Drives an [`Engine`] with a [`FrameScheduler`] and an optional
//! [`SpawnTimer`] without a window. The clock is virtual by default: time
//! jumps straight to the next deadline, so a thousand frames take as long
//! as their CPU work.

use std::time::{Duration, Instant};

use ffcts_rendering::Surface;
use tracing::info;

use crate::engine::Engine;
use crate::error::AppResult;
use crate::scheduler::{Cadence, FrameScheduler, TARGET_FRAME_TIME};
use crate::spawner::SpawnTimer;

/// Frames between progress log lines.
const LOG_EVERY: u64 = 600;

/// How to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Frames to run.
    pub frames: u64,
    /// Time between frames.
    pub frame_interval: Duration,
    /// Sleep until each deadline instead of jumping to it.
    pub realtime: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            frames: 600,
            frame_interval: TARGET_FRAME_TIME,
            realtime: false,
        }
    }
}

/// What a run did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunSummary {
    /// Frames run.
    pub frames: u64,
    /// Spawn timer firings.
    pub effects_fired: u64,
    /// Particles the fired effects appended.
    pub particles_spawned: u64,
    /// Particles removed because their life ran out.
    pub pruned: u64,
    /// Particles removed because their motion rule failed.
    pub failed: u64,
    /// Largest live count seen after a frame.
    pub peak_particles: usize,
    /// Live count at the end.
    pub final_particles: usize,
    /// Mean CPU time per frame in milliseconds.
    pub avg_frame_ms: f32,
}

/// Runs `options.frames` frames, firing `timer` on its own interval.
///
/// # Errors
///
/// Returns [`crate::AppError::InvalidConfig`] for a zero frame interval.
pub fn run<S: Surface>(
    engine: &mut Engine<S>,
    mut timer: Option<(&mut SpawnTimer, Duration)>,
    options: RunOptions,
) -> AppResult<RunSummary> {
    let start = Instant::now();
    let spawn_interval = timer.as_ref().map(|(_, interval)| *interval);
    let mut scheduler = FrameScheduler::new(Cadence::Fixed(options.frame_interval), spawn_interval, start)?;

    let mut summary = RunSummary::default();
    let mut frame_time_total = 0.0_f64;
    let mut now = start;

    while summary.frames < options.frames {
        let due = scheduler.poll(now);

        if due.spawn {
            if let Some((timer, _)) = timer.as_mut() {
                let (kind, origin) = timer.fire();
                summary.particles_spawned += engine.spawn_at(kind, origin) as u64;
                summary.effects_fired += 1;
            }
        }

        if due.frame {
            let result = engine.frame(now);
            summary.frames += 1;
            summary.pruned += result.pruned as u64;
            summary.failed += result.failed as u64;
            summary.peak_particles = summary.peak_particles.max(result.retained);
            frame_time_total += f64::from(result.total_time_ms);

            if summary.frames % LOG_EVERY == 0 {
                info!(
                    frame = result.frame,
                    live = result.retained,
                    drawn = result.painted.drawn,
                    "progress"
                );
            }
        }

        let Some(next) = scheduler.next_deadline() else {
            break;
        };
        if options.realtime {
            std::thread::sleep(next.saturating_duration_since(Instant::now()));
            now = Instant::now();
        } else {
            now = next;
        }
    }

    summary.final_particles = engine.particle_count();
    if summary.frames > 0 {
        summary.avg_frame_ms = (frame_time_total / summary.frames as f64) as f32;
    }

    info!(
        frames = summary.frames,
        effects = summary.effects_fired,
        spawned = summary.particles_spawned,
        peak = summary.peak_particles,
        live = summary.final_particles,
        avg_frame_ms = summary.avg_frame_ms,
        "run finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawner::SpawnerConfig;
    use ffcts_core::SimulationConfig;
    use ffcts_effects::EffectKind;
    use ffcts_rendering::{PixelSurface, RenderConfig};

    fn engine() -> Engine<PixelSurface> {
        Engine::new(PixelSurface::new(160, 90), SimulationConfig::default(), RenderConfig::default())
            .unwrap()
    }

    #[test]
    fn test_runs_exact_frame_count_without_timer() {
        let mut engine = engine();
        let options = RunOptions {
            frames: 25,
            ..RunOptions::default()
        };
        let summary = run(&mut engine, None, options).unwrap();
        assert_eq!(summary.frames, 25);
        assert_eq!(summary.effects_fired, 0);
        assert_eq!(engine.frame_count(), 25);
    }

    #[test]
    fn test_timer_fires_on_its_interval() {
        let mut engine = engine();
        let config = SpawnerConfig {
            effects: vec![EffectKind::OrangeBurst],
            ..SpawnerConfig::default()
        };
        let mut timer = SpawnTimer::new(&config).unwrap();
        let options = RunOptions {
            frames: 100,
            frame_interval: Duration::from_millis(10),
            realtime: false,
        };

        // 100 frames at 10ms span 990ms: firings at 250, 500 and 750ms
        let summary = run(&mut engine, Some((&mut timer, Duration::from_millis(250))), options).unwrap();
        assert_eq!(summary.frames, 100);
        assert_eq!(summary.effects_fired, 3);
        assert_eq!(summary.particles_spawned, 240);
        assert!(summary.peak_particles > 0);
    }

    #[test]
    fn test_zero_frame_interval_is_an_error() {
        let mut engine = engine();
        let options = RunOptions {
            frame_interval: Duration::ZERO,
            ..RunOptions::default()
        };
        assert!(run(&mut engine, None, options).is_err());
    }
}
