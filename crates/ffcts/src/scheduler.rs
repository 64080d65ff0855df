//! # Frame Scheduler
//!
//! Two cooperative tasks share the particle field: the frame task (clear,
//! step, render) and the spawn timer (fire the next effect). The scheduler
//! owns neither; it only answers "what is due now?" for the host loop that
//! does.
//!
//! ```text
//! host loop ──poll(now)──► FrameScheduler ──► Due { frame, spawn }
//!     │                         │
//!     │                   TaskHandle (frame) ──cancel()──► never due again
//!     │                   TaskHandle (spawn) ──cancel()──► never due again
//!     ▼
//! Engine::frame / SpawnTimer::fire
//! ```
//!
//! With [`Cadence::VSync`] the host's redraw signal drives every frame and
//! the frame task is due on every poll. With [`Cadence::Fixed`] it is due
//! once per interval. A host that falls behind gets one frame, not a burst
//! of catch-up frames.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{AppError, AppResult};

/// Target frame time for 60 FPS.
pub const TARGET_FRAME_TIME: Duration = Duration::from_micros(16_666);

/// What ticks the frame task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// The host's vertical refresh: due on every poll.
    VSync,
    /// Fixed interval between frames.
    Fixed(Duration),
}

impl Default for Cadence {
    fn default() -> Self {
        Self::Fixed(TARGET_FRAME_TIME)
    }
}

/// Cancels a scheduled task. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct TaskHandle {
    cancelled: Arc<AtomicBool>,
}

impl TaskHandle {
    /// Stops the task. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether [`cancel`](Self::cancel) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Tasks due at a poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Due {
    /// Run one frame.
    pub frame: bool,
    /// Fire the spawn timer.
    pub spawn: bool,
}

#[derive(Debug)]
struct Periodic {
    handle: TaskHandle,
    interval: Duration,
    next: Instant,
}

impl Periodic {
    fn new(interval: Duration, start: Instant) -> Self {
        Self {
            handle: TaskHandle::default(),
            interval,
            next: start,
        }
    }

    fn poll(&mut self, now: Instant) -> bool {
        if self.handle.is_cancelled() || now < self.next {
            return false;
        }
        self.next += self.interval;
        if self.next <= now {
            // Fell behind; resume from now instead of bursting
            self.next = now + self.interval;
        }
        true
    }

    fn deadline(&self) -> Option<Instant> {
        (!self.handle.is_cancelled()).then_some(self.next)
    }
}

fn check_interval(field: &'static str, interval: Duration) -> AppResult<()> {
    if interval.is_zero() {
        return Err(AppError::InvalidConfig {
            field,
            reason: "interval must be greater than zero".to_string(),
        });
    }
    Ok(())
}

/// Decides when the frame task and the spawn timer run.
#[derive(Debug)]
pub struct FrameScheduler {
    cadence: Cadence,
    vsync_frame: TaskHandle,
    fixed_frame: Option<Periodic>,
    spawn: Option<Periodic>,
}

impl FrameScheduler {
    /// Creates a scheduler starting at `start`.
    ///
    /// A fixed frame task is first due at `start`; the spawn timer, if any,
    /// first fires one interval later.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidConfig`] for a zero interval.
    pub fn new(cadence: Cadence, spawn_interval: Option<Duration>, start: Instant) -> AppResult<Self> {
        let fixed_frame = match cadence {
            Cadence::VSync => None,
            Cadence::Fixed(interval) => {
                check_interval("scheduler.frame_interval", interval)?;
                Some(Periodic::new(interval, start))
            }
        };
        let spawn = match spawn_interval {
            Some(interval) => {
                check_interval("spawner.interval_ms", interval)?;
                Some(Periodic::new(interval, start + interval))
            }
            None => None,
        };

        Ok(Self {
            cadence,
            vsync_frame: TaskHandle::default(),
            fixed_frame,
            spawn,
        })
    }

    /// Frame cadence.
    #[must_use]
    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    /// Handle cancelling the frame task.
    #[must_use]
    pub fn frame_handle(&self) -> TaskHandle {
        match &self.fixed_frame {
            Some(task) => task.handle.clone(),
            None => self.vsync_frame.clone(),
        }
    }

    /// Handle cancelling the spawn timer, if there is one.
    #[must_use]
    pub fn spawn_handle(&self) -> Option<TaskHandle> {
        self.spawn.as_ref().map(|task| task.handle.clone())
    }

    /// Cancels both tasks.
    pub fn stop(&self) {
        self.frame_handle().cancel();
        if let Some(handle) = self.spawn_handle() {
            handle.cancel();
        }
    }

    /// False once the frame task is cancelled.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.frame_handle().is_cancelled()
    }

    /// Reports which tasks are due at `now` and advances their deadlines.
    pub fn poll(&mut self, now: Instant) -> Due {
        let frame = match &mut self.fixed_frame {
            Some(task) => task.poll(now),
            None => !self.vsync_frame.is_cancelled(),
        };
        let spawn = self.spawn.as_mut().is_some_and(|task| task.poll(now));
        Due { frame, spawn }
    }

    /// Earliest upcoming deadline of the timed tasks still running.
    ///
    /// `None` when nothing is timed: a vsync frame task without a spawn
    /// timer, or everything cancelled.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        let frame = self.fixed_frame.as_ref().and_then(Periodic::deadline);
        let spawn = self.spawn.as_ref().and_then(Periodic::deadline);
        match (frame, spawn) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_fixed_cadence_ticks_once_per_interval() {
        let start = Instant::now();
        let mut scheduler = FrameScheduler::new(Cadence::Fixed(10 * MS), None, start).unwrap();

        assert!(scheduler.poll(start).frame);
        assert!(!scheduler.poll(start + 5 * MS).frame);
        assert!(scheduler.poll(start + 10 * MS).frame);
        assert!(!scheduler.poll(start + 10 * MS).frame);
    }

    #[test]
    fn test_late_host_gets_one_frame_not_a_burst() {
        let start = Instant::now();
        let mut scheduler = FrameScheduler::new(Cadence::Fixed(10 * MS), None, start).unwrap();
        assert!(scheduler.poll(start).frame);

        let late = start + 95 * MS;
        assert!(scheduler.poll(late).frame);
        assert!(!scheduler.poll(late).frame);
        assert_eq!(scheduler.next_deadline(), Some(late + 10 * MS));
    }

    #[test]
    fn test_vsync_is_due_every_poll() {
        let start = Instant::now();
        let mut scheduler = FrameScheduler::new(Cadence::VSync, None, start).unwrap();
        assert!(scheduler.poll(start).frame);
        assert!(scheduler.poll(start).frame);
        assert_eq!(scheduler.next_deadline(), None);
    }

    #[test]
    fn test_spawn_timer_waits_one_interval() {
        let start = Instant::now();
        let mut scheduler =
            FrameScheduler::new(Cadence::VSync, Some(100 * MS), start).unwrap();

        assert!(!scheduler.poll(start).spawn);
        assert!(!scheduler.poll(start + 99 * MS).spawn);
        assert!(scheduler.poll(start + 100 * MS).spawn);
        assert_eq!(scheduler.next_deadline(), Some(start + 200 * MS));
    }

    #[test]
    fn test_cancelled_frame_task_stays_quiet() {
        let start = Instant::now();
        for cadence in [Cadence::VSync, Cadence::Fixed(MS)] {
            let mut scheduler = FrameScheduler::new(cadence, None, start).unwrap();
            let handle = scheduler.frame_handle();
            handle.clone().cancel();

            assert!(handle.is_cancelled());
            assert!(!scheduler.is_running());
            for i in 0..10 {
                assert!(!scheduler.poll(start + i * MS).frame);
            }
        }
    }

    #[test]
    fn test_stop_cancels_both() {
        let start = Instant::now();
        let mut scheduler =
            FrameScheduler::new(Cadence::Fixed(MS), Some(MS), start).unwrap();
        scheduler.stop();

        assert_eq!(scheduler.poll(start + 5 * MS), Due::default());
        assert_eq!(scheduler.next_deadline(), None);
    }

    #[test]
    fn test_zero_intervals_are_rejected() {
        let start = Instant::now();
        assert!(FrameScheduler::new(Cadence::Fixed(Duration::ZERO), None, start).is_err());
        assert!(FrameScheduler::new(Cadence::VSync, Some(Duration::ZERO), start).is_err());
    }
}
