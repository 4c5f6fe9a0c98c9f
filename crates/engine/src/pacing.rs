//! Frame pacing.

use std::thread;
use std::time::{Duration, Instant};

use crate::config::PacingMode;

#[derive(Debug, Clone)]
pub struct FramePacer {
    mode: PacingMode,
    budget: Duration,
    deadline: Option<Instant>,
}

impl FramePacer {
    pub fn new(mode: PacingMode, fps: u32) -> Self {
        Self {
            mode,
            budget: Duration::from_nanos(1_000_000_000 / fps.max(1) as u64),
            deadline: None,
        }
    }

    pub fn mode(&self) -> PacingMode {
        self.mode
    }

    /// Time budget of one frame.
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// How long to sleep at `now`, at the end of a frame.
    ///
    /// In deadline mode a frame that overran by more than a whole budget does
    /// not try to catch up with a burst of zero-length frames; the schedule
    /// restarts from `now`.
    pub fn wait_at(&mut self, now: Instant) -> Duration {
        match self.mode {
            PacingMode::FixedDelay => self.budget,
            PacingMode::Deadline => {
                let next = self.deadline.unwrap_or(now) + self.budget;
                if next < now {
                    log::trace!("frame overran by {:?}, resetting schedule", now - next);
                    self.deadline = Some(now);
                    Duration::ZERO
                } else {
                    self.deadline = Some(next);
                    next - now
                }
            }
        }
    }

    /// Sleep until the next frame is due.
    pub fn pace(&mut self) {
        let wait = self.wait_at(Instant::now());
        if !wait.is_zero() {
            thread::sleep(wait);
        }
    }
}
