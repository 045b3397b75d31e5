//! Wall-clock time model.
//!
//! The ferry simulation runs in real time: gates, docks and crossings are
//! timed sleeps.  Every timestamp the simulation reports is an offset from
//! the instant the start barrier opened, held in a [`SimClock`].

use std::fmt;
use std::time::{Duration, Instant};

/// Converts `Instant`s into offsets from the start of a run.
///
/// `SimClock` is `Copy` so each vehicle thread can hold its own.
#[derive(Copy, Clone, Debug)]
pub struct SimClock {
    start: Instant,
}

impl SimClock {
    /// A clock whose zero is now.
    pub fn start() -> Self {
        Self { start: Instant::now() }
    }

    /// A clock whose zero is `start`.
    pub fn from_instant(start: Instant) -> Self {
        Self { start }
    }

    /// Time since the clock was started.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Offset of `at` from the start, saturating to zero for earlier instants.
    #[inline]
    pub fn offset_of(&self, at: Instant) -> Duration {
        at.saturating_duration_since(self.start)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T+{:.3}s", self.elapsed().as_secs_f64())
    }
}
