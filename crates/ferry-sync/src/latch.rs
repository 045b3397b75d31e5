//! One-shot start barrier.

use std::sync::{Condvar, Mutex, PoisonError};
use std::time::Instant;

/// Holds every simulation thread until the runner opens it, then lets all of
/// them through at once.
///
/// The latch owns its own lock.  [`wait`](Self::wait) returns only after that
/// lock is released, so no thread ever carries it into the ferry
/// coordinator.
pub struct StartLatch {
    opened_at: Mutex<Option<Instant>>,
    opened:    Condvar,
}

impl StartLatch {
    pub fn new() -> Self {
        Self {
            opened_at: Mutex::new(None),
            opened:    Condvar::new(),
        }
    }

    /// Open the latch and wake every waiter.  Later calls are no-ops and
    /// keep the first opening instant.
    pub fn open(&self) -> Instant {
        let mut at = self.opened_at.lock().unwrap_or_else(PoisonError::into_inner);
        let instant = *at.get_or_insert_with(Instant::now);
        self.opened.notify_all();
        instant
    }

    /// Block until the latch is open.  Returns the instant it opened, which
    /// every thread uses as time zero.
    pub fn wait(&self) -> Instant {
        let guard = self.opened_at.lock().unwrap_or_else(PoisonError::into_inner);
        let at = self
            .opened
            .wait_while(guard, |at| at.is_none())
            .unwrap_or_else(PoisonError::into_inner);
        (*at).unwrap_or_else(Instant::now)
    }

    pub fn is_open(&self) -> bool {
        self.opened_at
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl Default for StartLatch {
    fn default() -> Self {
        Self::new()
    }
}
