//! Counting semaphore built on `std::sync::{Mutex, Condvar}`.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

struct Permits {
    available: usize,
    closed:    bool,
}

/// A counting semaphore that can be closed.
///
/// `release` may raise the permit count above its initial value; the dock
/// area relies on this because slots are returned on the side a vehicle
/// lands on rather than the side it took them from.
///
/// Closing wakes every waiter and makes all further acquisitions fail, so a
/// thread parked here can always be released when a run is torn down.
pub struct Semaphore {
    permits: Mutex<Permits>,
    freed:   Condvar,
}

impl Semaphore {
    /// Create a semaphore holding `permits` permits.
    pub fn new(permits: usize) -> Self {
        Self {
            permits: Mutex::new(Permits { available: permits, closed: false }),
            freed:   Condvar::new(),
        }
    }

    /// Take a permit, blocking until one is available.  Returns `false`
    /// without taking one if the semaphore is or becomes closed.
    pub fn acquire(&self) -> bool {
        let guard = self.lock();
        let mut permits = self
            .freed
            .wait_while(guard, |p| p.available == 0 && !p.closed)
            .unwrap_or_else(PoisonError::into_inner);
        if permits.closed {
            return false;
        }
        permits.available -= 1;
        true
    }

    /// Take a permit if one is available right now.
    pub fn try_acquire(&self) -> bool {
        let mut permits = self.lock();
        if permits.available == 0 || permits.closed {
            return false;
        }
        permits.available -= 1;
        true
    }

    /// Return a permit and wake one waiter.
    pub fn release(&self) {
        let mut permits = self.lock();
        permits.available += 1;
        self.freed.notify_one();
    }

    /// Fail every current and future acquisition.
    pub fn close(&self) {
        self.lock().closed = true;
        self.freed.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Permits currently available.
    pub fn available(&self) -> usize {
        self.lock().available
    }

    // A poisoned lock only means another thread panicked between two of the
    // single-statement updates above; the count itself is still coherent.
    fn lock(&self) -> MutexGuard<'_, Permits> {
        self.permits.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
