//! Dockside holding areas.
//!
//! # Slot accounting
//!
//! A vehicle takes a slot on the side it boards from and gives a slot back
//! on the side it lands on.  Occupancy therefore tracks disembark events, not
//! the vehicles physically parked on a side:
//!
//! ```text
//! occupancy(side) = capacity − available permits(side)
//! ```
//!
//! A side that receives more landings than departures can go below zero.
//! The upper bound `occupancy ≤ capacity` always holds because acquisition
//! blocks at zero permits.

use ferry_core::Side;
use log::trace;

use crate::Semaphore;

/// One bounded holding area per side.
pub struct DockArea {
    capacity: usize,
    slots:    [Semaphore; 2],
}

impl DockArea {
    /// Both sides start with `capacity` free slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            slots: [Semaphore::new(capacity), Semaphore::new(capacity)],
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Block until a slot is free on `side`, then take it.  Returns `false`
    /// without a slot once the area is closed.
    pub fn acquire_slot(&self, side: Side) -> bool {
        trace!("waiting for a dock slot on {side}");
        self.slots[side.index()].acquire()
    }

    /// Take a slot on `side` if one is free right now.
    pub fn try_acquire_slot(&self, side: Side) -> bool {
        self.slots[side.index()].try_acquire()
    }

    /// Give a slot back on `side` and wake one waiter there.
    pub fn release_slot(&self, side: Side) {
        self.slots[side.index()].release();
        trace!("dock slot freed on {side}");
    }

    /// Release every vehicle blocked on either side and refuse new ones.
    pub fn close(&self) {
        self.slots.iter().for_each(Semaphore::close);
    }

    /// Signed occupancy of `side`; see the module docs.
    pub fn occupancy(&self, side: Side) -> isize {
        self.capacity as isize - self.slots[side.index()].available() as isize
    }
}
