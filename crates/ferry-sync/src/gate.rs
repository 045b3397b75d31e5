//! Toll gates: two per side, one vehicle per gate at a time.

use std::time::Duration;

use ferry_core::config::GATES_PER_SIDE;
use ferry_core::{GateIndex, Side};
use log::trace;

use crate::Semaphore;

/// All toll gates, indexed `[side][gate]`.
///
/// Each gate is a binary semaphore.  Holding a gate is represented by a
/// [`GateGuard`]; dropping the guard releases the gate, so a gate can never
/// be released twice or left held on an early return.
pub struct GateBank {
    gates: [[Semaphore; GATES_PER_SIDE]; 2],
}

impl GateBank {
    /// All gates start free.
    pub fn new() -> Self {
        Self {
            gates: std::array::from_fn(|_| std::array::from_fn(|_| Semaphore::new(1))),
        }
    }

    /// Block until `gate` on `side` is free, then occupy it.  `None` once
    /// the bank is closed.
    ///
    /// # Panics
    /// Panics if `gate` is not below `GATES_PER_SIDE`.
    pub fn acquire(&self, side: Side, gate: GateIndex) -> Option<GateGuard<'_>> {
        trace!("waiting for gate {} on {side}", gate.0);
        self.gate(side, gate)
            .acquire()
            .then(|| GateGuard { bank: self, side, gate })
    }

    /// Occupy the gate, hold it for `service`, then release it.  Returns
    /// `false` if the bank was closed before the gate came free.
    pub fn pass_through(&self, side: Side, gate: GateIndex, service: Duration) -> bool {
        let Some(_held) = self.acquire(side, gate) else {
            return false;
        };
        std::thread::sleep(service);
        true
    }

    /// Turn away every vehicle waiting at, or later arriving at, any gate.
    pub fn close(&self) {
        self.gates.iter().flatten().for_each(Semaphore::close);
    }

    /// `1` while a vehicle holds the gate, else `0`.
    pub fn occupancy(&self, side: Side, gate: GateIndex) -> usize {
        1 - self.gate(side, gate).available().min(1)
    }

    fn gate(&self, side: Side, gate: GateIndex) -> &Semaphore {
        &self.gates[side.index()][gate.index()]
    }
}

impl Default for GateBank {
    fn default() -> Self {
        Self::new()
    }
}

/// Proof that the holder occupies one gate.  Releases the gate on drop.
pub struct GateGuard<'a> {
    bank: &'a GateBank,
    side: Side,
    gate: GateIndex,
}

impl GateGuard<'_> {
    pub fn side(&self) -> Side {
        self.side
    }

    pub fn gate(&self) -> GateIndex {
        self.gate
    }

    /// Release the gate now.  Equivalent to dropping the guard.
    pub fn release(self) {}
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        self.bank.gate(self.side, self.gate).release();
        trace!("released gate {} on {}", self.gate.0, self.side);
    }
}
