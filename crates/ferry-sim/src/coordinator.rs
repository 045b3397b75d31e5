//! The ferry coordinator: all state shared between vehicles and the ferry.
//!
//! # Protocol
//!
//! Everything the departure decision depends on lives in one
//! [`CoordinatorState`] behind one mutex:
//!
//! ```text
//! ferry            side, phase, load, aboard, voyage
//! sides[2]         pending_at_gate, waiting_to_board (+ per-class breakdown)
//! remaining_trips  2 × fleet size, minus one per boarding
//! census           vehicles per lifecycle stage
//! stats            crossings and per-class totals
//! ```
//!
//! Two condition variables hang off that mutex:
//!
//! - `departure`: only the ferry waits here.  Notified after every change
//!   that can end its loading wait: a boarding, a vehicle leaving the
//!   pending count, a vehicle joining the boarding queue.
//! - `dockside`: vehicles wait here to board or to land.  Broadcast on every
//!   arrival and on retirement.
//!
//! Every wait re-checks its predicate on wake.
//!
//! # Abandoning a run
//!
//! If any thread panics, [`Coordinator::abandon`] sets a flag and broadcasts
//! on both condition variables.  Every blocking step then returns
//! [`Abandoned`] instead of waiting, so the runner can join all threads.
//!
//! # Lock order
//!
//! coordinator → dock semaphore, and only through
//! [`DockArea::try_acquire_slot`].  Blocking dock and gate waits always
//! happen with the coordinator unlocked.

use std::collections::BTreeMap;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use ferry_core::{Side, Vehicle, VehicleClass, VehicleId};
use ferry_sync::DockArea;
use log::trace;

use crate::{Abandoned, CrossingRecord, SimStats, VehicleReport};

// ── State types ───────────────────────────────────────────────────────────────

/// What the ferry is doing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FerryPhase {
    /// At the dock and accepting boarders.
    Docked,
    /// Left the dock; boarding is closed until it arrives.
    Crossing,
    /// Every trip is done.
    Retired,
}

/// The ferry itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FerryState {
    pub side:   Side,
    pub phase:  FerryPhase,
    /// Weight units aboard.  Always the sum of `aboard`'s class weights.
    pub load:   u32,
    pub aboard: BTreeMap<VehicleId, VehicleClass>,
    /// Completed crossings.  A vehicle's voyage is over once this moves past
    /// the value on its boarding pass.
    pub voyage: u64,
}

impl FerryState {
    fn new(side: Side) -> Self {
        Self {
            side,
            phase:  FerryPhase::Docked,
            load:   0,
            aboard: BTreeMap::new(),
            voyage: 0,
        }
    }
}

/// Per-side counters read by the departure decision.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SideCounters {
    /// Vehicles between entering a gate and joining the boarding queue,
    /// excluding any blocked on a full dock.
    pub pending_at_gate:  usize,
    /// Vehicles in the boarding queue.
    pub waiting_to_board: usize,
    waiting_by_class:     [usize; 3],
}

impl SideCounters {
    /// Queued vehicles of `class`.
    pub fn waiting(&self, class: VehicleClass) -> usize {
        self.waiting_by_class[class.index()]
    }

    /// `true` if some queued vehicle weighs at most `room`.
    pub fn has_waiter_within(&self, room: u32) -> bool {
        VehicleClass::ALL
            .into_iter()
            .any(|c| self.waiting(c) > 0 && c.weight() <= room)
    }

    pub fn is_idle(&self) -> bool {
        self.pending_at_gate == 0 && self.waiting_to_board == 0
    }
}

/// Where a vehicle is in its lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Parked: before the first trip or cooling down between trips.
    Resting     = 0,
    /// At a gate or handling into the dock; counted in `pending_at_gate`.
    Approaching = 1,
    /// Waiting for a dock slot on a full side.
    DockBlocked = 2,
    /// In the boarding queue; counted in `waiting_to_board`.
    Waiting     = 3,
    Aboard      = 4,
    Finished    = 5,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Resting,
        Stage::Approaching,
        Stage::DockBlocked,
        Stage::Waiting,
        Stage::Aboard,
        Stage::Finished,
    ];
}

/// Vehicle count per [`Stage`].  Always sums to the fleet size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Census([usize; 6]);

impl Census {
    fn new(fleet_size: usize) -> Self {
        let mut counts = [0; 6];
        counts[Stage::Resting as usize] = fleet_size;
        Census(counts)
    }

    pub fn count(&self, stage: Stage) -> usize {
        self.0[stage as usize]
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    fn shift(&mut self, from: Stage, to: Stage) {
        debug_assert!(self.count(from) > 0, "no vehicle in stage {from:?}");
        self.0[from as usize] -= 1;
        self.0[to as usize] += 1;
    }
}

/// Everything guarded by the coordination lock.  [`Coordinator::snapshot`]
/// returns a copy.
#[derive(Clone, Debug)]
pub struct CoordinatorState {
    pub ferry:           FerryState,
    pub sides:           [SideCounters; 2],
    pub remaining_trips: usize,
    pub census:          Census,
    pub stats:           SimStats,
    /// Set once a thread has panicked; see [`Coordinator::abandon`].
    pub abandoned:       bool,
}

impl CoordinatorState {
    fn new(fleet_size: usize, ferry_side: Side) -> Self {
        Self {
            ferry:           FerryState::new(ferry_side),
            sides:           [SideCounters::default(); 2],
            remaining_trips: fleet_size * ferry_core::ROUND_TRIP as usize,
            census:          Census::new(fleet_size),
            stats:           SimStats::default(),
            abandoned:       false,
        }
    }

    pub fn side(&self, side: Side) -> &SideCounters {
        &self.sides[side.index()]
    }

    /// The ferry keeps loading while it has room and a vehicle on its side
    /// is still coming: one at a gate, or one queued that would fit.
    pub fn holds_ferry(&self, capacity: u32) -> bool {
        let load = self.ferry.load;
        if load >= capacity {
            return false;
        }
        let here = self.side(self.ferry.side);
        here.pending_at_gate > 0 || here.has_waiter_within(capacity - load)
    }

    /// Every trip has been boarded, the ferry is empty, and no vehicle is
    /// anywhere in a queue.
    pub fn is_drained(&self) -> bool {
        self.remaining_trips == 0
            && self.ferry.load == 0
            && self.sides.iter().all(SideCounters::is_idle)
    }

    pub fn can_board(&self, vehicle: &Vehicle, capacity: u32) -> bool {
        !self.abandoned
            && self.ferry.phase == FerryPhase::Docked
            && self.ferry.side == vehicle.current_side
            && self.ferry.load + vehicle.weight() <= capacity
            && self.side(vehicle.current_side).waiting(vehicle.class) > 0
    }

    fn aboard_weight(&self) -> u32 {
        self.ferry.aboard.values().map(|c| c.weight()).sum()
    }
}

// ── Tickets handed across the protocol ────────────────────────────────────────

/// Proof of boarding, redeemed by [`Coordinator::land`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoardingPass {
    /// Ferry voyage counter at boarding time.
    pub voyage:     u64,
    pub from:       Side,
    pub load_after: u32,
}

/// The ferry's state as it leaves the dock.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Manifest {
    pub from:       Side,
    pub load:       u32,
    pub passengers: usize,
}

/// Outcome of the ferry's loading wait.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Departure {
    Cross(Manifest),
    Terminate,
    /// The run was abandoned; the ferry must stop without retiring.
    Abandon,
}

// ── Coordinator ───────────────────────────────────────────────────────────────

/// Shared ferry state plus the lock and condition variables that guard it.
///
/// Fields are private; every access goes through a method that takes the
/// lock, performs one protocol step, and issues the notifications that step
/// requires before unlocking.
pub struct Coordinator {
    capacity:  u32,
    state:     Mutex<CoordinatorState>,
    departure: Condvar,
    dockside:  Condvar,
}

impl Coordinator {
    /// A docked, empty ferry at `ferry_side` and `fleet_size` resting vehicles.
    pub fn new(capacity: u32, fleet_size: usize, ferry_side: Side) -> Self {
        Self {
            capacity,
            state:     Mutex::new(CoordinatorState::new(fleet_size, ferry_side)),
            departure: Condvar::new(),
            dockside:  Condvar::new(),
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> CoordinatorState {
        self.lock().clone()
    }

    // ── Vehicle steps ─────────────────────────────────────────────────────

    /// A vehicle heads for a gate on `side`.
    ///
    /// A higher pending count can only lengthen the ferry's wait, so nothing
    /// blocked needs waking.
    pub fn enter_gate(&self, side: Side) {
        let mut s = self.lock();
        s.sides[side.index()].pending_at_gate += 1;
        s.census.shift(Stage::Resting, Stage::Approaching);
    }

    /// Take a dock slot on `side` for a vehicle that just cleared its gate.
    ///
    /// A free slot is taken under the coordination lock and the vehicle stays
    /// pending throughout.  On a full dock the vehicle drops out of the
    /// pending count while it blocks, so it cannot hold the ferry, and
    /// re-enters once it has a slot.  Returns `true` if it had to block.
    pub fn claim_dock_slot(&self, side: Side, docks: &DockArea) -> Result<bool, Abandoned> {
        let mut s = self.lock();
        if s.abandoned {
            return Err(Abandoned);
        }
        if docks.try_acquire_slot(side) {
            return Ok(false);
        }
        s.sides[side.index()].pending_at_gate -= 1;
        s.census.shift(Stage::Approaching, Stage::DockBlocked);
        self.departure.notify_one();
        drop(s);

        if !docks.acquire_slot(side) {
            return Err(Abandoned);
        }

        let mut s = self.lock();
        s.sides[side.index()].pending_at_gate += 1;
        s.census.shift(Stage::DockBlocked, Stage::Approaching);
        Ok(true)
    }

    /// Move a vehicle from the pending count into the boarding queue on its
    /// current side, in one step.
    pub fn join_queue(&self, vehicle: &Vehicle) {
        let mut s = self.lock();
        let here = &mut s.sides[vehicle.current_side.index()];
        debug_assert!(here.pending_at_gate > 0, "{} joined without entering a gate", vehicle.id);
        here.pending_at_gate -= 1;
        here.waiting_to_board += 1;
        here.waiting_by_class[vehicle.class.index()] += 1;
        s.census.shift(Stage::Approaching, Stage::Waiting);
        self.departure.notify_one();
    }

    /// Board now if the ferry is docked on the vehicle's side with room for it.
    pub fn try_board(&self, vehicle: &Vehicle) -> Option<BoardingPass> {
        let mut s = self.lock();
        self.board_locked(&mut s, vehicle)
    }

    /// Block until the vehicle is aboard.
    pub fn board(&self, vehicle: &Vehicle) -> Result<BoardingPass, Abandoned> {
        let mut s = self.lock();
        loop {
            if let Some(pass) = self.board_locked(&mut s, vehicle) {
                return Ok(pass);
            }
            if s.abandoned {
                return Err(Abandoned);
            }
            trace!("{} waiting to board on {}", vehicle.id, vehicle.current_side);
            s = self.dockside.wait(s).unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Block until the voyage on `pass` has docked, then step off.
    ///
    /// Returns the landing side.  `last_trip` retires the vehicle in the
    /// census instead of returning it to rest.
    pub fn land(&self, pass: &BoardingPass, last_trip: bool) -> Result<Side, Abandoned> {
        let s = self.lock();
        let mut s = self
            .dockside
            .wait_while(s, |s| s.ferry.voyage == pass.voyage && !s.abandoned)
            .unwrap_or_else(PoisonError::into_inner);
        if s.ferry.voyage == pass.voyage {
            return Err(Abandoned);
        }
        let to = if last_trip { Stage::Finished } else { Stage::Resting };
        s.census.shift(Stage::Aboard, to);
        Ok(pass.from.opposite())
    }

    /// Give up on the run: flag it and wake every waiter.  Idempotent.
    pub fn abandon(&self) {
        let mut s = self.lock();
        s.abandoned = true;
        self.departure.notify_all();
        self.dockside.notify_all();
    }

    /// Fold a finished vehicle into the run statistics.
    pub fn record_finish(&self, report: &VehicleReport) {
        self.lock().stats.record_vehicle(report);
    }

    // ── Ferry steps ───────────────────────────────────────────────────────

    /// Block while the ferry should keep loading, then either close boarding
    /// and hand back the manifest, or retire the ferry if the run is over.
    pub fn await_departure(&self) -> Departure {
        let mut s = self.lock();
        loop {
            if s.abandoned {
                return Departure::Abandon;
            }
            if s.is_drained() {
                s.ferry.phase = FerryPhase::Retired;
                self.dockside.notify_all();
                return Departure::Terminate;
            }
            if !s.holds_ferry(self.capacity) {
                break;
            }
            trace!(
                "ferry holding on {} (load {}/{}, pending {}, waiting {})",
                s.ferry.side,
                s.ferry.load,
                self.capacity,
                s.side(s.ferry.side).pending_at_gate,
                s.side(s.ferry.side).waiting_to_board,
            );
            s = self.departure.wait(s).unwrap_or_else(PoisonError::into_inner);
        }
        s.ferry.phase = FerryPhase::Crossing;
        Departure::Cross(Manifest {
            from:       s.ferry.side,
            load:       s.ferry.load,
            passengers: s.ferry.aboard.len(),
        })
    }

    /// Dock on the far side: flip the side, unload, reopen boarding and wake
    /// every vehicle.
    pub fn complete_crossing(&self, arrived_at: Duration) -> CrossingRecord {
        let mut s = self.lock();
        debug_assert_eq!(s.ferry.phase, FerryPhase::Crossing);
        let from = s.ferry.side;
        let to = from.opposite();
        let passengers: Vec<VehicleId> = std::mem::take(&mut s.ferry.aboard).into_keys().collect();
        let load = std::mem::replace(&mut s.ferry.load, 0);
        s.ferry.side = to;
        s.ferry.voyage += 1;
        s.ferry.phase = FerryPhase::Docked;
        s.stats.crossings += 1;
        self.dockside.notify_all();

        CrossingRecord {
            number: s.ferry.voyage,
            from,
            to,
            load,
            passengers,
            arrived_at,
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn board_locked(&self, s: &mut CoordinatorState, vehicle: &Vehicle) -> Option<BoardingPass> {
        if !s.can_board(vehicle, self.capacity) {
            return None;
        }
        let side = vehicle.current_side;
        s.ferry.load += vehicle.weight();
        s.ferry.aboard.insert(vehicle.id, vehicle.class);
        let here = &mut s.sides[side.index()];
        here.waiting_to_board -= 1;
        here.waiting_by_class[vehicle.class.index()] -= 1;
        s.remaining_trips -= 1;
        s.census.shift(Stage::Waiting, Stage::Aboard);

        debug_assert!(s.ferry.load <= self.capacity);
        debug_assert_eq!(s.ferry.load, s.aboard_weight());

        self.departure.notify_one();
        Some(BoardingPass {
            voyage:     s.ferry.voyage,
            from:       side,
            load_after: s.ferry.load,
        })
    }

    fn lock(&self) -> MutexGuard<'_, CoordinatorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
