//! One vehicle's round trip.

use std::thread;
use std::time::{Duration, Instant};

use ferry_core::config::GATES_PER_SIDE;
use ferry_core::{GateIndex, ROUND_TRIP, SimClock, Vehicle, VehicleRng};
use log::debug;

use crate::{Abandoned, SimObserver, Strait, VehicleReport};

/// Timing of one completed leg.
struct Leg {
    wait:      Duration,
    landed_at: Duration,
}

/// A vehicle plus its RNG, run on its own thread.
///
/// Each trip goes gate → dock → queue → board → cross → land; between trips
/// the vehicle rests for a random cooldown.  After [`ROUND_TRIP`] trips it is
/// back home and the agent returns its report.
pub struct VehicleAgent<'a> {
    vehicle: Vehicle,
    rng:     VehicleRng,
    strait:  &'a Strait,
}

impl<'a> VehicleAgent<'a> {
    pub fn new(vehicle: Vehicle, rng: VehicleRng, strait: &'a Strait) -> Self {
        Self { vehicle, rng, strait }
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// Make every trip and report.  Fails only if the run is abandoned while
    /// the vehicle is blocked or between steps.
    pub fn run<O: SimObserver>(
        mut self,
        clock:    SimClock,
        observer: &O,
    ) -> Result<VehicleReport, Abandoned> {
        let started_at = clock.elapsed();
        let mut wait = Duration::ZERO;
        let mut finished_at = started_at;

        while !self.vehicle.is_finished() {
            let leg = self.trip(&clock)?;
            wait += leg.wait;
            finished_at = leg.landed_at;
            if !self.vehicle.is_finished() {
                let config = &self.strait.config;
                let rest = self.rng.duration_between(config.cooldown_min, config.cooldown_max);
                debug!("[{clock}] {} resting {rest:?}", self.vehicle.id);
                thread::sleep(rest);
            }
        }

        let report = VehicleReport {
            id: self.vehicle.id,
            class: self.vehicle.class,
            home_side: self.vehicle.home_side,
            final_side: self.vehicle.current_side,
            trips: self.vehicle.trips,
            started_at,
            finished_at,
            wait,
        };
        debug!(
            "[{clock}] {} ({}) finished: {:?} in system, {:?} waiting",
            report.id,
            report.class,
            report.time_in_system(),
            report.wait
        );
        self.strait.coordinator.record_finish(&report);
        observer.on_vehicle_finished(&report);
        Ok(report)
    }

    fn trip(&mut self, clock: &SimClock) -> Result<Leg, Abandoned> {
        let strait = self.strait;
        let config = &strait.config;
        let coordinator = &strait.coordinator;
        let id = self.vehicle.id;
        let side = self.vehicle.current_side;
        let mut wait = Duration::ZERO;

        // ── Gate ──────────────────────────────────────────────────────────
        coordinator.enter_gate(side);
        let gate = GateIndex(self.rng.gen_range(0..GATES_PER_SIDE as u8));
        let queued = Instant::now();
        let held = strait.gates.acquire(side, gate).ok_or(Abandoned)?;
        wait += queued.elapsed();
        debug!("[{clock}] {id} ({}) at gate {} on {side}", self.vehicle.class, gate.0);
        thread::sleep(config.gate_service);
        held.release();

        // ── Dock ──────────────────────────────────────────────────────────
        let queued = Instant::now();
        if coordinator.claim_dock_slot(side, &strait.docks)? {
            debug!("[{clock}] {id} waited for dock space on {side}");
        }
        wait += queued.elapsed();
        thread::sleep(config.dock_handling);
        coordinator.join_queue(&self.vehicle);

        // ── Board and cross ───────────────────────────────────────────────
        let queued = Instant::now();
        let pass = coordinator.board(&self.vehicle)?;
        wait += queued.elapsed();
        debug!(
            "[{clock}] {id} boarded on {side} (load {}/{})",
            pass.load_after,
            coordinator.capacity()
        );

        let last_trip = self.vehicle.trips + 1 >= ROUND_TRIP;
        let landed = coordinator.land(&pass, last_trip)?;
        let landed_at = clock.elapsed();
        strait.docks.release_slot(landed);
        self.vehicle.land(landed);
        debug!("[{clock}] {id} landed on {landed} (trip {})", self.vehicle.trips);

        Ok(Leg { wait, landed_at })
    }
}
