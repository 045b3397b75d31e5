//! The ferry's control loop.

use std::thread;
use std::time::Duration;

use ferry_core::SimClock;
use log::{info, warn};

use crate::coordinator::{Departure, Manifest};
use crate::{SimObserver, Strait};

/// Where the ferry is in its loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    /// Docked and loading.
    AwaitingLoad,
    /// On the water with this manifest.
    Crossing(Manifest),
    Terminated,
}

/// Drives the ferry: load, cross, berth, repeat until every trip is done.
pub struct FerryScheduler<'a, O: SimObserver> {
    strait:     &'a Strait,
    clock:      SimClock,
    observer:   &'a O,
    state:      SchedulerState,
    crossing:   Duration,
    turnaround: Duration,
}

impl<'a, O: SimObserver> FerryScheduler<'a, O> {
    pub fn new(strait: &'a Strait, clock: SimClock, observer: &'a O) -> Self {
        Self {
            strait,
            clock,
            observer,
            state:      SchedulerState::AwaitingLoad,
            crossing:   strait.config.crossing,
            turnaround: strait.config.turnaround,
        }
    }

    pub fn state(&self) -> &SchedulerState {
        &self.state
    }

    /// Advance one state.  Blocks for as long as that state lasts: the whole
    /// loading wait, or the crossing plus turnaround.  `Terminated` is
    /// absorbing.
    pub fn step(&mut self) -> &SchedulerState {
        let strait = self.strait;
        let coordinator = &strait.coordinator;
        self.state = match std::mem::replace(&mut self.state, SchedulerState::Terminated) {
            SchedulerState::AwaitingLoad => match coordinator.await_departure() {
                Departure::Cross(manifest) => {
                    info!(
                        "[{}] ferry departs {} with {} vehicle(s), load {}/{}",
                        self.clock,
                        manifest.from,
                        manifest.passengers,
                        manifest.load,
                        coordinator.capacity(),
                    );
                    SchedulerState::Crossing(manifest)
                }
                Departure::Terminate => {
                    info!("[{}] all trips done; ferry retired", self.clock);
                    SchedulerState::Terminated
                }
                Departure::Abandon => {
                    warn!("[{}] run abandoned; ferry stops", self.clock);
                    SchedulerState::Terminated
                }
            },
            SchedulerState::Crossing(_) => {
                thread::sleep(self.crossing);
                let record = coordinator.complete_crossing(self.clock.elapsed());
                info!(
                    "[{}] crossing #{} docked at {} (load {})",
                    self.clock, record.number, record.to, record.load
                );
                self.observer.on_crossing_completed(&record);
                thread::sleep(self.turnaround);
                SchedulerState::AwaitingLoad
            }
            SchedulerState::Terminated => SchedulerState::Terminated,
        };
        &self.state
    }

    /// Step until terminated.
    pub fn run(mut self) {
        while *self.step() != SchedulerState::Terminated {}
    }
}
