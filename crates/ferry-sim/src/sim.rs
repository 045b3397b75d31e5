//! The `Sim` struct and its thread orchestration.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use ferry_core::{FerryConfig, Side, SimClock, Vehicle, VehicleRng};
use ferry_sync::{DockArea, GateBank, StartLatch};
use log::{error, info};

use crate::coordinator::Stage;
use crate::{Coordinator, FerryScheduler, SimError, SimObserver, SimReport, SimResult, VehicleAgent};

// ── Strait ────────────────────────────────────────────────────────────────────

/// The shared world every thread borrows: configuration, the coordinator
/// and the blocking resources on both sides.
pub struct Strait {
    pub config:      FerryConfig,
    pub coordinator: Coordinator,
    pub gates:       GateBank,
    pub docks:       DockArea,
}

impl Strait {
    pub fn new(config: FerryConfig, fleet_size: usize, ferry_start: Side) -> Self {
        Self {
            coordinator: Coordinator::new(config.ferry_capacity, fleet_size, ferry_start),
            gates:       GateBank::new(),
            docks:       DockArea::new(config.dock_capacity),
            config,
        }
    }

    /// Tear down a run that cannot finish: fail every blocking step so each
    /// thread returns.
    pub fn abandon(&self) {
        self.coordinator.abandon();
        self.gates.close();
        self.docks.close();
    }
}

/// Abandons the run if the thread holding it unwinds.
struct AbandonOnPanic<'a>(&'a Strait);

impl Drop for AbandonOnPanic<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            error!("a simulation thread panicked; abandoning the run");
            self.0.abandon();
        }
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation runner.
///
/// [`run`](Self::run) spawns one thread for the ferry and one per vehicle,
/// all scoped to the call, and holds them on a start latch until every one
/// exists.  It returns once the ferry has retired and every vehicle has
/// finished its round trip.
///
/// A `Sim` runs once; its coordinator keeps the final state for inspection.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    strait:      Strait,
    fleet:       Vec<Vehicle>,
    ferry_start: Side,
    latch:       StartLatch,
    ran:         AtomicBool,
}

impl Sim {
    pub(crate) fn new(config: FerryConfig, fleet: Vec<Vehicle>, ferry_start: Side) -> Self {
        Self {
            strait: Strait::new(config, fleet.len(), ferry_start),
            fleet,
            ferry_start,
            latch: StartLatch::new(),
            ran: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &FerryConfig {
        &self.strait.config
    }

    /// Vehicles as they were before the run.
    pub fn fleet(&self) -> &[Vehicle] {
        &self.fleet
    }

    pub fn ferry_start(&self) -> Side {
        self.ferry_start
    }

    /// Live coordinator; safe to snapshot from another thread mid-run.
    pub fn coordinator(&self) -> &Coordinator {
        &self.strait.coordinator
    }

    pub fn strait(&self) -> &Strait {
        &self.strait
    }

    /// Run to completion.
    ///
    /// If any thread panics, the run is abandoned: every blocked thread is
    /// released, all of them are joined, and the panic comes back as
    /// [`SimError::ThreadPanicked`].
    ///
    /// Use [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&self, observer: &O) -> SimResult<SimReport> {
        if self.ran.swap(true, Ordering::SeqCst) {
            return Err(SimError::AlreadyRan);
        }

        observer.on_sim_start(self.ferry_start, &self.fleet);
        info!(
            "{} vehicle(s), ferry capacity {}, dock capacity {}, ferry starts on {}",
            self.fleet.len(),
            self.strait.config.ferry_capacity,
            self.strait.config.dock_capacity,
            self.ferry_start,
        );

        let strait = &self.strait;
        let latch = &self.latch;
        let seed = strait.config.seed;

        let (mut vehicles, runtime) = thread::scope(|scope| -> SimResult<_> {
            let ferry = scope.spawn(move || {
                let _guard = AbandonOnPanic(strait);
                let clock = SimClock::from_instant(latch.wait());
                FerryScheduler::new(strait, clock, observer).run();
            });

            let agents: Vec<_> = self
                .fleet
                .iter()
                .cloned()
                .map(|vehicle| {
                    let rng = VehicleRng::new(seed, vehicle.id);
                    scope.spawn(move || {
                        let _guard = AbandonOnPanic(strait);
                        let clock = SimClock::from_instant(latch.wait());
                        VehicleAgent::new(vehicle, rng, strait).run(clock, observer)
                    })
                })
                .collect();

            let opened = latch.open();

            // Join everything before reporting so no panicked thread is left
            // for the scope to re-raise.
            let mut panicked = None;
            let mut abandoned = None;
            let mut reports = Vec::with_capacity(agents.len());
            for (vehicle, handle) in self.fleet.iter().zip(agents) {
                match handle.join() {
                    Ok(Ok(report)) => reports.push(report),
                    Ok(Err(e)) => abandoned = Some(e),
                    Err(_) => {
                        panicked.get_or_insert_with(|| format!("vehicle {}", vehicle.id));
                    }
                }
            }
            if ferry.join().is_err() {
                panicked.get_or_insert_with(|| "ferry".to_string());
            }

            if let Some(who) = panicked {
                return Err(SimError::ThreadPanicked { who });
            }
            if let Some(e) = abandoned {
                return Err(e.into());
            }
            Ok((reports, opened.elapsed()))
        })?;

        vehicles.sort_by_key(|r| r.id);
        let state = strait.coordinator.snapshot();
        debug_assert_eq!(state.census.count(Stage::Finished), self.fleet.len());

        let report = SimReport {
            vehicles,
            stats: state.stats,
            runtime,
            ferry_side: state.ferry.side,
        };
        info!(
            "run complete: {} crossing(s) in {:.3}s",
            report.stats.crossings,
            report.runtime.as_secs_f64()
        );
        observer.on_sim_end(&report);
        Ok(report)
    }
}
