//! `ferry-sim` — the ferry coordinator, its control loop, the vehicle
//! agents, and the runner that puts them on threads.
//!
//! # Threads
//!
//! ```text
//! Sim::run
//!   ├─ ferry thread     FerryScheduler: AwaitingLoad → Crossing → AwaitingLoad … → Terminated
//!   └─ vehicle × N      VehicleAgent:   gate → dock → queue → board → land → rest, twice
//! ```
//!
//! All of them block on a [`StartLatch`](ferry_sync::StartLatch) until the
//! runner has spawned the last one, then share a single [`Coordinator`].
//! See [`coordinator`] for the locking protocol.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ferry_core::FerryConfig;
//! use ferry_sim::{NoopObserver, SimBuilder};
//!
//! let sim = SimBuilder::new(FerryConfig::default().time_scaled(1000)).build()?;
//! let report = sim.run(&NoopObserver)?;
//! println!("{} crossings", report.stats.crossings);
//! ```

pub mod agent;
pub mod builder;
pub mod coordinator;
pub mod error;
pub mod observer;
pub mod scheduler;
pub mod sim;
pub mod stats;


pub use agent::VehicleAgent;
pub use builder::SimBuilder;
pub use coordinator::{BoardingPass, Coordinator, CoordinatorState, Departure, FerryPhase, Manifest};
pub use error::{Abandoned, SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use scheduler::{FerryScheduler, SchedulerState};
pub use sim::{Sim, Strait};
pub use stats::{ClassTotals, CrossingRecord, SimReport, SimStats, VehicleReport};
