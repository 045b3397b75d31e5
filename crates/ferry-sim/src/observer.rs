//! Lifecycle observer trait for reporting and data collection.

use ferry_core::{Side, Vehicle};

use crate::{CrossingRecord, SimReport, VehicleReport};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] as the run progresses.
///
/// Vehicle and ferry threads call these concurrently, so methods take `&self`
/// and implementors must be `Sync`; use a `Mutex` or atomics for any state.
/// Callbacks are made outside the coordination lock and may block without
/// stalling the ferry protocol, though they do delay the calling thread.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — crossing counter
///
/// ```rust,ignore
/// struct CrossingCounter(AtomicU64);
///
/// impl SimObserver for CrossingCounter {
///     fn on_crossing_completed(&self, crossing: &CrossingRecord) {
///         self.0.fetch_add(1, Ordering::Relaxed);
///     }
/// }
/// ```
pub trait SimObserver: Sync {
    /// Called once, before the start latch opens.
    fn on_sim_start(&self, _ferry_side: Side, _fleet: &[Vehicle]) {}

    /// Called from the ferry thread after each arrival.
    fn on_crossing_completed(&self, _crossing: &CrossingRecord) {}

    /// Called from a vehicle's thread when it lands for the last time.
    fn on_vehicle_finished(&self, _report: &VehicleReport) {}

    /// Called once after every thread has joined.
    fn on_sim_end(&self, _report: &SimReport) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
