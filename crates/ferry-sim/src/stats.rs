//! Plain data records handed to observers and aggregate run statistics.

use std::time::Duration;

use ferry_core::{Side, VehicleClass, VehicleId};

/// What one vehicle did over its round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleReport {
    pub id:          VehicleId,
    pub class:       VehicleClass,
    pub home_side:   Side,
    pub final_side:  Side,
    pub trips:       u8,
    /// Offset from the start of the run at which the vehicle set off.
    pub started_at:  Duration,
    /// Offset at which it stepped off the ferry for the last time.
    pub finished_at: Duration,
    /// Time spent blocked on gates, dock slots and boarding.
    pub wait:        Duration,
}

impl VehicleReport {
    pub fn time_in_system(&self) -> Duration {
        self.finished_at.saturating_sub(self.started_at)
    }
}

/// One completed crossing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossingRecord {
    /// 1-based crossing number.
    pub number:     u64,
    pub from:       Side,
    pub to:         Side,
    /// Weight units carried.
    pub load:       u32,
    /// Vehicles carried, ascending by id.
    pub passengers: Vec<VehicleId>,
    /// Offset from the start of the run at which the ferry docked.
    pub arrived_at: Duration,
}

/// Running totals for one vehicle class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassTotals {
    pub finished:       usize,
    pub time_in_system: Duration,
    pub wait:           Duration,
}

impl ClassTotals {
    pub fn average_time_in_system(&self) -> Option<Duration> {
        average(self.time_in_system, self.finished)
    }

    pub fn average_wait(&self) -> Option<Duration> {
        average(self.wait, self.finished)
    }
}

/// Counters kept under the coordination lock while the run is live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimStats {
    pub crossings: u64,
    classes:       [ClassTotals; 3],
}

impl SimStats {
    pub fn class(&self, class: VehicleClass) -> &ClassTotals {
        &self.classes[class.index()]
    }

    pub fn finished(&self) -> usize {
        self.classes.iter().map(|c| c.finished).sum()
    }

    pub(crate) fn record_vehicle(&mut self, report: &VehicleReport) {
        let totals = &mut self.classes[report.class.index()];
        totals.finished += 1;
        totals.time_in_system += report.time_in_system();
        totals.wait += report.wait;
    }
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct SimReport {
    /// One entry per vehicle, ascending by id.
    pub vehicles:   Vec<VehicleReport>,
    pub stats:      SimStats,
    /// Wall-clock time from the start latch opening to the last thread joining.
    pub runtime:    Duration,
    pub ferry_side: Side,
}

impl SimReport {
    pub fn average_time_in_system(&self) -> Option<Duration> {
        let total = self.vehicles.iter().map(VehicleReport::time_in_system).sum();
        average(total, self.vehicles.len())
    }

    pub fn average_wait(&self) -> Option<Duration> {
        let total = self.vehicles.iter().map(|v| v.wait).sum();
        average(total, self.vehicles.len())
    }
}

fn average(total: Duration, count: usize) -> Option<Duration> {
    let n = u32::try_from(count).ok().filter(|&n| n > 0)?;
    Some(total / n)
}
