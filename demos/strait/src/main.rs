//! strait — the reference ferry crossing.
//!
//! 12 cars, 10 minibuses and 8 trucks share one ferry of 20 weight units
//! across a two-sided strait.  Every vehicle crosses and comes back home.
//! Delays keep the reference proportions but are divided by `TIME_SCALE`
//! so the run takes seconds instead of minutes; set it to 1 for real time.
//!
//! Set `LOG=debug` to follow individual vehicles.

mod logger;

use std::time::Duration;

use anyhow::Result;

use ferry_core::{FerryConfig, VehicleClass};
use ferry_sim::{CrossingRecord, SimBuilder, SimObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:       u64 = 42;
const TIME_SCALE: u32 = 100; // 3 s gate service → 30 ms

// ── Observer ──────────────────────────────────────────────────────────────────

/// Prints one line per crossing.
struct CrossingLog;

impl SimObserver for CrossingLog {
    fn on_crossing_completed(&self, crossing: &CrossingRecord) {
        println!(
            "  crossing {:>3}: {} → {}  load {:>2}  vehicles {}",
            crossing.number,
            crossing.from,
            crossing.to,
            crossing.load,
            crossing.passengers.len(),
        );
    }
}

fn secs(d: Option<Duration>) -> String {
    d.map_or_else(|| "-".to_string(), |d| format!("{:.3}", d.as_secs_f64()))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    logger::init()?;

    let config = FerryConfig { seed: SEED, ..FerryConfig::default() }.time_scaled(TIME_SCALE);

    println!("=== strait — ferry crossing simulation ===");
    println!(
        "Cars: {}  |  Minibuses: {}  |  Trucks: {}  |  Ferry capacity: {}  |  Seed: {SEED}",
        config.cars, config.minibuses, config.trucks, config.ferry_capacity
    );
    println!("(Delays divided by {TIME_SCALE})");
    println!();

    let sim = SimBuilder::new(config).build()?;
    println!("Ferry starts on {}", sim.ferry_start());

    let report = sim.run(&CrossingLog)?;
    println!();

    // Per-vehicle table.
    println!(
        "{:<14} {:<8} {:<7} {:>10} {:>10} {:>10}",
        "Vehicle", "Class", "Home", "Start (s)", "System (s)", "Wait (s)"
    );
    println!("{}", "-".repeat(64));
    for v in &report.vehicles {
        println!(
            "{:<14} {:<8} {:<7} {:>10.3} {:>10.3} {:>10.3}",
            v.id.to_string(),
            v.class.as_str(),
            v.home_side.to_string(),
            v.started_at.as_secs_f64(),
            v.time_in_system().as_secs_f64(),
            v.wait.as_secs_f64(),
        );
    }
    println!();

    // Aggregates.
    println!("{:<8} {:>8} {:>12} {:>12}", "Class", "Done", "Avg sys (s)", "Avg wait (s)");
    println!("{}", "-".repeat(44));
    for class in VehicleClass::ALL {
        let totals = report.stats.class(class);
        println!(
            "{:<8} {:>8} {:>12} {:>12}",
            class.as_str(),
            totals.finished,
            secs(totals.average_time_in_system()),
            secs(totals.average_wait()),
        );
    }
    println!();
    println!("Crossings:                {}", report.stats.crossings);
    println!("Average time in system:   {} s", secs(report.average_time_in_system()));
    println!("Average wait:             {} s", secs(report.average_wait()));
    println!("Total runtime:            {:.3} s", report.runtime.as_secs_f64());
    println!("Ferry finished on {}", report.ferry_side);

    Ok(())
}
