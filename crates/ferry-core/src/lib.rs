//! `ferry-core` — foundational types for the strait ferry simulation.
//!
//! This crate is a dependency of every other `ferry-*` crate.  It has no
//! `ferry-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `VehicleId`, `GateIndex`                              |
//! | [`side`]        | `Side` — the two banks of the strait                  |
//! | [`vehicle`]     | `VehicleClass`, `Vehicle`                             |
//! | [`config`]      | `FerryConfig` and its validation                      |
//! | [`time`]        | `SimClock` — offsets from the start of a run          |
//! | [`rng`]         | `VehicleRng` (per-vehicle), `SimRng` (global)         |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, sides, classes and  |
//!           | `FerryConfig`.                                             |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod side;
pub mod time;
pub mod vehicle;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{FerryConfig, ROUND_TRIP};
pub use error::{CoreError, CoreResult};
pub use ids::{GateIndex, VehicleId};
pub use rng::{SimRng, VehicleRng};
pub use side::Side;
pub use time::SimClock;
pub use vehicle::{Vehicle, VehicleClass};
