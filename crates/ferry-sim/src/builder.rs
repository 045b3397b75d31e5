//! Fluent builder for constructing a [`Sim`].

use std::collections::BTreeSet;

use ferry_core::{CoreError, FerryConfig, SimRng, Vehicle, VehicleClass, VehicleId};

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Optional inputs (have defaults)
///
/// | Method        | Default                                              |
/// |---------------|------------------------------------------------------|
/// | `.fleet(v)`   | Generated from the config's class counts and seed    |
///
/// # Example
///
/// ```rust,ignore
/// let sim = SimBuilder::new(FerryConfig::default().time_scaled(1000)).build()?;
/// let report = sim.run(&NoopObserver)?;
/// ```
pub struct SimBuilder {
    config: FerryConfig,
    fleet:  Option<Vec<Vehicle>>,
}

impl SimBuilder {
    pub fn new(config: FerryConfig) -> Self {
        Self { config, fleet: None }
    }

    /// Use these vehicles instead of generating a fleet.
    ///
    /// The class counts in the config are then ignored.  Every vehicle must
    /// have a unique id, start at home with no trips, and fit on an empty
    /// ferry.
    pub fn fleet(mut self, fleet: Vec<Vehicle>) -> Self {
        self.fleet = Some(fleet);
        self
    }

    /// Validate inputs, draw the ferry's starting side and the fleet, and
    /// return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        let mut rng = SimRng::new(self.config.seed);
        // Always drawn so a pinned start side leaves the generated fleet unchanged.
        let drawn = rng.side();
        let ferry_start = self.config.start_side.unwrap_or(drawn);

        let fleet = match self.fleet {
            Some(fleet) => {
                check_fleet(&self.config, &fleet)?;
                fleet
            }
            None => {
                self.config.validate()?;
                generate_fleet(&self.config, &mut rng)
            }
        };

        Ok(Sim::new(self.config, fleet, ferry_start))
    }
}

/// Cars, then minibuses, then trucks, numbered from 0, each homed on a
/// random side.
fn generate_fleet(config: &FerryConfig, rng: &mut SimRng) -> Vec<Vehicle> {
    let mut fleet = Vec::with_capacity(config.vehicle_count());
    let mut next = 0u32;
    for class in VehicleClass::ALL {
        for _ in 0..config.count_of(class) {
            fleet.push(Vehicle::new(VehicleId(next), class, rng.side()));
            next += 1;
        }
    }
    fleet
}

fn check_fleet(config: &FerryConfig, fleet: &[Vehicle]) -> SimResult<()> {
    config.validate_resources()?;
    if fleet.is_empty() {
        return Err(CoreError::Config("fleet is empty".into()).into());
    }
    let mut seen = BTreeSet::new();
    for vehicle in fleet {
        if !seen.insert(vehicle.id) {
            return Err(SimError::DuplicateVehicle(vehicle.id));
        }
        if vehicle.trips != 0 || vehicle.current_side != vehicle.home_side {
            return Err(SimError::VehicleNotFresh(vehicle.id));
        }
        config.check_fits(vehicle.class)?;
    }
    Ok(())
}
