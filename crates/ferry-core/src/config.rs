//! Run configuration.
//!
//! # Defaults
//!
//! `FerryConfig::default()` is the reference crossing: 12 cars, 10 minibuses
//! and 8 trucks sharing a ferry of 20 weight units, with 20 dock slots per
//! side and delays measured in whole seconds.  That run takes minutes of
//! wall-clock time; demos and tests shrink every delay with
//! [`FerryConfig::time_scaled`].

use std::time::Duration;

use crate::{CoreError, CoreResult, Side, VehicleClass};

/// One-way crossings every vehicle makes before it retires.
pub const ROUND_TRIP: u8 = 2;

/// Toll gates on each side.
pub const GATES_PER_SIDE: usize = 2;

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FerryConfig {
    pub cars:      usize,
    pub minibuses: usize,
    pub trucks:    usize,

    /// Ferry capacity `W` in weight units.
    pub ferry_capacity: u32,

    /// Holding-area slots per side.  Independent of `ferry_capacity`.
    pub dock_capacity: usize,

    /// Time a vehicle occupies a toll gate.
    pub gate_service: Duration,

    /// Time between being granted a dock slot and joining the boarding queue.
    pub dock_handling: Duration,

    /// Time the ferry spends on the water.
    pub crossing: Duration,

    /// Berthing time after each arrival before loading is evaluated again.
    pub turnaround: Duration,

    /// Rest after disembarking, drawn uniformly from `[cooldown_min, cooldown_max]`.
    pub cooldown_min: Duration,
    pub cooldown_max: Duration,

    /// Master RNG seed.  Fixes the fleet layout and every random choice.
    pub seed: u64,

    /// Where the ferry starts.  `None` draws it from the seed.
    pub start_side: Option<Side>,
}

impl Default for FerryConfig {
    fn default() -> Self {
        Self {
            cars:           12,
            minibuses:      10,
            trucks:         8,
            ferry_capacity: 20,
            dock_capacity:  20,
            gate_service:   Duration::from_secs(3),
            dock_handling:  Duration::from_secs(3),
            crossing:       Duration::from_secs(4),
            turnaround:     Duration::from_secs(3),
            cooldown_min:   Duration::from_secs(3),
            cooldown_max:   Duration::from_secs(7),
            seed:           42,
            start_side:     None,
        }
    }
}

impl FerryConfig {
    /// Total fleet size.
    #[inline]
    pub fn vehicle_count(&self) -> usize {
        self.cars + self.minibuses + self.trucks
    }

    /// Vehicles of `class` in the generated fleet.
    pub fn count_of(&self, class: VehicleClass) -> usize {
        match class {
            VehicleClass::Car     => self.cars,
            VehicleClass::Minibus => self.minibuses,
            VehicleClass::Truck   => self.trucks,
        }
    }

    /// The heaviest class with at least one vehicle, if any.
    pub fn heaviest_class(&self) -> Option<VehicleClass> {
        VehicleClass::ALL
            .into_iter()
            .rev()
            .find(|&c| self.count_of(c) > 0)
    }

    /// Divide every delay by `divisor`.  A divisor of 0 is treated as 1.
    ///
    /// `FerryConfig::default().time_scaled(1000)` keeps the reference
    /// proportions but runs in milliseconds.
    pub fn time_scaled(mut self, divisor: u32) -> Self {
        let d = divisor.max(1);
        self.gate_service  /= d;
        self.dock_handling /= d;
        self.crossing      /= d;
        self.turnaround    /= d;
        self.cooldown_min  /= d;
        self.cooldown_max  /= d;
        self
    }

    /// Reject configurations the simulation could never complete.
    ///
    /// A generated fleet needs at least one vehicle of every class.
    pub fn validate(&self) -> CoreResult<()> {
        self.validate_resources()?;
        if let Some(class) = VehicleClass::ALL.into_iter().find(|&c| self.count_of(c) == 0) {
            return Err(CoreError::Config(format!("fleet has no vehicle of class {class}")));
        }
        match self.heaviest_class() {
            None => Err(CoreError::Config("fleet is empty".into())),
            Some(class) => self.check_fits(class),
        }
    }

    /// Everything [`validate`](Self::validate) checks except the fleet
    /// counts.  Used when the fleet is supplied explicitly, where a fleet
    /// may leave out whole classes.
    pub fn validate_resources(&self) -> CoreResult<()> {
        if self.ferry_capacity == 0 {
            return Err(CoreError::Config("ferry capacity must be positive".into()));
        }
        if self.dock_capacity == 0 {
            return Err(CoreError::Config("dock capacity must be positive".into()));
        }
        if self.gate_service.is_zero() {
            return Err(CoreError::Config("gate service delay must be positive".into()));
        }
        if self.crossing.is_zero() {
            return Err(CoreError::Config("crossing delay must be positive".into()));
        }
        if self.cooldown_min.is_zero() {
            return Err(CoreError::Config("cooldown must be positive".into()));
        }
        if self.cooldown_min > self.cooldown_max {
            return Err(CoreError::Config(format!(
                "cooldown range is inverted ({:?} > {:?})",
                self.cooldown_min, self.cooldown_max
            )));
        }
        Ok(())
    }

    /// Fail if a single vehicle of `class` would overload an empty ferry.
    pub fn check_fits(&self, class: VehicleClass) -> CoreResult<()> {
        if class.weight() > self.ferry_capacity {
            return Err(CoreError::Config(format!(
                "ferry capacity {} is below the {} weight {}; it could never board",
                self.ferry_capacity,
                class,
                class.weight()
            )));
        }
        Ok(())
    }
}
