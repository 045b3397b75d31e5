//! Vehicle classes and the per-vehicle record owned by each agent.

use crate::{CoreError, CoreResult, Side, VehicleId};

/// Kind of vehicle.  The discriminant is the weight-unit cost on the ferry.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleClass {
    Car     = 1,
    Minibus = 2,
    Truck   = 3,
}

impl VehicleClass {
    /// All classes, lightest first.
    pub const ALL: [VehicleClass; 3] = [VehicleClass::Car, VehicleClass::Minibus, VehicleClass::Truck];

    /// Weight units this class consumes on the ferry.
    #[inline]
    pub fn weight(self) -> u32 {
        self as u32
    }

    /// Position in [`ALL`](Self::ALL); used for per-class counter arrays.
    #[inline]
    pub fn index(self) -> usize {
        self as usize - 1
    }

    pub fn from_weight(weight: u8) -> CoreResult<VehicleClass> {
        match weight {
            1 => Ok(VehicleClass::Car),
            2 => Ok(VehicleClass::Minibus),
            3 => Ok(VehicleClass::Truck),
            other => Err(CoreError::UnknownClass(other)),
        }
    }

    /// Human-readable label for logs and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleClass::Car     => "car",
            VehicleClass::Minibus => "minibus",
            VehicleClass::Truck   => "truck",
        }
    }
}

impl std::fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One vehicle.  Owned exclusively by its agent while the run is live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vehicle {
    pub id:           VehicleId,
    pub class:        VehicleClass,
    /// Side the vehicle starts on and must return to.
    pub home_side:    Side,
    pub current_side: Side,
    /// Completed one-way crossings, `0..=ROUND_TRIP`.
    pub trips:        u8,
}

impl Vehicle {
    /// A fresh vehicle parked at home.
    pub fn new(id: VehicleId, class: VehicleClass, home_side: Side) -> Self {
        Self {
            id,
            class,
            home_side,
            current_side: home_side,
            trips: 0,
        }
    }

    #[inline]
    pub fn weight(&self) -> u32 {
        self.class.weight()
    }

    /// Record a landing on `side`.
    pub fn land(&mut self, side: Side) {
        self.current_side = side;
        self.trips += 1;
    }

    /// `true` once the round trip is complete.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.trips >= crate::ROUND_TRIP
    }
}
