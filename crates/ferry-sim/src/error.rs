use ferry_core::{CoreError, VehicleId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("vehicle {0} appears more than once in the fleet")]
    DuplicateVehicle(VehicleId),

    #[error("vehicle {0} must start at home with no trips completed")]
    VehicleNotFresh(VehicleId),

    #[error("{who} thread panicked")]
    ThreadPanicked { who: String },

    #[error("simulation has already run")]
    AlreadyRan,

    #[error(transparent)]
    Abandoned(#[from] Abandoned),
}

/// A blocking step gave up because another thread of the run panicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("run abandoned after a thread panicked")]
pub struct Abandoned;

pub type SimResult<T> = Result<T, SimError>;
