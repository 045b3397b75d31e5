//! The two banks of the strait.

use std::fmt;

use crate::{CoreError, CoreResult};

/// One side of the strait.
///
/// Per-side arrays throughout the workspace are `[T; 2]` indexed by
/// [`Side::index`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    #[default]
    A,
    B,
}

impl Side {
    /// Both sides, in index order.
    pub const BOTH: [Side; 2] = [Side::A, Side::B];

    /// The bank across the water.
    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// `0` for `A`, `1` for `B`.
    #[inline(always)]
    pub fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }

    /// Inverse of [`index`](Self::index) for raw `0`/`1` values.
    pub fn from_index(raw: u8) -> CoreResult<Side> {
        match raw {
            0 => Ok(Side::A),
            1 => Ok(Side::B),
            other => Err(CoreError::UnknownSide(other)),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "side {}", self.index())
    }
}
