//! Core error type.
//!
//! The simulation has no external failure sources, so everything here is a
//! rejected input: a configuration that could never complete, or a raw
//! integer that does not name a side or vehicle class.

use thiserror::Error;

/// The error type for `ferry-core` and the base for the other `ferry-*` crates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown side {0} (expected 0 or 1)")]
    UnknownSide(u8),

    #[error("unknown vehicle class weight {0} (expected 1, 2 or 3)")]
    UnknownClass(u8),
}

/// Shorthand result type for all `ferry-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
