//! Rail-subsystem error type.

use thiserror::Error;

use sd_core::RailPos;

/// Errors produced by `sd-rail`.
///
/// A path search that finds nothing is **not** an error; it returns an empty
/// path.  Errors here mean the input data itself is unusable.
#[derive(Debug, Error)]
pub enum RailError {
    #[error("invalid path segment {start} -> {end}: {reason}")]
    InvalidSegment {
        start:  RailPos,
        end:    RailPos,
        reason: String,
    },

    #[error("invalid rail: {0}")]
    InvalidRail(String),

    #[error("unknown rail type {0:?}")]
    UnknownRailType(String),

    #[error("rail network parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RailResult<T> = Result<T, RailError>;
