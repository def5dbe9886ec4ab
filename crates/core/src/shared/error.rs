use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the statistics and analysis layers.
///
/// End of a video stream is not represented here: readers simply stop
/// yielding frames.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("pixel ({x}, {y}) is outside a {width}x{height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    #[error("region ({left}, {upper}, {right}, {bottom}) is outside a {width}x{height} image")]
    RegionOutOfBounds {
        left: u32,
        upper: u32,
        right: u32,
        bottom: u32,
        width: u32,
        height: u32,
    },
    #[error("division by zero: {0}")]
    DivideByZero(&'static str),
    #[error("length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
    #[error("failed to open {path}: {reason}")]
    Open { path: PathBuf, reason: String },
}

pub type StatsResult<T> = Result<T, StatsError>;
