//! Errors reported by the MSM engine.
use crate::config::MAX_WINDOW_WIDTH;
use thiserror::Error;

/// Result type of the MSM entry points.
pub type MsmResult<T> = Result<T, MsmError>;

/// Errors that abort a multi-scalar multiplication before any arithmetic is done.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum MsmError {
    /// Points and scalars slices have different lengths.
    #[error("input length mismatch: {points} points, {scalars} scalars")]
    InputLengthMismatch {
        /// Number of points.
        points: usize,
        /// Number of scalars.
        scalars: usize,
    },
    /// Window width would address more buckets than supported.
    #[error("invalid window width {0}, expected 1..={MAX_WINDOW_WIDTH}")]
    InvalidWindowWidth(u8),
    /// Batch capacity must hold at least one addition.
    #[error("invalid batch capacity {0}")]
    InvalidBatchCapacity(usize),
}
