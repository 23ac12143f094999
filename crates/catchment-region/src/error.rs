//! Error types for catchment-region

use thiserror::Error;

/// Errors that can occur during watershed operations
///
/// Every variant is raised by input validation, before any flood state is
/// created. Flood propagation itself cannot fail.
#[derive(Debug, Error)]
pub enum RegionError {
    /// Marker grid shape differs from the intensity grid shape
    #[error("shape mismatch: intensity grid is {expected:?}, marker grid is {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// Intensity outside the accepted range (negative)
    #[error("invalid intensity {value} at ({row}, {col}): intensities must be >= 0")]
    InvalidValue { row: usize, col: usize, value: i32 },
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
