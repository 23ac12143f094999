//! Error types for catchment-core
//!
//! Provides a unified error type for grid construction and addressing.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// Catchment core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid grid dimensions
    #[error("invalid grid dimensions: {height}x{width}")]
    InvalidDimension { height: usize, width: usize },

    /// Coordinate outside the grid
    #[error("coordinate ({row}, {col}) out of bounds for {height}x{width} grid")]
    CoordOutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },

    /// Raw data length does not match the requested dimensions
    #[error("data length {len} doesn't match {height}x{width} grid")]
    DataLengthMismatch {
        len: usize,
        height: usize,
        width: usize,
    },

    /// Rows of unequal length
    #[error("ragged rows: row {row} has {actual} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Result type alias for catchment core operations
pub type Result<T> = std::result::Result<T, Error>;
