//! Catchment - Watershed segmentation for Rust
//!
//! Treats a 2-D grid of non-negative intensities as a topographic surface
//! and partitions it into catchment basins separated by one-pixel
//! watershed lines.
//!
//! # Overview
//!
//! - Grid container and 4/8-neighbor addressing ([`Grid`], [`GridShape`])
//! - Unseeded immersion watershed ([`region::watershed_segmentation`])
//! - Marker-seeded watershed, level-ordered or priority-ordered
//!   ([`region::seeded_watershed`])
//! - Regional-minima markers ([`region::label_regional_minima`])
//! - PGM and PNG grid I/O ([`io`])
//!
//! # Example
//!
//! ```
//! use catchment::Grid;
//! use catchment::region::{FloodOrder, WatershedOptions, label_regional_minima, seeded_watershed};
//!
//! let row = [0, 1, 2, 3, 2, 1, 0];
//! let grid = Grid::from_rows(&[row, row, row]).unwrap();
//!
//! let options = WatershedOptions::new().with_flood_order(FloodOrder::Priority);
//! let (markers, count) = label_regional_minima(&grid, options.connectivity).unwrap();
//! assert_eq!(count, 2);
//!
//! let result = seeded_watershed(&grid, &markers, &options).unwrap();
//! for labels in result.labels.rows() {
//!     assert_eq!(labels, &[1, 1, 1, 0, 2, 2, 2]);
//! }
//! ```

// Re-export core types (primary data structures used everywhere)
pub use catchment_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use catchment_io as io;
pub use catchment_region as region;
