//! catchment-region - Watershed segmentation engines
//!
//! This crate partitions an intensity grid into labeled catchment basins
//! separated by one-pixel-wide watershed lines:
//!
//! - **Unseeded watershed** - basins discovered from local minima, level by level
//! - **Seeded watershed, level-ordered** - basins grown from caller markers, level by level
//! - **Seeded watershed, priority-ordered** - basins grown from caller markers in one sweep
//! - **Regional minima** - marker generation for the seeded engines
//!
//! All engines share one pixel state machine (see [`state`]) and are
//! strictly sequential: watershed-line placement depends on the global
//! processing order.
//!
//! # Examples
//!
//! ## Unseeded
//!
//! ```
//! use catchment_core::Grid;
//! use catchment_region::{WatershedOptions, watershed_segmentation};
//!
//! let grid = Grid::from_rows(&[[0, 1, 2, 1, 0]]).unwrap();
//! let result = watershed_segmentation(&grid, &WatershedOptions::default()).unwrap();
//! assert_eq!(result.lines.data(), &[255, 255, 0, 255, 255]);
//! assert_eq!(result.num_basins, 2);
//! ```
//!
//! ## Seeded from regional minima
//!
//! ```
//! use catchment_core::{ConnectivityType, Grid};
//! use catchment_region::{FloodOrder, WatershedOptions, label_regional_minima, seeded_watershed};
//!
//! let grid = Grid::from_rows(&[[0, 1, 2, 1, 0]]).unwrap();
//! let (markers, _) = label_regional_minima(&grid, ConnectivityType::EightWay).unwrap();
//! let options = WatershedOptions::new().with_flood_order(FloodOrder::Priority);
//! let result = seeded_watershed(&grid, &markers, &options).unwrap();
//! assert_eq!(result.labels.data(), &[1, 1, 0, 2, 2]);
//! ```

pub mod error;
pub mod frontier;
mod immersion;
pub mod levels;
pub mod minima;
pub mod seeded;
pub mod state;
pub mod watershed;

// Re-export core types
pub use catchment_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

// Re-export building blocks
pub use frontier::PriorityFrontier;
pub use levels::LevelBuckets;
pub use state::{BASIN_VALUE, NO_LABEL, PixelState, WATERSHED_VALUE};

// Re-export watershed types and functions
pub use watershed::{
    FloodOrder, WatershedOptions, WatershedResult, watershed_lines, watershed_segmentation,
};

// Re-export seeded types and functions
pub use seeded::{seeded_watershed, seeded_watershed_levels, seeded_watershed_priority};

// Re-export minima functions
pub use minima::{find_local_minima, label_regional_minima};
