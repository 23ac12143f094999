//! Catchment Core - Basic data structures for watershed segmentation
//!
//! This crate provides the fundamental data structures used throughout
//! the catchment workspace:
//!
//! - [`Grid`] - Dense row-major 2-D array (intensity, marker, label and line grids)
//! - [`GridShape`] - Grid limits with flat-index addressing
//! - [`Coord`] - Pixel identity as `(row, col)`
//! - [`ConnectivityType`] - Neighborhood used for flooding
//!
//! # Example
//!
//! ```
//! use catchment_core::{ConnectivityType, Coord, Grid};
//!
//! let grid = Grid::from_rows(&[vec![0, 1, 2], vec![3, 4, 5]]).unwrap();
//! assert_eq!(grid.dimensions(), (2, 3));
//! assert_eq!(grid.get(1, 2).unwrap(), 5);
//!
//! // A corner pixel has three eight-connected neighbors
//! let n: Vec<Coord> = Coord::new(0, 0)
//!     .neighbors(grid.shape(), ConnectivityType::EightWay)
//!     .collect();
//! assert_eq!(n.len(), 3);
//! ```

pub mod coord;
pub mod error;
pub mod grid;

pub use coord::{ConnectivityType, Coord, CoordNeighbors, GridShape, IndexNeighbors};
pub use error::{Error, Result};
pub use grid::Grid;
