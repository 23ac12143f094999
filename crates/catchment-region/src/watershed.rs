//! Watershed segmentation
//!
//! This module provides the unseeded watershed transform. The intensity
//! grid is treated as a topographic surface and flooded level by level
//! from its local minima; where floods from different minima meet, a
//! one-pixel watershed line is drawn.
//!
//! The marker-seeded variants live in [`crate::seeded`].

use crate::error::{RegionError, RegionResult};
use crate::immersion::ImmersionFlood;
use crate::levels::LevelBuckets;
use crate::state::{BASIN_VALUE, FloodState, NO_LABEL, PixelState, WATERSHED_VALUE};
use catchment_core::{ConnectivityType, Grid};
use log::debug;

/// Traversal order of the marker-seeded engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FloodOrder {
    /// Level buckets with a FIFO frontier per level
    #[default]
    Levels,
    /// One global priority frontier replaying the level order
    Priority,
}

/// Options for watershed segmentation
#[derive(Debug, Clone)]
pub struct WatershedOptions {
    /// Connectivity type for finding neighbors
    pub connectivity: ConnectivityType,
    /// Engine used by [`crate::seeded_watershed`]
    pub flood_order: FloodOrder,
}

impl Default for WatershedOptions {
    fn default() -> Self {
        Self {
            connectivity: ConnectivityType::EightWay,
            flood_order: FloodOrder::Levels,
        }
    }
}

impl WatershedOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set connectivity type
    pub fn with_connectivity(mut self, connectivity: ConnectivityType) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Set the seeded traversal order
    pub fn with_flood_order(mut self, flood_order: FloodOrder) -> Self {
        self.flood_order = flood_order;
        self
    }
}

/// Output of a watershed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatershedResult {
    /// Basin label per pixel; 0 on watershed pixels and unreached pixels
    pub labels: Grid<u32>,
    /// 0 on watershed pixels, 255 elsewhere
    pub lines: Grid<u8>,
    /// Number of distinct basin labels in play
    pub num_basins: u32,
}

impl WatershedResult {
    pub(crate) fn from_state(
        fs: &FloodState,
        template: &Grid<i32>,
        num_basins: u32,
    ) -> WatershedResult {
        WatershedResult {
            labels: fs.label_grid(template),
            lines: fs.line_grid(template),
            num_basins,
        }
    }

    /// Number of watershed pixels
    pub fn watershed_pixel_count(&self) -> usize {
        self.lines.count(|v| v == WATERSHED_VALUE)
    }

    /// Number of pixels that are neither watershed nor labeled
    ///
    /// Only the seeded engines can leave such pixels, when part of the grid
    /// is not reachable from any marker.
    pub fn unlabeled_count(&self) -> usize {
        self.labels
            .data()
            .iter()
            .zip(self.lines.data())
            .filter(|&(&l, &v)| l == NO_LABEL && v == BASIN_VALUE)
            .count()
    }
}

/// Reject negative intensities.
pub(crate) fn validate_intensities(grid: &Grid<i32>) -> RegionResult<()> {
    if let Some((c, value)) = grid.enumerate().find(|&(_, v)| v < 0) {
        return Err(RegionError::InvalidValue {
            row: c.row,
            col: c.col,
            value,
        });
    }
    Ok(())
}

/// Compute the binary watershed-line grid of an intensity grid
///
/// Eight-connected, unseeded. Returns a grid of the same shape holding 0 on
/// watershed pixels and 255 on basin pixels.
///
/// # Errors
///
/// Returns [`RegionError::InvalidValue`] if any intensity is negative.
///
/// # Examples
///
/// ```
/// use catchment_core::Grid;
/// use catchment_region::watershed_lines;
///
/// let grid = Grid::from_rows(&[[0, 1, 2, 1, 0]]).unwrap();
/// let lines = watershed_lines(&grid).unwrap();
/// assert_eq!(lines.data(), &[255, 255, 0, 255, 255]);
/// ```
pub fn watershed_lines(grid: &Grid<i32>) -> RegionResult<Grid<u8>> {
    Ok(watershed_segmentation(grid, &WatershedOptions::default())?.lines)
}

/// Perform unseeded watershed segmentation on an intensity grid
///
/// Classical immersion: levels are processed in ascending order; existing
/// basins grow into each level first, and whatever the growth cannot reach
/// becomes a new basin with the next sequential label (starting at 1).
///
/// Every pixel ends as either a basin pixel (label > 0, line value 255) or a
/// watershed pixel (label 0, line value 0).
///
/// `options.flood_order` has no effect here.
///
/// # Errors
///
/// Returns [`RegionError::InvalidValue`] if any intensity is negative.
pub fn watershed_segmentation(
    grid: &Grid<i32>,
    options: &WatershedOptions,
) -> RegionResult<WatershedResult> {
    validate_intensities(grid)?;

    let buckets = LevelBuckets::new(grid.data());
    let mut fs = FloodState::new(grid.len());
    let mut flood = ImmersionFlood::new(grid.shape(), options.connectivity);
    let mut current_label = NO_LABEL;

    for (_, pixels) in buckets.iter() {
        flood.mask_level(&mut fs, pixels);
        flood.propagate(&mut fs);
        flood.label_new_basins(&mut fs, pixels, &mut current_label);
    }

    let result = WatershedResult::from_state(&fs, grid, current_label);
    debug!(
        "watershed_segmentation: {}x{} grid, {} levels, {} basins, {} watershed pixels",
        grid.height(),
        grid.width(),
        buckets.len(),
        current_label,
        fs.count(PixelState::Watershed)
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(rows: &[&[i32]]) -> Vec<u8> {
        let grid = Grid::from_rows(rows).unwrap();
        watershed_lines(&grid).unwrap().into_data()
    }

    #[test]
    fn test_two_basin_row() {
        assert_eq!(lines(&[&[0, 1, 2, 1, 0]]), vec![255, 255, 0, 255, 255]);
    }

    #[test]
    fn test_flat_grid_single_basin() {
        let grid = Grid::new_with_value(3, 3, 5).unwrap();
        let result = watershed_segmentation(&grid, &WatershedOptions::default()).unwrap();
        assert!(result.lines.data().iter().all(|&v| v == 255));
        assert!(result.labels.data().iter().all(|&l| l == 1));
        assert_eq!(result.num_basins, 1);
        assert_eq!(result.watershed_pixel_count(), 0);
    }

    #[test]
    fn test_plateau_between_minima() {
        // Odd plateau: divide lands in the middle
        assert_eq!(lines(&[&[0, 2, 2, 2, 0]]), vec![255, 255, 0, 255, 255]);
        // Even plateau: raster order decides, divide lands right of center
        assert_eq!(lines(&[&[0, 2, 2, 0]]), vec![255, 255, 0, 255]);
    }

    #[test]
    fn test_single_minimum_has_no_lines() {
        let grid = Grid::from_rows(&[[2, 1, 2], [1, 0, 1], [2, 1, 2]]).unwrap();
        let result = watershed_segmentation(&grid, &WatershedOptions::default()).unwrap();
        assert_eq!(result.watershed_pixel_count(), 0);
        assert_eq!(result.num_basins, 1);

        assert_eq!(lines(&[&[0, 1, 2, 3, 4]]), vec![255; 5]);
    }

    #[test]
    fn test_center_column_divides_two_columns_of_minima() {
        let row: &[i32] = &[0, 1, 2, 1, 0];
        let grid = Grid::from_rows(&[row, row, row]).unwrap();
        let result = watershed_segmentation(&grid, &WatershedOptions::default()).unwrap();
        for r in result.lines.rows() {
            assert_eq!(r, &[255, 255, 0, 255, 255]);
        }
        for r in result.labels.rows() {
            assert_eq!(r, &[1, 1, 0, 2, 2]);
        }
        assert_eq!(result.num_basins, 2);
    }

    #[test]
    fn test_labels_are_sequential_in_raster_order() {
        let grid = Grid::from_rows(&[[0, 3, 1]]).unwrap();
        let result = watershed_segmentation(&grid, &WatershedOptions::default()).unwrap();
        // Level 0 basin is discovered first, level 1 basin second
        assert_eq!(result.labels.data(), &[1, 0, 2]);
        assert_eq!(result.lines.data(), &[255, 0, 255]);
    }

    #[test]
    fn test_negative_intensity_rejected() {
        let grid = Grid::from_rows(&[[0, 1], [-4, 2]]).unwrap();
        let err = watershed_segmentation(&grid, &WatershedOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            RegionError::InvalidValue {
                row: 1,
                col: 0,
                value: -4
            }
        ));
    }

    #[test]
    fn test_four_way_connectivity_ignores_diagonals() {
        // Two minima touching only diagonally stay separate basins under
        // four-way connectivity
        let grid = Grid::from_rows(&[[0, 9], [9, 0]]).unwrap();
        let options = WatershedOptions::new().with_connectivity(ConnectivityType::FourWay);
        let result = watershed_segmentation(&grid, &options).unwrap();
        assert_eq!(result.num_basins, 2);

        let eight = watershed_segmentation(&grid, &WatershedOptions::default()).unwrap();
        assert_eq!(eight.num_basins, 1);
    }
}
