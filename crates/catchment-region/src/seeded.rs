//! Marker-seeded watershed
//!
//! Grows caller-supplied seed labels over an intensity grid. A marker grid
//! has the shape of the intensity grid; 0 means "no seed" and any positive
//! value is the label of the basin grown from that pixel. Marker pixels are
//! never relabeled.
//!
//! Two engines produce the same [`WatershedResult`] for the same input:
//!
//! - [`seeded_watershed_levels`] floods level by level with a FIFO frontier
//!   per level, exactly like the unseeded engine minus basin discovery.
//! - [`seeded_watershed_priority`] floods in one sweep driven by a
//!   [`PriorityFrontier`] whose ranks replay the level engine's queue order.
//!
//! Pixels no marker can reach keep label 0 without being watershed pixels.

use crate::error::{RegionError, RegionResult};
use crate::frontier::PriorityFrontier;
use crate::immersion::ImmersionFlood;
use crate::levels::LevelBuckets;
use crate::state::{ConflictLabel, FloodState, NO_LABEL, PixelState};
use crate::watershed::{FloodOrder, WatershedOptions, WatershedResult, validate_intensities};
use catchment_core::Grid;
use log::debug;
use std::collections::BTreeSet;

/// Validate an (intensity, marker) pair and count the distinct marker labels.
fn validate_seeded(grid: &Grid<i32>, markers: &Grid<u32>) -> RegionResult<u32> {
    if !grid.same_shape(markers) {
        return Err(RegionError::ShapeMismatch {
            expected: grid.dimensions(),
            actual: markers.dimensions(),
        });
    }
    validate_intensities(grid)?;

    let labels: BTreeSet<u32> = markers
        .data()
        .iter()
        .copied()
        .filter(|&m| m != NO_LABEL)
        .collect();
    Ok(labels.len() as u32)
}

/// Marker-seeded watershed using the engine chosen by `options.flood_order`
///
/// # Errors
///
/// Returns [`RegionError::ShapeMismatch`] if the grids differ in shape and
/// [`RegionError::InvalidValue`] on negative intensities.
pub fn seeded_watershed(
    grid: &Grid<i32>,
    markers: &Grid<u32>,
    options: &WatershedOptions,
) -> RegionResult<WatershedResult> {
    match options.flood_order {
        FloodOrder::Levels => seeded_watershed_levels(grid, markers, options),
        FloodOrder::Priority => seeded_watershed_priority(grid, markers, options),
    }
}

/// Marker-seeded, level-ordered watershed
///
/// Same mask and propagation phases as
/// [`watershed_segmentation`](crate::watershed_segmentation), with marker
/// pixels as the only basins: no new basins are discovered.
///
/// # Errors
///
/// Returns [`RegionError::ShapeMismatch`] if the grids differ in shape and
/// [`RegionError::InvalidValue`] on negative intensities.
///
/// # Examples
///
/// ```
/// use catchment_core::Grid;
/// use catchment_region::{WatershedOptions, seeded_watershed_levels};
///
/// let grid = Grid::from_rows(&[[0, 1, 2, 1, 0]]).unwrap();
/// let markers = Grid::from_rows(&[[1u32, 0, 0, 0, 2]]).unwrap();
/// let result = seeded_watershed_levels(&grid, &markers, &WatershedOptions::default()).unwrap();
/// assert_eq!(result.labels.data(), &[1, 1, 0, 2, 2]);
/// assert_eq!(result.lines.data(), &[255, 255, 0, 255, 255]);
/// ```
pub fn seeded_watershed_levels(
    grid: &Grid<i32>,
    markers: &Grid<u32>,
    options: &WatershedOptions,
) -> RegionResult<WatershedResult> {
    let num_basins = validate_seeded(grid, markers)?;

    let buckets = LevelBuckets::new(grid.data());
    let mut fs = FloodState::seeded(markers);
    let mut flood = ImmersionFlood::new(grid.shape(), options.connectivity);

    for (_, pixels) in buckets.iter() {
        flood.mask_level(&mut fs, pixels);
        flood.propagate(&mut fs);
    }

    let result = WatershedResult::from_state(&fs, grid, num_basins);
    debug!(
        "seeded_watershed_levels: {}x{} grid, {} levels, {} marker labels, {} watershed pixels, {} unreached",
        grid.height(),
        grid.width(),
        buckets.len(),
        num_basins,
        fs.count(PixelState::Watershed),
        fs.count(PixelState::Masked)
    );
    Ok(result)
}

/// Marker-seeded, priority-ordered watershed
///
/// One global sweep over a [`PriorityFrontier`]. Each entry's priority is the
/// level at which the pixel is processed and its rank reproduces the FIFO
/// order of [`seeded_watershed_levels`]:
///
/// - a pixel next to an already resolved pixel of a lower level (or a marker)
///   is pushed at its own intensity, ranked by raster index, as the mask
///   phase would queue it;
/// - a pixel reached from the pixel being processed, at the same or a lower
///   intensity, is pushed at the current level behind everything already
///   queued there, as propagation would.
///
/// A labeling conflict resets the pixel's label to 0 before it becomes a
/// watershed pixel. Both seeded engines return identical results.
///
/// # Errors
///
/// Returns [`RegionError::ShapeMismatch`] if the grids differ in shape and
/// [`RegionError::InvalidValue`] on negative intensities.
pub fn seeded_watershed_priority(
    grid: &Grid<i32>,
    markers: &Grid<u32>,
    options: &WatershedOptions,
) -> RegionResult<WatershedResult> {
    let num_basins = validate_seeded(grid, markers)?;

    let shape = grid.shape();
    let connectivity = options.connectivity;
    let values = grid.data();
    let mut fs = FloodState::seeded(markers);
    let mut frontier = PriorityFrontier::starting_at(values.len() as u64);

    for c in 0..fs.state.len() {
        if fs.state[c] != PixelState::Basin {
            continue;
        }
        for n in shape.neighbors(c, connectivity) {
            if fs.state[n] == PixelState::Init {
                fs.state[n] = PixelState::Queued;
                frontier.push_ranked(n, values[n], n as u64);
            }
        }
    }

    let mut level = None;
    let mut flag = false;
    while let Some((priority, c)) = frontier.pop() {
        if level != Some(priority) {
            level = Some(priority);
            flag = false;
        }

        for n in shape.neighbors(c, connectivity) {
            if fs.state[n] == PixelState::Init && values[n] <= priority {
                fs.state[n] = PixelState::Queued;
                frontier.push(n, priority);
            } else {
                fs.resolve_against(c, n, &mut flag, ConflictLabel::Clear);
            }
        }

        if fs.state[c].is_resolved() {
            for n in shape.neighbors(c, connectivity) {
                if fs.state[n] == PixelState::Init && values[n] > priority {
                    fs.state[n] = PixelState::Queued;
                    frontier.push_ranked(n, values[n], n as u64);
                }
            }
        }
    }

    let result = WatershedResult::from_state(&fs, grid, num_basins);
    debug!(
        "seeded_watershed_priority: {}x{} grid, {} pushes, {} marker labels, {} watershed pixels, {} unreached",
        grid.height(),
        grid.width(),
        frontier.pushed(),
        num_basins,
        fs.count(PixelState::Watershed),
        fs.count(PixelState::Init)
    );
    Ok(result)
}
