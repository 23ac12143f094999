//! Regional minima
//!
//! Marker generation for the seeded engines. A regional minimum is a
//! maximal connected plateau none of whose pixels has a strictly lower
//! neighbor. Seeding with one label per regional minimum reproduces the
//! basins the unseeded engine would discover on its own.

use crate::error::RegionResult;
use crate::state::NO_LABEL;
use crate::watershed::validate_intensities;
use catchment_core::{ConnectivityType, Coord, Grid};
use log::debug;
use std::collections::VecDeque;

/// Label every regional minimum of an intensity grid
///
/// Returns a marker grid (0 outside minima, labels from 1 in raster order
/// of each plateau's first pixel) and the number of minima found.
///
/// # Errors
///
/// Returns [`crate::RegionError::InvalidValue`] on negative intensities.
pub fn label_regional_minima(
    grid: &Grid<i32>,
    connectivity: ConnectivityType,
) -> RegionResult<(Grid<u32>, u32)> {
    validate_intensities(grid)?;

    let shape = grid.shape();
    let values = grid.data();
    let mut markers = grid.map(|_| NO_LABEL);
    let mut visited = vec![false; grid.len()];
    let mut queue = VecDeque::new();
    let mut plateau = Vec::new();
    let mut count = 0u32;

    for start in 0..values.len() {
        if visited[start] {
            continue;
        }
        let level = values[start];
        let mut is_minimum = true;
        plateau.clear();
        visited[start] = true;
        queue.push_back(start);

        while let Some(p) = queue.pop_front() {
            plateau.push(p);
            for n in shape.neighbors(p, connectivity) {
                if values[n] < level {
                    is_minimum = false;
                } else if values[n] == level && !visited[n] {
                    visited[n] = true;
                    queue.push_back(n);
                }
            }
        }

        if is_minimum {
            count += 1;
            let data = markers.data_mut();
            for &p in &plateau {
                data[p] = count;
            }
        }
    }

    debug!(
        "label_regional_minima: {}x{} grid, {} minima",
        grid.height(),
        grid.width(),
        count
    );
    Ok((markers, count))
}

/// Find one representative pixel per regional minimum
///
/// Returns the first pixel (in raster order) of every regional minimum.
///
/// # Errors
///
/// Returns [`crate::RegionError::InvalidValue`] on negative intensities.
pub fn find_local_minima(
    grid: &Grid<i32>,
    connectivity: ConnectivityType,
) -> RegionResult<Vec<Coord>> {
    let (markers, count) = label_regional_minima(grid, connectivity)?;
    let mut found = Vec::with_capacity(count as usize);
    let mut next = 1;
    for (c, label) in markers.enumerate() {
        if label == next {
            found.push(c);
            next += 1;
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_minima_in_row() {
        let grid = Grid::from_rows(&[[0, 1, 2, 1, 0]]).unwrap();
        let (markers, count) = label_regional_minima(&grid, ConnectivityType::EightWay).unwrap();
        assert_eq!(count, 2);
        assert_eq!(markers.data(), &[1, 0, 0, 0, 2]);
    }

    #[test]
    fn test_plateau_minimum_is_one_region() {
        let grid = Grid::from_rows(&[[3, 1, 1, 1, 3], [3, 3, 3, 3, 3]]).unwrap();
        let (markers, count) = label_regional_minima(&grid, ConnectivityType::EightWay).unwrap();
        assert_eq!(count, 1);
        assert_eq!(markers.data(), &[0, 1, 1, 1, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_shelf_is_not_a_minimum() {
        // The 2-plateau touches a 1 and so is not a minimum
        let grid = Grid::from_rows(&[[2, 2, 1, 5]]).unwrap();
        let (markers, count) = label_regional_minima(&grid, ConnectivityType::EightWay).unwrap();
        assert_eq!(count, 1);
        assert_eq!(markers.data(), &[0, 0, 1, 0]);
    }

    #[test]
    fn test_flat_grid_is_one_minimum() {
        let grid = Grid::new_with_value(4, 4, 7).unwrap();
        let minima = find_local_minima(&grid, ConnectivityType::FourWay).unwrap();
        assert_eq!(minima, vec![Coord::new(0, 0)]);
    }

    #[test]
    fn test_connectivity_changes_minima() {
        let grid = Grid::from_rows(&[[0, 9], [9, 0]]).unwrap();
        let four = find_local_minima(&grid, ConnectivityType::FourWay).unwrap();
        assert_eq!(four, vec![Coord::new(0, 0), Coord::new(1, 1)]);
        let eight = find_local_minima(&grid, ConnectivityType::EightWay).unwrap();
        assert_eq!(eight, vec![Coord::new(0, 0)]);
    }
}
