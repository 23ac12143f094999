//! Unseeded watershed regression test
//!
//! Floods fixture grids and a synthetic egg-carton surface, checking basin
//! counts, divide positions and the basin/watershed partition.
//!
//! Run with:
//! ```
//! cargo test -p catchment-region --test watershed_reg
//! ```

use catchment_core::{ConnectivityType, Grid};
use catchment_io::GridFormat;
use catchment_region::{
    BASIN_VALUE, NO_LABEL, WATERSHED_VALUE, WatershedOptions, WatershedResult,
    label_regional_minima, watershed_lines, watershed_segmentation,
};
use catchment_test::{RegParams, load_test_grid};

/// Egg-carton surface: a 3x4 array of square pits, 16 rows by 12 columns
/// each, with ridges along rows 16 and 32 and columns 12, 24 and 36.
fn create_egg_carton() -> Grid<i32> {
    let mut grid = Grid::new(48, 48).unwrap();
    for row in 0..48 {
        for col in 0..48 {
            let v = (row as i32 % 16 - 8).abs() + (col as i32 % 12 - 6).abs();
            grid.set(row, col, v).unwrap();
        }
    }
    grid
}

/// Every pixel is a basin pixel with a label or a watershed pixel without one.
fn is_partition(result: &WatershedResult) -> bool {
    result
        .labels
        .data()
        .iter()
        .zip(result.lines.data())
        .all(|(&label, &line)| {
            (label != NO_LABEL && line == BASIN_VALUE)
                || (label == NO_LABEL && line == WATERSHED_VALUE)
        })
}

#[test]
fn watershed_ridge_fixture() {
    let mut rp = RegParams::new("watershed_ridge");

    let grid = load_test_grid("ridge.pgm").expect("load ridge.pgm");
    rp.compare_values(5.0, grid.height() as f64, 0.0);
    rp.compare_values(7.0, grid.width() as f64, 0.0);

    let result = watershed_segmentation(&grid, &WatershedOptions::default())
        .expect("watershed_segmentation");
    rp.compare_values(2.0, result.num_basins as f64, 0.0);

    // The divide follows the ridge column
    let row_lines = [255u8, 255, 255, 0, 255, 255, 255];
    let expected_lines = Grid::from_rows(&[row_lines; 5]).unwrap();
    rp.compare_grids(&expected_lines, &result.lines);

    let row_labels = [1u32, 1, 1, 0, 2, 2, 2];
    let expected_labels = Grid::from_rows(&[row_labels; 5]).unwrap();
    rp.compare_grids(&expected_labels, &result.labels);

    rp.write_grid_and_check(&result.lines, GridFormat::Pnm)
        .expect("write lines");

    assert!(rp.cleanup(), "watershed ridge regression test failed");
}

#[test]
fn watershed_three_basins_fixture() {
    let mut rp = RegParams::new("watershed_three");

    let grid = load_test_grid("three_basins.pgm").expect("load three_basins.pgm");
    let result = watershed_segmentation(&grid, &WatershedOptions::default())
        .expect("watershed_segmentation");

    rp.compare_values(3.0, result.num_basins as f64, 0.0);
    // Full-width divide on row 3 plus the stem on column 3 above it
    rp.compare_values(10.0, result.watershed_pixel_count() as f64, 0.0);
    rp.compare_values(1.0, if is_partition(&result) { 1.0 } else { 0.0 }, 0.0);

    let expected = Grid::from_rows(&[
        [1u32, 1, 1, 0, 2, 2, 2],
        [1, 1, 1, 0, 2, 2, 2],
        [1, 1, 1, 0, 2, 2, 2],
        [0, 0, 0, 0, 0, 0, 0],
        [3, 3, 3, 3, 3, 3, 3],
        [3, 3, 3, 3, 3, 3, 3],
        [3, 3, 3, 3, 3, 3, 3],
    ])
    .unwrap();
    rp.compare_grids(&expected, &result.labels);

    // The minimal contract agrees with the full result
    let lines = watershed_lines(&grid).expect("watershed_lines");
    rp.compare_grids(&result.lines, &lines);

    assert!(rp.cleanup(), "watershed three-basin regression test failed");
}

#[test]
fn watershed_egg_carton_synthetic() {
    let mut rp = RegParams::new("watershed_synthetic");

    let grid = create_egg_carton();
    for connectivity in [ConnectivityType::EightWay, ConnectivityType::FourWay] {
        eprintln!("=== {:?} ===", connectivity);
        let options = WatershedOptions::new().with_connectivity(connectivity);
        let result = watershed_segmentation(&grid, &options).expect("watershed_segmentation");

        eprintln!("  Number of basins: {}", result.num_basins);
        eprintln!("  Watershed pixels: {}", result.watershed_pixel_count());
        rp.compare_values(12.0, result.num_basins as f64, 0.0);
        // 2 ridge rows + 3 ridge columns, 48 pixels each, minus 6 crossings
        rp.compare_values(234.0, result.watershed_pixel_count() as f64, 0.0);
        rp.compare_values(1.0, if is_partition(&result) { 1.0 } else { 0.0 }, 0.0);

        // One basin per regional minimum
        let (_, minima) = label_regional_minima(&grid, connectivity).expect("minima");
        rp.compare_values(minima as f64, result.num_basins as f64, 0.0);

        // Ridges sit exactly where the surface peaks
        let on_ridge =
            |row: usize, col: usize| (row % 16 == 0 && row > 0) || (col % 12 == 0 && col > 0);
        let mut misplaced = 0;
        for (coord, line) in result.lines.enumerate() {
            if (line == WATERSHED_VALUE) != on_ridge(coord.row, coord.col) {
                misplaced += 1;
            }
        }
        rp.compare_values(0.0, misplaced as f64, 0.0);
    }

    assert!(rp.cleanup(), "watershed synthetic regression test failed");
}

#[test]
fn watershed_connectivity_changes_basins() {
    let mut rp = RegParams::new("watershed_connectivity");

    // A diagonal line of zeros is one valley under eight-way connectivity
    // and three separate pits under four-way connectivity
    let grid = Grid::from_rows(&[[0, 5, 5], [5, 0, 5], [5, 5, 0]]).unwrap();

    let eight = watershed_segmentation(&grid, &WatershedOptions::default()).expect("eight-way");
    rp.compare_values(1.0, eight.num_basins as f64, 0.0);
    rp.compare_values(0.0, eight.watershed_pixel_count() as f64, 0.0);

    let options = WatershedOptions::new().with_connectivity(ConnectivityType::FourWay);
    let four = watershed_segmentation(&grid, &options).expect("four-way");
    rp.compare_values(3.0, four.num_basins as f64, 0.0);
    rp.compare_values(1.0, if is_partition(&four) { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "watershed connectivity regression test failed");
}
