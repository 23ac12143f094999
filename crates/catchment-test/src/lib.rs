//! catchment-test - Regression test framework for catchment
//!
//! Regression tests run in one of three modes:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run tests without comparison
//!
//! # Usage
//!
//! ```ignore
//! use catchment_test::{RegParams, load_test_grid};
//!
//! let mut rp = RegParams::new("watershed");
//! let grid = load_test_grid("ridge.pgm").unwrap();
//! rp.compare_values(2.0, num_basins as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use catchment_core::Grid;

/// Load a fixture grid from the test data directory
///
/// # Arguments
///
/// * `name` - Grid filename (e.g., "ridge.pgm")
pub fn load_test_grid(name: &str) -> TestResult<Grid<i32>> {
    let path = test_data_path(name);
    catchment_io::read_grid(&path).map_err(|e| TestError::GridLoad {
        path: path.clone(),
        message: e.to_string(),
    })
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // catchment-test is at crates/catchment-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to a test data file
pub fn test_data_path(name: &str) -> String {
    format!("{}/tests/data/grids/{}", workspace_root(), name)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
