//! Grid - Dense 2-D array
//!
//! `Grid<T>` is the container for every array crossing the public API:
//! intensity grids (`Grid<i32>`), marker and label grids (`Grid<u32>`) and
//! binary watershed-line grids (`Grid<u8>`).
//!
//! # Memory Layout
//!
//! Data is stored in row-major order with no padding. The pixel at
//! `(row, col)` is at index `row * width + col`.
//!
//! # Examples
//!
//! ```
//! use catchment_core::Grid;
//!
//! let mut grid: Grid<i32> = Grid::new(3, 4).unwrap();
//! grid.set(1, 2, 7).unwrap();
//! assert_eq!(grid.get(1, 2).unwrap(), 7);
//! assert_eq!(grid.max_value(), 7);
//! ```

use crate::coord::{Coord, GridShape};
use crate::error::{Error, Result};

/// Dense row-major 2-D array
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    /// Number of rows
    height: usize,
    /// Number of columns
    width: usize,
    /// Pixel data (row-major, no padding)
    data: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    /// Create a new grid with every pixel set to `T::default()`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if height or width is 0.
    pub fn new(height: usize, width: usize) -> Result<Self> {
        Self::new_with_value(height, width, T::default())
    }
}

impl<T: Copy> Grid<T> {
    /// Create a new grid with every pixel set to `value`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if height or width is 0.
    pub fn new_with_value(height: usize, width: usize, value: T) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(Error::InvalidDimension { height, width });
        }
        Ok(Grid {
            height,
            width,
            data: vec![value; height * width],
        })
    }

    /// Create a grid from row-major data
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or the data length doesn't
    /// match `height * width`.
    pub fn from_data(height: usize, width: usize, data: Vec<T>) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(Error::InvalidDimension { height, width });
        }
        if data.len() != height * width {
            return Err(Error::DataLengthMismatch {
                len: data.len(),
                height,
                width,
            });
        }
        Ok(Grid {
            height,
            width,
            data,
        })
    }

    /// Create a grid from a slice of rows
    ///
    /// # Errors
    ///
    /// Returns an error if there are no rows, the rows are empty, or the
    /// rows differ in length.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        if height == 0 || width == 0 {
            return Err(Error::InvalidDimension { height, width });
        }

        let mut data = Vec::with_capacity(height * width);
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != width {
                return Err(Error::RaggedRows {
                    row,
                    expected: width,
                    actual: r.len(),
                });
            }
            data.extend_from_slice(r);
        }

        Ok(Grid {
            height,
            width,
            data,
        })
    }

    /// Get the number of rows
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the number of columns
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the dimensions as `(height, width)`
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Get the grid limits
    #[inline]
    pub fn shape(&self) -> GridShape {
        GridShape::new(self.height, self.width)
    }

    /// Total number of pixels
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// A grid always holds at least one pixel; provided for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check whether `other` has the same dimensions
    #[inline]
    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.height == other.height && self.width == other.width
    }

    /// Get the value at `(row, col)`
    ///
    /// # Errors
    ///
    /// Returns `Error::CoordOutOfBounds` if the coordinate is outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.get_coord(Coord::new(row, col))
    }

    /// Get the value at a coordinate
    pub fn get_coord(&self, c: Coord) -> Result<T> {
        let index = self.checked_index(c)?;
        Ok(self.data[index])
    }

    /// Set the value at `(row, col)`
    ///
    /// # Errors
    ///
    /// Returns `Error::CoordOutOfBounds` if the coordinate is outside the grid.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        let index = self.checked_index(Coord::new(row, col))?;
        self.data[index] = value;
        Ok(())
    }

    fn checked_index(&self, c: Coord) -> Result<usize> {
        let shape = self.shape();
        if !shape.contains(c) {
            return Err(Error::CoordOutOfBounds {
                row: c.row,
                col: c.col,
                height: self.height,
                width: self.width,
            });
        }
        Ok(shape.index_of(c))
    }

    /// Get the raw row-major data
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Get mutable access to the raw row-major data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the grid, returning its row-major data
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Iterate over rows as slices
    pub fn rows(&self) -> std::slice::ChunksExact<'_, T> {
        self.data.chunks_exact(self.width)
    }

    /// Apply `f` to every pixel, producing a grid of the same shape
    pub fn map<U: Copy, F: FnMut(T) -> U>(&self, f: F) -> Grid<U> {
        Grid {
            height: self.height,
            width: self.width,
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    /// Count pixels satisfying `pred`
    pub fn count<F: FnMut(T) -> bool>(&self, mut pred: F) -> usize {
        self.data.iter().filter(|&&v| pred(v)).count()
    }

    /// Iterate over `(Coord, value)` pairs in raster order
    pub fn enumerate(&self) -> impl Iterator<Item = (Coord, T)> + '_ {
        let shape = self.shape();
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &v)| (shape.coord_of(i), v))
    }
}

impl<T: Copy + Ord> Grid<T> {
    /// Minimum pixel value
    pub fn min_value(&self) -> T {
        // Grids are never empty, so the fold seed is a real pixel.
        self.data.iter().copied().fold(self.data[0], T::min)
    }

    /// Maximum pixel value
    pub fn max_value(&self) -> T {
        self.data.iter().copied().fold(self.data[0], T::max)
    }
}
