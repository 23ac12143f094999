//! Grid addressing
//!
//! Pixel identity, bounds validation and neighbor enumeration.
//!
//! Pixels are addressed either by [`Coord`] `(row, col)` or by the flat
//! row-major index `row * width + col`. The flood engines work on flat
//! indices into fixed-size arrays; [`Coord`] is the public vocabulary.
//!
//! # Neighbor order
//!
//! Neighbors are always enumerated in the same order, given as
//! `(drow, dcol)`:
//!
//! ```text
//! eight-way: (-1,-1) (0,-1) (1,-1) (-1,0) (1,0) (-1,1) (0,1) (1,1)
//! four-way:           (0,-1)       (-1,0) (1,0)        (0,1)
//! ```
//!
//! Out-of-bounds offsets are skipped; there is no wraparound.

/// Eight-connected offsets as `(drow, dcol)`, column-major around the pixel.
const EIGHT_WAY_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Four-connected offsets, the orthogonal subsequence of [`EIGHT_WAY_OFFSETS`].
const FOUR_WAY_OFFSETS: [(isize, isize); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

/// Connectivity type for neighbor enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    FourWay,
    /// 8-way connectivity (includes diagonals)
    #[default]
    EightWay,
}

impl ConnectivityType {
    /// Neighbor offsets as `(drow, dcol)` in enumeration order.
    #[inline]
    pub fn offsets(self) -> &'static [(isize, isize)] {
        match self {
            ConnectivityType::FourWay => &FOUR_WAY_OFFSETS,
            ConnectivityType::EightWay => &EIGHT_WAY_OFFSETS,
        }
    }

    /// Maximum number of neighbors of an interior pixel.
    #[inline]
    pub fn max_neighbors(self) -> usize {
        self.offsets().len()
    }
}

/// Pixel coordinate `(row, col)`
///
/// Equality and hashing are by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    /// Row (y), `0..height`
    pub row: usize,
    /// Column (x), `0..width`
    pub col: usize,
}

impl Coord {
    /// Create a new coordinate
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Check whether this coordinate lies inside `shape`.
    #[inline]
    pub fn is_valid(self, shape: GridShape) -> bool {
        shape.contains(self)
    }

    /// Enumerate the in-bounds neighbors of this coordinate.
    ///
    /// Border pixels have 5 eight-connected neighbors, corner pixels 3.
    pub fn neighbors(self, shape: GridShape, connectivity: ConnectivityType) -> CoordNeighbors {
        CoordNeighbors {
            origin: self,
            shape,
            offsets: connectivity.offsets(),
            pos: 0,
        }
    }

    /// Apply an offset, returning `None` when it leaves `shape`.
    #[inline]
    pub fn offset(self, drow: isize, dcol: isize, shape: GridShape) -> Option<Coord> {
        let row = self.row.checked_add_signed(drow)?;
        let col = self.col.checked_add_signed(dcol)?;
        let c = Coord::new(row, col);
        shape.contains(c).then_some(c)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Coord::new(row, col)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Grid limits `(height, width)`
///
/// A small copyable value used to translate between [`Coord`] and flat
/// row-major indices without borrowing the grid itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridShape {
    /// Number of rows
    pub height: usize,
    /// Number of columns
    pub width: usize,
}

impl GridShape {
    /// Create a new shape
    #[inline]
    pub fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    /// Total number of pixels
    #[inline]
    pub fn len(self) -> usize {
        self.height * self.width
    }

    /// Check whether the shape holds no pixels
    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Check whether `c` lies in `[0, height) x [0, width)`.
    #[inline]
    pub fn contains(self, c: Coord) -> bool {
        c.row < self.height && c.col < self.width
    }

    /// Flat row-major index of `c`.
    ///
    /// The caller guarantees `c` is inside the shape.
    #[inline]
    pub fn index_of(self, c: Coord) -> usize {
        c.row * self.width + c.col
    }

    /// Coordinate of a flat row-major index.
    #[inline]
    pub fn coord_of(self, index: usize) -> Coord {
        Coord::new(index / self.width, index % self.width)
    }

    /// Enumerate the flat indices of the in-bounds neighbors of `index`.
    pub fn neighbors(self, index: usize, connectivity: ConnectivityType) -> IndexNeighbors {
        IndexNeighbors {
            inner: self.coord_of(index).neighbors(self, connectivity),
        }
    }
}

/// Iterator over the in-bounds neighbors of a coordinate
#[derive(Debug, Clone)]
pub struct CoordNeighbors {
    origin: Coord,
    shape: GridShape,
    offsets: &'static [(isize, isize)],
    pos: usize,
}

impl Iterator for CoordNeighbors {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        while let Some(&(drow, dcol)) = self.offsets.get(self.pos) {
            self.pos += 1;
            if let Some(c) = self.origin.offset(drow, dcol, self.shape) {
                return Some(c);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.offsets.len() - self.pos))
    }
}

/// Iterator over the flat indices of the in-bounds neighbors of a pixel
#[derive(Debug, Clone)]
pub struct IndexNeighbors {
    inner: CoordNeighbors,
}

impl Iterator for IndexNeighbors {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        let shape = self.inner.shape;
        self.inner.next().map(|c| shape.index_of(c))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
