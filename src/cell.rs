use core::fmt;
use grid_util::point::Point;
use smallvec::SmallVec;

use crate::N_SMALLVEC_SIZE;

/// A `(row, column)` coordinate on a maze. Equality, hashing and ordering are purely
/// structural, ordering being row-major.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: usize,
    pub column: usize,
}

impl Cell {
    pub const fn new(row: usize, column: usize) -> Cell {
        Cell { row, column }
    }

    /// The [L1 distance](https://en.wikipedia.org/wiki/Taxicab_geometry) between two cells.
    pub fn manhattan_distance(&self, other: &Cell) -> usize {
        self.row.abs_diff(other.row) + self.column.abs_diff(other.column)
    }

    /// Orthogonal neighbours in the order north, east, south, west. Neighbours with a negative
    /// coordinate cannot lie on any maze and are left out; everything else is returned without
    /// a bounds check.
    pub fn neighbours(&self) -> SmallVec<[Cell; N_SMALLVEC_SIZE]> {
        [
            self.row.checked_sub(1).map(|row| Cell::new(row, self.column)),
            Some(Cell::new(self.row, self.column + 1)),
            Some(Cell::new(self.row + 1, self.column)),
            self.column.checked_sub(1).map(|column| Cell::new(self.row, column)),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Whether the two cells share an edge.
    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Converts a [Point] (`x` is the column, `y` the row) into a [Cell], if both coordinates
    /// are non-negative.
    pub fn from_point(point: Point) -> Option<Cell> {
        Some(Cell::new(
            usize::try_from(point.y).ok()?,
            usize::try_from(point.x).ok()?,
        ))
    }
}

impl From<Cell> for Point {
    fn from(cell: Cell) -> Point {
        Point::new(cell.column as i32, cell.row as i32)
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, column): (usize, usize)) -> Cell {
        Cell::new(row, column)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}
