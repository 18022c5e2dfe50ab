use std::fmt;

use crate::Bitboard;

/// Number of columns.
pub const WIDTH: usize = 7;

/// Number of rows.
pub const HEIGHT: usize = 6;

/// Number of cells on the board.
pub const CELLS: usize = WIDTH * HEIGHT;

const _: () = assert!(CELLS <= 64, "the board must fit in a single u64");

/// A board cell (0-41) in row-major order with row 0 at the top.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell(pub(crate) u8);

impl Cell {
    /// Creates a cell without bounds checking.
    #[inline]
    pub const fn new_unchecked(index: u8) -> Cell {
        Cell(index)
    }

    /// Creates a cell from row (0 = top) and column.
    #[inline]
    pub const fn from_coords(row: usize, col: usize) -> Option<Cell> {
        if row < HEIGHT && col < WIDTH {
            Some(Cell((row * WIDTH + col) as u8))
        } else {
            None
        }
    }

    /// Returns the row (0 = top, `HEIGHT - 1` = bottom).
    #[inline]
    pub const fn row(self) -> usize {
        self.0 as usize / WIDTH
    }

    /// Returns the column.
    #[inline]
    pub const fn col(self) -> usize {
        self.0 as usize % WIDTH
    }

    /// Returns the bit index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns a bitboard with only this cell set.
    #[inline]
    pub const fn bitboard(self) -> Bitboard {
        Bitboard(1u64 << self.0)
    }

    /// Iterates over every cell on the board.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..CELLS as u8).map(Cell)
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell(row {}, col {})", self.row(), self.col())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row(), self.col())
    }
}
