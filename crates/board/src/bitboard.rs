use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

use crate::{Cell, CELLS, HEIGHT, WIDTH};

/// A 64-bit integer representing a set of cells on the board.
/// Bit `row * WIDTH + col` is the cell at that row and column (row 0 = top).
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Bitboard(pub u64);

impl Bitboard {
    /// Empty bitboard (no cells set)
    pub const EMPTY: Bitboard = Bitboard(0);

    /// Every cell of the board
    pub const FULL: Bitboard = Bitboard((1u64 << CELLS) - 1);

    /// Returns true if no cells are set
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if any cells are set
    #[inline]
    pub const fn is_not_empty(self) -> bool {
        self.0 != 0
    }

    /// Returns true if the given cell is set
    #[inline]
    pub const fn contains(self, cell: Cell) -> bool {
        (self.0 >> cell.0) & 1 == 1
    }

    /// Returns true if every cell of `other` is also set here
    #[inline]
    pub const fn contains_all(self, other: Bitboard) -> bool {
        self.0 & other.0 == other.0
    }

    /// Sets the given cell
    #[inline]
    pub fn set(&mut self, cell: Cell) {
        self.0 |= 1u64 << cell.0;
    }

    /// Returns the number of set cells (population count)
    #[inline]
    pub const fn popcount(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns the mask of a whole column
    pub const fn column(col: usize) -> Bitboard {
        let mut bits = 0u64;
        let mut row = 0;
        while row < HEIGHT {
            bits |= 1u64 << (row * WIDTH + col);
            row += 1;
        }
        Bitboard(bits)
    }
}

impl BitAnd for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

/// Complement within the board; bits above the last cell stay clear.
impl Not for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0 & Self::FULL.0)
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bitboard(0x{:011X})", self.0)?;
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..HEIGHT {
            for col in 0..WIDTH {
                let cell = Cell((row * WIDTH + col) as u8);
                if self.contains(cell) {
                    write!(f, "X ")?;
                } else {
                    write!(f, ". ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
