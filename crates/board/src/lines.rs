//! Pre-computed win-line table.
//!
//! For every cell, the table lists each 4-cell straight line (horizontal,
//! vertical or diagonal) passing through it. Win detection then only has to
//! test those masks against the mover's discs after each placement.

use std::sync::OnceLock;

use crate::{Bitboard, Cell, CELLS, HEIGHT, WIDTH};

/// Capacity of each cell's line list; unused entries are `Bitboard::EMPTY`.
pub const MAX_LINES_PER_CELL: usize = 16;

/// Length of a winning line.
const LINE_LENGTH: i32 = 4;

/// Unit steps as (column delta, row delta): four axes, both senses.
/// The first four cover every axis once, so their windows come first.
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, 0),
    (1, -1),
];

/// Win-line masks indexed by cell.
pub struct WinTable {
    lines: [[Bitboard; MAX_LINES_PER_CELL]; CELLS],
}

impl WinTable {
    /// Builds the table from the board dimensions.
    ///
    /// Each direction contributes up to four windows per cell (the line may
    /// start up to three steps before the cell). Windows that leave the board
    /// are discarded, and a line reached again through the opposite sense is
    /// stored only once.
    pub fn build() -> Self {
        let mut lines = [[Bitboard::EMPTY; MAX_LINES_PER_CELL]; CELLS];

        for row in 0..HEIGHT as i32 {
            for col in 0..WIDTH as i32 {
                let entries = &mut lines[row as usize * WIDTH + col as usize];
                let mut count = 0;

                for (dx, dy) in DIRECTIONS {
                    for start in -(LINE_LENGTH - 1)..=0 {
                        let Some(mask) = window(col, row, dx, dy, start) else {
                            continue;
                        };
                        if entries[..count].contains(&mask) {
                            continue;
                        }
                        debug_assert!(count < MAX_LINES_PER_CELL);
                        entries[count] = mask;
                        count += 1;
                    }
                }
            }
        }

        Self { lines }
    }

    /// The lines through a cell.
    #[inline]
    pub fn lines(&self, cell: Cell) -> impl Iterator<Item = Bitboard> + '_ {
        self.lines[cell.index()]
            .iter()
            .copied()
            .take_while(|mask| mask.is_not_empty())
    }
}

/// Mask of the 4 cells `(col + dx * p, row + dy * p)` for `p` in
/// `start..start + 4`, or None if any of them is off the board.
fn window(col: i32, row: i32, dx: i32, dy: i32, start: i32) -> Option<Bitboard> {
    let mut mask = Bitboard::EMPTY;
    for p in start..start + LINE_LENGTH {
        let x = col + dx * p;
        let y = row + dy * p;
        if x < 0 || x >= WIDTH as i32 || y < 0 || y >= HEIGHT as i32 {
            return None;
        }
        mask.set(Cell::new_unchecked((y * WIDTH as i32 + x) as u8));
    }
    Some(mask)
}

static WIN_TABLE: OnceLock<WinTable> = OnceLock::new();

/// Get the global win-line table, building it on first use.
pub fn build_win_table() -> &'static WinTable {
    WIN_TABLE.get_or_init(WinTable::build)
}
