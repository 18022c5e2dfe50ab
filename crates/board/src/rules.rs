//! Column legality, gravity drop and result detection on raw bitboards.

use crate::{build_win_table, Bitboard, Cell, GameResult, HEIGHT, WIDTH};

/// Returns true if a disc can be dropped in `column`: the column exists and
/// its top cell is free.
#[inline]
pub fn is_legal(occupied: Bitboard, column: usize) -> bool {
    column < WIDTH && !occupied.contains(Cell::new_unchecked(column as u8))
}

/// Returns the cell a disc dropped in `column` lands on.
///
/// Scans down from the top row and stops above the first occupied cell, or at
/// the bottom row if the column is empty.
///
/// # Panics
/// Panics if the column is out of range or full.
pub fn landing_slot(occupied: Bitboard, column: usize) -> Cell {
    assert!(
        is_legal(occupied, column),
        "landing_slot: column {column} is not playable"
    );
    let mut index = column;
    for _ in 1..HEIGHT {
        let below = index + WIDTH;
        if occupied.contains(Cell::new_unchecked(below as u8)) {
            break;
        }
        index = below;
    }
    Cell::new_unchecked(index as u8)
}

/// Checks the placement at `last` for the player owning `own`.
///
/// Only lines through `last` are examined, so this has to run after every
/// placement.
pub fn check_result(own: Bitboard, opponent: Bitboard, last: Cell) -> GameResult {
    if winning_line(own, last).is_some() {
        GameResult::Win
    } else if own | opponent == Bitboard::FULL {
        GameResult::Draw
    } else {
        GameResult::Unresolved
    }
}

/// Returns the first line through `last` fully covered by `own`.
pub fn winning_line(own: Bitboard, last: Cell) -> Option<Bitboard> {
    build_win_table()
        .lines(last)
        .find(|&mask| own.contains_all(mask))
}
