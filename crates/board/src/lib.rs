//! Connect Four board - bitboard representation and rules
//!
//! The board is 7 columns by 6 rows. Each side's discs are a 64-bit mask with
//! one bit per cell, indexed `row * WIDTH + col` with row 0 at the top:
//!
//! ```text
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]  <- Top
//! Row 1: [ 7][ 8][ 9][10][11][12][13]
//! Row 2: [14][15][16][17][18][19][20]
//! Row 3: [21][22][23][24][25][26][27]
//! Row 4: [28][29][30][31][32][33][34]
//! Row 5: [35][36][37][38][39][40][41]  <- Bottom
//!         Col 0  1  2  3  4  5  6
//! ```
//!
//! Win detection only ever looks at the cell that was just played, using a
//! table of every 4-cell line through each cell (see [`build_win_table`]).

mod bitboard;
mod cell;
mod columns;
mod lines;
mod position;
mod rules;

pub use bitboard::Bitboard;
pub use cell::{Cell, CELLS, HEIGHT, WIDTH};
pub use columns::Columns;
pub use lines::{build_win_table, WinTable, MAX_LINES_PER_CELL};
pub use position::{Placement, Position};
pub use rules::{check_result, is_legal, landing_slot, winning_line};

pub use connect4_core::{Connect4Error, GameResult, Outcome, Player};
