//! Property-based tests for the board rules.
//!
//! Positions are generated by playing random legal moves from the empty
//! board, so only reachable positions are tested.

use connect4_board::{
    build_win_table, check_result, landing_slot, Bitboard, Cell, GameResult, Player, Position,
    CELLS, HEIGHT, WIDTH,
};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// =============================================================================
// Strategies for generating test inputs
// =============================================================================

/// Generate a position by playing up to `CELLS` random moves, stopping at the
/// first decided placement.
fn arb_position() -> impl Strategy<Value = Position> {
    (any::<u64>(), 0usize..=CELLS).prop_map(|(seed, num_moves)| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut pos = Position::new();
        for _ in 0..num_moves {
            let legal = pos.legal_columns();
            if legal.is_empty() {
                break;
            }
            let col = legal.get(rng.gen_range(0..legal.len()));
            if pos.play(col).result.is_decided() {
                break;
            }
        }
        pos
    })
}

fn arb_cell() -> impl Strategy<Value = Cell> {
    (0u8..CELLS as u8).prop_map(Cell::new_unchecked)
}

/// Height of a column counted from the bottom.
fn column_height(occupied: Bitboard, col: usize) -> usize {
    (occupied & Bitboard::column(col)).popcount() as usize
}

// =============================================================================
// Board invariants
// =============================================================================

proptest! {
    /// The two sides never share a cell and discs stay on the board.
    #[test]
    fn prop_masks_are_disjoint(pos in arb_position()) {
        let o = pos.occupied(Player::O);
        let x = pos.occupied(Player::X);
        prop_assert!((o & x).is_empty());
        prop_assert!(Bitboard::FULL.contains_all(o | x));

        // O moves first, so it is never behind and never more than one ahead.
        let diff = o.popcount() as i32 - x.popcount() as i32;
        prop_assert!(diff == 0 || diff == 1);
    }

    /// Discs obey gravity: every occupied cell above the bottom row sits on
    /// another occupied cell.
    #[test]
    fn prop_no_floating_discs(pos in arb_position()) {
        let taken = pos.taken();
        for cell in Cell::all().filter(|&c| taken.contains(c)) {
            if cell.row() + 1 < HEIGHT {
                let below = Cell::from_coords(cell.row() + 1, cell.col()).unwrap();
                prop_assert!(taken.contains(below), "floating disc at {}", cell);
            }
        }
    }

    /// A drop lands on the first free cell directly above the column's stack.
    #[test]
    fn prop_landing_slot_sits_on_stack(pos in arb_position()) {
        let taken = pos.taken();
        for col in pos.legal_columns().iter() {
            let slot = landing_slot(taken, col);
            prop_assert_eq!(slot.col(), col);
            prop_assert!(!taken.contains(slot));
            prop_assert_eq!(slot.row(), HEIGHT - 1 - column_height(taken, col));
        }
    }

    /// A column is legal exactly when it is not full.
    #[test]
    fn prop_legal_columns_are_not_full(pos in arb_position()) {
        let taken = pos.taken();
        let legal = pos.legal_columns();
        for col in 0..WIDTH {
            prop_assert_eq!(legal.contains(col), column_height(taken, col) < HEIGHT);
        }
    }

    /// Every line mask has four on-board cells and contains the cell it is
    /// listed under.
    #[test]
    fn prop_win_lines_are_well_formed(cell in arb_cell()) {
        for mask in build_win_table().lines(cell) {
            prop_assert_eq!(mask.popcount(), 4);
            prop_assert!(mask.contains(cell));
            prop_assert!(Bitboard::FULL.contains_all(mask));
        }
    }

    /// Owning exactly one line wins from each of its cells and from no other
    /// cell.
    #[test]
    fn prop_line_wins_only_through_its_cells(
        cell in arb_cell(),
        index in 0usize..16,
        probe in arb_cell(),
    ) {
        let lines: Vec<Bitboard> = build_win_table().lines(cell).collect();
        let line = lines[index % lines.len()];
        let result = check_result(line, Bitboard::EMPTY, probe);
        if line.contains(probe) {
            prop_assert_eq!(result, GameResult::Win);
        } else {
            prop_assert_eq!(result, GameResult::Unresolved);
        }
    }
}

#[test]
fn test_every_orientation_is_covered() {
    // For each cell, count lines per orientation and compare against the
    // number of 4-cell windows that fit along that axis.
    let table = build_win_table();
    let axes: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

    for cell in Cell::all() {
        let lines: Vec<Bitboard> = table.lines(cell).collect();
        for (dx, dy) in axes {
            let fits = (-3..=0)
                .filter(|&start| {
                    (start..start + 4).all(|p| {
                        let x = cell.col() as i32 + dx * p;
                        let y = cell.row() as i32 + dy * p;
                        (0..WIDTH as i32).contains(&x) && (0..HEIGHT as i32).contains(&y)
                    })
                })
                .count();
            let found = lines
                .iter()
                .filter(|mask| {
                    let mut cells = Cell::all().filter(|&c| mask.contains(c));
                    let a = cells.next().unwrap();
                    let b = cells.next().unwrap();
                    let step_x = b.col() as i32 - a.col() as i32;
                    let step_y = b.row() as i32 - a.row() as i32;
                    (step_x, step_y) == (dx, dy) || (step_x, step_y) == (-dx, -dy)
                })
                .count();
            assert_eq!(found, fits, "cell {} axis ({}, {})", cell, dx, dy);
        }
    }
}
