//! Random rollouts.
//!
//! After a playout expands a new node, the rest of the game is played out
//! with uniformly random legal moves. Rollouts work on a copy of the position
//! and never allocate tree nodes.

use connect4_board::Position;
use connect4_core::Outcome;
use rand_core::RngCore;

use crate::rng::pick_index;

/// Plays random legal moves until the game is decided.
///
/// Each move picks among the legal columns with `next_u64() % n`, drawing
/// nothing when only one column is open.
///
/// # Panics
/// Panics if `position` has no legal column (a full board is already decided).
pub fn rollout<R: RngCore>(position: &mut Position, rng: &mut R) -> Outcome {
    loop {
        let legal = position.legal_columns();
        let column = legal.get(pick_index(rng, legal.len()));
        if let Some(outcome) = position.play(column).outcome() {
            return outcome;
        }
    }
}
