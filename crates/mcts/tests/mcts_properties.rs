//! Property-based tests for the search engine.
//!
//! Games are driven through the public API: random budgets, random arena
//! sizes and random committed moves.

use connect4_board::{Player, Position, WIDTH};
use connect4_mcts::{Capacity, Mcts, MctsConfig};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// =============================================================================
// Strategies for generating test inputs
// =============================================================================

fn arb_seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Playouts per search (small for fast tests).
fn arb_budget() -> impl Strategy<Value = usize> {
    1usize..150
}

/// Arena sizes from "barely fits a root" to "never runs out".
fn arb_capacity() -> impl Strategy<Value = usize> {
    prop_oneof![1usize..16, 16usize..400, Just(5_000usize)]
}

fn engine(seed: u64, nodes: usize) -> Mcts {
    let config = MctsConfig::for_testing()
        .with_seed(seed)
        .with_capacity(Capacity::Nodes(nodes));
    Mcts::new(config).unwrap()
}

/// Picks the next committed move: the engine's choice when it has one,
/// otherwise a random legal column.
fn next_move(mcts: &mut Mcts, budget: usize, rng: &mut ChaCha8Rng) -> usize {
    match mcts.run_many(budget) {
        Some(column) => column,
        None => {
            let legal = mcts.position().legal_columns();
            legal.get(rng.gen_range(0..legal.len()))
        }
    }
}

// =============================================================================
// Arena bookkeeping
// =============================================================================

proptest! {
    /// Every live node is reachable from the root, before and after each
    /// committed move.
    #[test]
    fn prop_live_nodes_are_reachable(
        seed in arb_seed(),
        nodes in arb_capacity(),
        budget in arb_budget(),
        plies in 1usize..12,
    ) {
        let mut mcts = engine(seed, nodes);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        for _ in 0..plies {
            if mcts.status().is_decided() {
                break;
            }
            let column = next_move(&mut mcts, budget, &mut rng);
            let stats = mcts.tree_stats();
            prop_assert_eq!(stats.live_nodes, stats.tree_nodes);
            prop_assert!(stats.live_nodes <= stats.capacity);

            mcts.advance(column);
            let stats = mcts.tree_stats();
            prop_assert_eq!(stats.live_nodes, stats.tree_nodes);
            prop_assert!(stats.live_nodes >= 1);
        }
    }

    /// The root sees every completed playout exactly once.
    #[test]
    fn prop_root_counts_completed_playouts(
        seed in arb_seed(),
        nodes in arb_capacity(),
        budget in arb_budget(),
    ) {
        let mut mcts = engine(seed, nodes);
        let result = mcts.search_with_budget(budget);

        prop_assert!(result.playouts <= budget);
        prop_assert_eq!(result.exhausted, result.playouts < budget);
        prop_assert_eq!(mcts.tree_stats().root_playouts, result.playouts as u64);
        if result.exhausted {
            prop_assert_eq!(mcts.tree_stats().live_nodes, nodes);
        }
    }

    /// The chosen column is legal, was tried, and has the best mean.
    #[test]
    fn prop_best_column_has_best_mean(
        seed in arb_seed(),
        budget in arb_budget(),
        opening in prop::collection::vec(0usize..WIDTH, 0..6),
    ) {
        let mut mcts = engine(seed, 5_000);
        let mut position = Position::new();
        for column in opening {
            if position.is_legal(column) && !mcts.status().is_decided() {
                position.play(column);
                mcts.advance(column);
            }
        }
        prop_assume!(!mcts.status().is_decided());

        let result = mcts.search_with_budget(budget);
        let best = result.best_column.unwrap();
        prop_assert!(mcts.position().is_legal(best));

        let best_mean = result.root[best].mean().unwrap();
        for (column, stats) in result.root.iter().enumerate() {
            if let Some(mean) = stats.mean() {
                prop_assert!(mean <= best_mean);
                if mean == best_mean {
                    prop_assert!(column >= best, "tie not resolved to first column");
                }
            }
        }
    }

    /// Scores never exceed one full win per playout.
    #[test]
    fn prop_scores_are_bounded(seed in arb_seed(), budget in arb_budget()) {
        let mut mcts = engine(seed, 5_000);
        let result = mcts.search_with_budget(budget);
        for stats in result.root {
            prop_assert!(stats.score >= 0.0);
            prop_assert!(stats.score <= stats.playouts as f32);
        }
    }
}

// =============================================================================
// Determinism
// =============================================================================

proptest! {
    /// Same seed and capacity: same moves and same statistics.
    #[test]
    fn prop_same_seed_same_game(
        seed in arb_seed(),
        nodes in arb_capacity(),
        budget in arb_budget(),
    ) {
        let play = || {
            let mut mcts = engine(seed, nodes);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut history = Vec::new();
            for _ in 0..6 {
                if mcts.status().is_decided() {
                    break;
                }
                let column = next_move(&mut mcts, budget, &mut rng);
                history.push((column, mcts.root_stats()));
                mcts.advance(column);
            }
            (history, mcts.tree_stats())
        };

        prop_assert_eq!(play(), play());
    }

    /// The engine's real board follows the committed moves.
    #[test]
    fn prop_engine_tracks_real_board(
        seed in arb_seed(),
        moves in prop::collection::vec(0usize..WIDTH, 0..20),
    ) {
        let mut mcts = engine(seed, 64);
        let mut position = Position::new();
        for column in moves {
            if !position.is_legal(column) || mcts.status().is_decided() {
                continue;
            }
            let expected = position.play(column);
            let actual = mcts.advance(column);
            prop_assert_eq!(expected, actual);
        }
        prop_assert_eq!(*mcts.position(), position);
        prop_assert_eq!(mcts.occupied(Player::O), position.occupied(Player::O));
        prop_assert_eq!(mcts.turn(), position.turn());
    }
}
