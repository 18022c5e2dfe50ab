//! Monte Carlo Tree Search over Connect Four.
//!
//! Each playout walks down from the root, applying moves to a copy of the
//! real position. At a node with an unexplored legal column it expands one
//! such column at random and finishes the game with a random rollout. At a
//! fully expanded node it selects a column by UCB1:
//!
//! ```text
//! value(c) = score[c] / playouts[c] + sqrt(C * ln(total) / playouts[c])
//! ```
//!
//! where `total` sums the playouts of the legal columns. Exact ties are
//! broken at random. Statistics are then backed up along the recorded path.

use std::mem;

use connect4_board::{Bitboard, Columns, GameResult, Placement, Player, Position, WIDTH};
use connect4_core::{Connect4Error, Outcome, Result};
use rand_core::SeedableRng;
use tracing::{debug, trace};

use crate::{
    arena::Arena,
    config::{Capacity, MctsConfig},
    node::{ChildRef, ColumnStats, NodeId},
    rng::{pick_index, Xoroshiro128Plus},
    rollout::rollout,
};

/// Result of a search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    /// Root column with the best mean score, or None if no root column has
    /// any playouts.
    pub best_column: Option<usize>,

    /// Playouts completed.
    pub playouts: usize,

    /// True if the search stopped because the arena ran out of nodes.
    pub exhausted: bool,

    /// Per-column statistics of the root after the search.
    pub root: [ColumnStats; WIDTH],
}

impl SearchResult {
    /// Get the chosen column.
    pub fn best(&self) -> Option<usize> {
        self.best_column
    }
}

/// Summary of the tree for logging and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeStats {
    /// Nodes currently allocated in the arena.
    pub live_nodes: usize,
    /// Nodes reachable from the root.
    pub tree_nodes: usize,
    /// Arena size in nodes.
    pub capacity: usize,
    /// Sum of the root's per-column playouts.
    pub root_playouts: u64,
    /// Longest root-to-node path, in moves.
    pub max_depth: usize,
}

/// One selection step: the node, the column chosen there and who moved.
#[derive(Clone, Copy, Debug)]
struct Step {
    node: NodeId,
    column: usize,
    mover: Player,
}

/// Monte Carlo Tree Search engine tracking one real game.
///
/// The engine owns the real position, the node arena and its generator. The
/// tree is rooted at the real position; `advance` moves the root down as moves
/// are committed and frees everything that can no longer be reached.
#[derive(Debug)]
pub struct Mcts {
    config: MctsConfig,
    arena: Arena,
    root: NodeId,
    position: Position,
    status: GameResult,
    rng: Xoroshiro128Plus,
    path: Vec<Step>,
}

impl Mcts {
    /// Create an engine at the empty board.
    ///
    /// # Errors
    /// Returns `InsufficientCapacity` if the arena cannot hold a single node.
    pub fn new(config: MctsConfig) -> Result<Self> {
        let mut arena = match config.capacity {
            Capacity::Bytes(bytes) => Arena::with_memory_budget(bytes)?,
            Capacity::Nodes(nodes) => Arena::with_nodes(nodes)?,
        };
        let root = arena
            .allocate()
            .expect("BUG: a fresh arena has at least one free slot");
        let rng = match config.seed {
            Some(seed) => Xoroshiro128Plus::seed_from_u64(seed),
            None => Xoroshiro128Plus::from_clock(),
        };

        debug!(
            capacity = arena.capacity(),
            bytes = arena.capacity() * Arena::slot_bytes(),
            seed = ?config.seed,
            "Created search engine"
        );

        Ok(Self {
            config,
            arena,
            root,
            position: Position::new(),
            status: GameResult::Unresolved,
            rng,
            path: Vec::new(),
        })
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// The real position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Discs of one player on the real board.
    pub fn occupied(&self, player: Player) -> Bitboard {
        self.position.occupied(player)
    }

    /// Side to move on the real board.
    pub fn turn(&self) -> Player {
        self.position.turn()
    }

    /// Result of the last committed move.
    pub fn status(&self) -> GameResult {
        self.status
    }

    /// Arena size in nodes.
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Commits a real move and moves the tree root to the matching child.
    ///
    /// The chosen column's subtree is kept; every other node of the old tree
    /// is freed. If the column was never expanded into a node, a blank root
    /// is allocated in its place.
    ///
    /// # Panics
    /// Panics if `column` is out of range or full.
    pub fn advance(&mut self, column: usize) -> Placement {
        assert!(
            self.position.is_legal(column),
            "advance: column {column} is not playable"
        );
        let placement = self.position.play(column);
        self.status = placement.result;

        let old_root = self.root;
        let kept = mem::take(&mut self.arena.get_mut(old_root).next[column]);
        self.arena.free_subtree(ChildRef::Node(old_root));
        self.root = match kept {
            ChildRef::Node(child) => child,
            ChildRef::Unexplored | ChildRef::Terminal(_) => self
                .arena
                .allocate()
                .expect("BUG: freeing the old root leaves a free slot"),
        };

        trace!(
            column,
            mover = %placement.mover,
            result = ?placement.result,
            reused = kept.node().is_some(),
            live_nodes = self.arena.allocated(),
            "Advanced root"
        );

        placement
    }

    /// Runs up to `budget` playouts and returns the best root column.
    ///
    /// Returns None if no root column has playouts, which happens for a zero
    /// budget or once the game is decided.
    pub fn run_many(&mut self, budget: usize) -> Option<usize> {
        self.search_with_budget(budget).best_column
    }

    /// Runs the configured number of playouts.
    pub fn search(&mut self) -> SearchResult {
        self.search_with_budget(self.config.playouts)
    }

    /// Runs up to `budget` playouts, stopping early if the arena is
    /// exhausted.
    pub fn search_with_budget(&mut self, budget: usize) -> SearchResult {
        if self.status.is_decided() {
            return SearchResult {
                best_column: None,
                playouts: 0,
                exhausted: false,
                root: self.root_stats(),
            };
        }

        let mut playouts = 0;
        let mut exhausted = false;
        for _ in 0..budget {
            match self.playout() {
                Ok(_) => playouts += 1,
                Err(err) => {
                    debug!(%err, playouts, "Stopping search early");
                    exhausted = true;
                    break;
                }
            }
        }

        let root = self.root_stats();
        let best_column = best_by_mean(&root);

        debug!(
            playouts,
            exhausted,
            best = ?best_column,
            live_nodes = self.arena.allocated(),
            "Search finished"
        );

        SearchResult {
            best_column,
            playouts,
            exhausted,
            root,
        }
    }

    /// Statistics of every root column.
    pub fn root_stats(&self) -> [ColumnStats; WIDTH] {
        let root = self.arena.get(self.root);
        std::array::from_fn(|column| root.column_stats(column))
    }

    /// Size and shape of the current tree.
    pub fn tree_stats(&self) -> TreeStats {
        let (tree_nodes, max_depth) = self.arena.subtree_extent(self.root);
        TreeStats {
            live_nodes: self.arena.allocated(),
            tree_nodes,
            capacity: self.arena.capacity(),
            root_playouts: self.arena.get(self.root).total_playouts(),
            max_depth,
        }
    }

    /// Runs one playout from the root.
    ///
    /// # Errors
    /// Returns `ArenaExhausted` if a new node was needed and none was free.
    /// No statistics are changed in that case.
    fn playout(&mut self) -> Result<Outcome> {
        let mut path = mem::take(&mut self.path);
        path.clear();

        let result = self.descend(&mut path);
        if let Ok(outcome) = result {
            self.backpropagate(&path, outcome);
        }

        self.path = path;
        result
    }

    /// Selects down the tree until a column is expanded or a decided edge is
    /// reached. Every UCB1 choice is recorded in `path`.
    fn descend(&mut self, path: &mut Vec<Step>) -> Result<Outcome> {
        let mut position = self.position;
        let mut node = self.root;

        loop {
            let legal = position.legal_columns();
            let children = &self.arena.get(node).next;
            let unexplored: Columns = legal
                .iter()
                .filter(|&column| children[column].is_unexplored())
                .collect();

            if !unexplored.is_empty() {
                let column = unexplored.get(pick_index(&mut self.rng, unexplored.len()));
                return self.expand(node, column, position);
            }

            let column = self.select(node, &legal);
            path.push(Step {
                node,
                column,
                mover: position.turn(),
            });
            position.play(column);

            match self.arena.get(node).next[column] {
                ChildRef::Node(child) => node = child,
                ChildRef::Terminal(outcome) => return Ok(outcome),
                ChildRef::Unexplored => unreachable!("BUG: selected an unexplored column"),
            }
        }
    }

    /// Expands `column` of `node` and scores it.
    ///
    /// A decided placement becomes a terminal edge. Otherwise a child node
    /// is allocated and the game is finished by a random rollout.
    fn expand(&mut self, node: NodeId, column: usize, mut position: Position) -> Result<Outcome> {
        let placement = position.play(column);
        let mover = placement.mover;

        if let Some(outcome) = placement.outcome() {
            let reward = match outcome {
                Outcome::Draw => self.config.draw_score,
                Outcome::Win(_) => self.config.win_score,
            };
            let parent = self.arena.get_mut(node);
            parent.next[column] = ChildRef::Terminal(outcome);
            parent.playouts[column] += 1;
            parent.score[column] += reward;
            return Ok(outcome);
        }

        let child = self
            .arena
            .allocate()
            .ok_or_else(|| Connect4Error::ArenaExhausted {
                capacity: self.arena.capacity(),
            })?;
        let parent = self.arena.get_mut(node);
        parent.next[column] = ChildRef::Node(child);
        parent.playouts[column] += 1;

        let outcome = rollout(&mut position, &mut self.rng);
        let reward = match outcome {
            Outcome::Draw => self.config.draw_score,
            Outcome::Win(winner) if winner == mover => self.config.win_score,
            Outcome::Win(_) => 0.0,
        };
        self.arena.get_mut(node).score[column] += reward;

        Ok(outcome)
    }

    /// UCB1 choice among the legal columns of a fully expanded node.
    fn select(&mut self, node: NodeId, legal: &Columns) -> usize {
        let stats = self.arena.get(node);
        let total: u64 = legal.iter().map(|c| u64::from(stats.playouts[c])).sum();
        let numerator = self.config.exploration * (total as f32).ln();

        let mut best_value = f32::NEG_INFINITY;
        let mut best = Columns::new();
        for column in legal.iter() {
            let playouts = stats.playouts[column];
            debug_assert!(playouts > 0, "expanded column {column} has no playouts");
            let n = playouts as f32;
            let value = stats.score[column] / n + (numerator / n).sqrt();
            if value > best_value {
                best_value = value;
                best.clear();
                best.push(column);
            } else if value == best_value {
                best.push(column);
            }
        }

        best.get(pick_index(&mut self.rng, best.len()))
    }

    /// Backs an outcome up through the selection path.
    ///
    /// Every step counts the playout. The full win reward is credited when
    /// the outcome is a win for the side that chose the column, and also for
    /// a draw.
    fn backpropagate(&mut self, path: &[Step], outcome: Outcome) {
        let win_score = self.config.win_score;
        for step in path.iter().rev() {
            let node = self.arena.get_mut(step.node);
            node.playouts[step.column] += 1;
            if outcome.credits(step.mover) {
                node.score[step.column] += win_score;
            }
        }
    }
}

/// Column with the highest mean among columns with playouts. The first column
/// wins ties.
fn best_by_mean(root: &[ColumnStats; WIDTH]) -> Option<usize> {
    let mut best = None;
    let mut best_mean = f64::NEG_INFINITY;
    for (column, stats) in root.iter().enumerate() {
        if let Some(mean) = stats.mean() {
            if mean > best_mean {
                best_mean = mean;
                best = Some(column);
            }
        }
    }
    best
}
