//! Monte Carlo Tree Search for Connect Four.
//!
//! The engine keeps a search tree rooted at the real game position. Nodes
//! live in a fixed-size arena, so a search never allocates once the engine is
//! built; when the arena fills up, the search stops and answers from the
//! statistics gathered so far.
//!
//! # Features
//!
//! - **UCB1 selection** with random tie-breaking
//! - **Random rollouts** below each newly expanded node
//! - **Tree reuse**: `advance` keeps the subtree of the move played
//! - **Deterministic**: a fixed seed reproduces every decision
//!
//! # Example
//!
//! ```
//! use connect4_mcts::{Mcts, MctsConfig};
//!
//! let mut mcts = Mcts::new(MctsConfig::for_testing()).unwrap();
//!
//! let column = mcts.run_many(500).expect("the game is not decided");
//! let placement = mcts.advance(column);
//! println!("O played column {} -> {:?}", column + 1, placement.result);
//!
//! let stats = mcts.tree_stats();
//! println!("{} of {} nodes in use", stats.live_nodes, stats.capacity);
//! ```

pub mod arena;
pub mod config;
mod node;
pub mod rng;
pub mod rollout;
pub mod search;

pub use arena::Arena;
pub use config::{Capacity, MctsConfig, DEFAULT_MEMORY_MB};
pub use node::{ChildRef, ColumnStats, Node, NodeId};
pub use rng::{SplitMix64, Xoroshiro128Plus};
pub use search::{Mcts, SearchResult, TreeStats};
