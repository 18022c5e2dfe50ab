//! Search configuration parameters.
//!
//! These parameters control the playout budget, the UCB1 exploration term,
//! the rewards backed up through the tree, the arena size and seeding.

/// How much room the node arena gets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capacity {
    /// A byte budget, divided by the slot size.
    Bytes(usize),
    /// An exact node count.
    Nodes(usize),
}

impl Capacity {
    /// Byte budget given in mebibytes.
    pub const fn megabytes(mb: usize) -> Self {
        Capacity::Bytes(mb * 1024 * 1024)
    }
}

/// Default arena budget: 16 MiB.
pub const DEFAULT_MEMORY_MB: usize = 16;

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct MctsConfig {
    /// Playouts per call to `Mcts::search`.
    pub playouts: usize,

    /// Exploration constant `C` in `mean + sqrt(C * ln(total) / n)`.
    pub exploration: f32,

    /// Reward added for a win by the side choosing the column.
    pub win_score: f32,

    /// Reward added for a draw reached while expanding a column.
    pub draw_score: f32,

    /// Arena size.
    pub capacity: Capacity,

    /// PRNG seed. `None` seeds from the wall clock.
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            playouts: 100_000,
            exploration: 2.0,
            win_score: 1.0,
            draw_score: 0.1,
            capacity: Capacity::megabytes(DEFAULT_MEMORY_MB),
            seed: None,
        }
    }
}

impl MctsConfig {
    /// Small, reproducible configuration for tests.
    pub fn for_testing() -> Self {
        Self {
            playouts: 2_000,
            capacity: Capacity::Nodes(20_000),
            seed: Some(0x5EED),
            ..Default::default()
        }
    }

    /// Set the playout budget.
    pub fn with_playouts(mut self, playouts: usize) -> Self {
        self.playouts = playouts;
        self
    }

    /// Set the arena size.
    pub fn with_capacity(mut self, capacity: Capacity) -> Self {
        self.capacity = capacity;
        self
    }

    /// Fix the PRNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the exploration constant.
    pub fn with_exploration(mut self, exploration: f32) -> Self {
        self.exploration = exploration;
        self
    }
}
