use thiserror::Error;

/// Errors that can occur while playing or searching Connect Four
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Connect4Error {
    #[error("Invalid column: {0}")]
    InvalidColumn(usize),

    #[error("Column {0} is full")]
    ColumnFull(usize),

    #[error("Insufficient capacity: {bytes} bytes cannot hold a single {node_bytes}-byte node")]
    InsufficientCapacity { bytes: usize, node_bytes: usize },

    #[error("Arena exhausted: all {capacity} nodes are in use")]
    ArenaExhausted { capacity: usize },
}

/// Convenience Result type for Connect Four operations
pub type Result<T> = std::result::Result<T, Connect4Error>;
