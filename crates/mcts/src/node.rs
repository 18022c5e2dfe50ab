//! MCTS node types for arena storage.
//!
//! Nodes never hold a board. The position a node stands for is implied by
//! the path of columns from the root and is recomputed during each playout.

use connect4_board::WIDTH;
use connect4_core::Outcome;

/// Index into the node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Slot index inside the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// What lies behind one column of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ChildRef {
    /// Never expanded.
    #[default]
    Unexplored,
    /// Expanded into a live node.
    Node(NodeId),
    /// Playing the column ends the game.
    Terminal(Outcome),
}

impl ChildRef {
    /// Returns true if the column has not been expanded yet.
    #[inline]
    pub const fn is_unexplored(self) -> bool {
        matches!(self, ChildRef::Unexplored)
    }

    /// The child node, if the column leads to one.
    #[inline]
    pub const fn node(self) -> Option<NodeId> {
        match self {
            ChildRef::Node(id) => Some(id),
            _ => None,
        }
    }
}

/// Per-column statistics of a single node.
///
/// `playouts[c]` counts the playouts that went through column `c` and
/// `score[c]` accumulates their rewards, both from the point of view of the
/// player to move at this node.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub next: [ChildRef; WIDTH],
    pub playouts: [u32; WIDTH],
    pub score: [f32; WIDTH],
}

impl Node {
    /// A node with every column unexplored and zeroed statistics.
    pub const fn new() -> Self {
        Self {
            next: [ChildRef::Unexplored; WIDTH],
            playouts: [0; WIDTH],
            score: [0.0; WIDTH],
        }
    }

    /// Sum of playouts over all columns.
    #[inline]
    pub fn total_playouts(&self) -> u64 {
        self.playouts.iter().map(|&p| u64::from(p)).sum()
    }

    /// Statistics of one column.
    pub fn column_stats(&self, column: usize) -> ColumnStats {
        ColumnStats {
            child: self.next[column],
            playouts: self.playouts[column],
            score: self.score[column],
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of one root column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnStats {
    pub child: ChildRef,
    pub playouts: u32,
    pub score: f32,
}

impl ColumnStats {
    /// Mean reward, or None if the column was never tried.
    ///
    /// Computed in `f64` so that move choice does not depend on `f32`
    /// rounding of the quotient.
    pub fn mean(&self) -> Option<f64> {
        if self.playouts == 0 {
            None
        } else {
            Some(f64::from(self.score) / f64::from(self.playouts))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connect4_core::Player;

    #[test]
    fn test_new_node_is_blank() {
        let node = Node::new();
        assert!(node.next.iter().all(|c| c.is_unexplored()));
        assert_eq!(node.total_playouts(), 0);
        assert!(node.score.iter().all(|&s| s == 0.0));
        assert_eq!(node, Node::default());
    }

    #[test]
    fn test_child_ref_node() {
        assert_eq!(ChildRef::Node(NodeId(4)).node(), Some(NodeId(4)));
        assert_eq!(ChildRef::Unexplored.node(), None);
        assert_eq!(ChildRef::Terminal(Outcome::Draw).node(), None);
        assert!(!ChildRef::Terminal(Outcome::Win(Player::O)).is_unexplored());
    }

    #[test]
    fn test_column_stats_mean() {
        let mut node = Node::new();
        assert_eq!(node.column_stats(2).mean(), None);

        node.playouts[2] = 4;
        node.score[2] = 3.0;
        let stats = node.column_stats(2);
        assert_eq!(stats.playouts, 4);
        assert!((stats.mean().unwrap() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_total_playouts() {
        let mut node = Node::new();
        node.playouts = [1, 2, 3, 0, 0, 0, u32::MAX];
        assert_eq!(node.total_playouts(), 6 + u64::from(u32::MAX));
    }
}
