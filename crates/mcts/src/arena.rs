//! Fixed-capacity node arena with an intrusive free list.
//!
//! Every slot is allocated up front. Free slots form a singly linked list
//! through `Slot::Free`, so allocating and releasing a node never touches the
//! heap during search.

use std::mem;

use connect4_core::{Connect4Error, Result};
use tracing::warn;

use crate::node::{ChildRef, Node, NodeId};

/// A slot is either a live node or a link in the free list.
#[derive(Clone, Debug)]
enum Slot {
    Live(Node),
    Free { next: Option<NodeId> },
}

/// Pending work of `free_subtree`.
#[derive(Clone, Copy, Debug)]
enum Visit {
    /// Queue the node's children, then release the node.
    Enter(NodeId),
    Release(NodeId),
}

/// Pool of MCTS nodes addressed by [`NodeId`].
///
/// Invariant: `allocated() + free_len() == capacity()`.
#[derive(Debug)]
pub struct Arena {
    slots: Vec<Slot>,
    free_head: Option<NodeId>,
    free_len: usize,
    /// Scratch stack reused by `free_subtree`.
    stack: Vec<Visit>,
}

impl Arena {
    /// Size of one arena slot in bytes.
    pub const fn slot_bytes() -> usize {
        mem::size_of::<Slot>()
    }

    /// Creates an arena holding exactly `nodes` nodes, all free.
    pub fn with_nodes(nodes: usize) -> Result<Self> {
        let nodes = nodes.min(u32::MAX as usize);
        if nodes == 0 {
            return Err(Connect4Error::InsufficientCapacity {
                bytes: 0,
                node_bytes: Self::slot_bytes(),
            });
        }
        Self::try_with_nodes(nodes).ok_or(Connect4Error::InsufficientCapacity {
            bytes: nodes.saturating_mul(Self::slot_bytes()),
            node_bytes: Self::slot_bytes(),
        })
    }

    /// Creates the largest arena that fits in `bytes`.
    ///
    /// If the allocation is refused, retries with 80% of the previous node
    /// count until it succeeds or not even one node is left.
    pub fn with_memory_budget(bytes: usize) -> Result<Self> {
        let node_bytes = Self::slot_bytes();
        let mut nodes = (bytes / node_bytes).min(u32::MAX as usize);

        while nodes > 0 {
            if let Some(arena) = Self::try_with_nodes(nodes) {
                return Ok(arena);
            }
            let shrunk = nodes * 4 / 5;
            warn!(
                requested = nodes,
                retry = shrunk,
                "Arena allocation refused, shrinking"
            );
            nodes = shrunk;
        }

        Err(Connect4Error::InsufficientCapacity { bytes, node_bytes })
    }

    fn try_with_nodes(nodes: usize) -> Option<Self> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(nodes).ok()?;
        slots.extend((1..=nodes).map(|next| Slot::Free {
            next: (next < nodes).then_some(NodeId(next as u32)),
        }));
        Some(Self {
            slots,
            free_head: Some(NodeId(0)),
            free_len: nodes,
            stack: Vec::new(),
        })
    }

    /// Total number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of free slots.
    #[inline]
    pub fn free_len(&self) -> usize {
        self.free_len
    }

    /// Number of live nodes.
    #[inline]
    pub fn allocated(&self) -> usize {
        self.capacity() - self.free_len
    }

    /// Returns true if `id` refers to a live node.
    pub fn is_live(&self, id: NodeId) -> bool {
        matches!(self.slots.get(id.index()), Some(Slot::Live(_)))
    }

    /// Takes a slot from the free list and resets it to a blank node.
    ///
    /// Returns None when every slot is in use.
    pub fn allocate(&mut self) -> Option<NodeId> {
        let id = self.free_head?;
        let slot = &mut self.slots[id.index()];
        match *slot {
            Slot::Free { next } => self.free_head = next,
            Slot::Live(_) => panic!("BUG: free list points at live node {:?}", id),
        }
        *slot = Slot::Live(Node::new());
        self.free_len -= 1;
        Some(id)
    }

    /// Returns every node of the subtree behind `child` to the free list.
    ///
    /// Children are released before their parent, in column order, so the
    /// subtree root ends up at the head of the free list.
    /// `Unexplored` and `Terminal` own no nodes and are ignored.
    ///
    /// # Panics
    /// Panics if a node of the subtree is already free.
    pub fn free_subtree(&mut self, child: ChildRef) {
        let ChildRef::Node(root) = child else {
            return;
        };

        let mut stack = mem::take(&mut self.stack);
        stack.clear();
        stack.push(Visit::Enter(root));

        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter(id) => {
                    let Slot::Live(node) = &self.slots[id.index()] else {
                        panic!("double free of node {:?}", id);
                    };
                    stack.push(Visit::Release(id));
                    stack.extend(
                        node.next
                            .iter()
                            .rev()
                            .filter_map(|c| c.node())
                            .map(Visit::Enter),
                    );
                }
                Visit::Release(id) => {
                    self.slots[id.index()] = Slot::Free {
                        next: self.free_head,
                    };
                    self.free_head = Some(id);
                    self.free_len += 1;
                }
            }
        }

        self.stack = stack;
    }

    /// Number of nodes and depth of the subtree rooted at `root`.
    ///
    /// A lone node has depth 0.
    pub fn subtree_extent(&self, root: NodeId) -> (usize, usize) {
        let mut stack = vec![(root, 0)];

        let mut nodes = 0;
        let mut depth = 0;
        while let Some((id, d)) = stack.pop() {
            nodes += 1;
            depth = depth.max(d);
            stack.extend(
                self.get(id)
                    .next
                    .iter()
                    .filter_map(|c| c.node())
                    .map(|n| (n, d + 1)),
            );
        }
        (nodes, depth)
    }

    /// Get a live node.
    ///
    /// # Panics
    /// Panics if the slot is free.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        match &self.slots[id.index()] {
            Slot::Live(node) => node,
            Slot::Free { .. } => panic!("node {:?} is not allocated", id),
        }
    }

    /// Get a live node mutably.
    ///
    /// # Panics
    /// Panics if the slot is free.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        match &mut self.slots[id.index()] {
            Slot::Live(node) => node,
            Slot::Free { .. } => panic!("node {:?} is not allocated", id),
        }
    }
}
