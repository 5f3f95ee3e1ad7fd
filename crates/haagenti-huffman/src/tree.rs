//! Huffman tree construction.
//!
//! Nodes live in a single arena and refer to their children by index, so a
//! tree is released in one deallocation when it goes out of scope.
//!
//! ## Tie-breaking
//!
//! The merge queue is keyed by `(count, node index)`. Leaves are created in
//! ascending symbol order and every merged node takes the next index, so
//! among equal counts the node created first is removed first. The first
//! node removed becomes the `zero` branch. The shape therefore depends only
//! on the frequency table, which is all the decoder has.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use haagenti_core::{Error, Result};
use tracing::trace;

use crate::frequency::FrequencyTable;
use crate::symbol::Symbol;

/// Index of a node inside its tree's arena.
pub type NodeId = usize;

/// A tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: Symbol,
        count: u64,
    },
    Internal {
        count: u64,
        zero: NodeId,
        one: NodeId,
    },
}

impl Node {
    #[inline]
    pub fn count(&self) -> u64 {
        match *self {
            Node::Leaf { count, .. } | Node::Internal { count, .. } => count,
        }
    }

    /// The leaf symbol, or `None` for internal nodes.
    #[inline]
    pub fn symbol(&self) -> Option<Symbol> {
        match *self {
            Node::Leaf { symbol, .. } => Some(symbol),
            Node::Internal { .. } => None,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// An owned prefix-code tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build the optimal prefix tree for `table`.
    ///
    /// A table with a single entry yields a lone leaf whose code is empty.
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        if table.is_empty() {
            return Err(Error::corrupted("cannot build a tree from an empty frequency table"));
        }

        // n leaves need n - 1 merges.
        let mut nodes = Vec::with_capacity(table.len() * 2 - 1);
        let mut queue = BinaryHeap::with_capacity(table.len());

        for (symbol, count) in table.iter() {
            let id = nodes.len();
            nodes.push(Node::Leaf { symbol, count });
            queue.push(Reverse((count, id)));
        }

        while queue.len() > 1 {
            let (Some(Reverse((zero_count, zero))), Some(Reverse((one_count, one)))) =
                (queue.pop(), queue.pop())
            else {
                break;
            };

            let count = zero_count
                .checked_add(one_count)
                .ok_or_else(|| Error::corrupted("symbol counts overflow"))?;

            let id = nodes.len();
            nodes.push(Node::Internal { count, zero, one });
            queue.push(Reverse((count, id)));
        }

        let root = match queue.pop() {
            Some(Reverse((_, id))) => id,
            None => return Err(Error::corrupted("merge queue drained")),
        };

        let tree = Self { nodes, root };
        trace!(
            leaves = table.len(),
            nodes = tree.nodes.len(),
            depth = tree.max_depth(),
            "built huffman tree"
        );
        Ok(tree)
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn root_node(&self) -> &Node {
        &self.nodes[self.root]
    }

    /// Node at `id`. Ids come from this tree, so indexing cannot fail.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Child of `id` along `bit`, or `None` when `id` is a leaf.
    #[inline]
    pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        match self.nodes[id] {
            Node::Internal { zero, one, .. } => Some(if bit { one } else { zero }),
            Node::Leaf { .. } => None,
        }
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves (distinct symbols).
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Whether the tree is the degenerate one-leaf case.
    pub fn is_single_leaf(&self) -> bool {
        self.root_node().is_leaf()
    }

    /// Length of the longest root-to-leaf path.
    pub fn max_depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.nodes[id] {
                Node::Leaf { .. } => deepest = deepest.max(depth),
                Node::Internal { zero, one, .. } => {
                    stack.push((one, depth + 1));
                    stack.push((zero, depth + 1));
                }
            }
        }
        deepest
    }
}
