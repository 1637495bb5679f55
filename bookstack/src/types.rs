//! Core types and data structures for the binary search tree.
//!
//! Nodes live in an arena owned by the tree and refer to each other by
//! `NodeId`, so child slots can never dangle and teardown order needs no
//! manual sequencing.

// ============================================================================
// TYPE DEFINITIONS
// ============================================================================

/// Node ID type for arena-based allocation.
pub type NodeId = u32;

/// Sentinel ID marking an absent child or an empty tree.
pub const NULL_NODE: NodeId = u32::MAX;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// A single tree node: one owned record plus the IDs of its children.
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    /// The record stored at this node.
    pub(crate) record: T,
    /// Left subtree; every record there compares less than `record`.
    pub(crate) left: NodeId,
    /// Right subtree; every record there compares greater than `record`.
    pub(crate) right: NodeId,
}

impl<T> Node<T> {
    /// A node with no children.
    pub(crate) fn leaf(record: T) -> Self {
        Node {
            record,
            left: NULL_NODE,
            right: NULL_NODE,
        }
    }
}

/// Binary search tree of unique records.
///
/// The tree keys on the record's own `Ord` and rejects duplicates at
/// insertion, so an in-order walk always yields a strictly ascending
/// sequence. There is no rebalancing on insert; balance is restored only by
/// the explicit [`rebuild_from_sorted`](Bst::rebuild_from_sorted) /
/// [`rebalance`](Bst::rebalance) operations.
///
/// # Examples
///
/// ```
/// use bookstack::Bst;
///
/// let mut tree = Bst::new();
/// tree.insert("B").unwrap();
/// tree.insert("A").unwrap();
/// tree.insert("C").unwrap();
///
/// let inorder: Vec<_> = tree.iter().copied().collect();
/// assert_eq!(inorder, ["A", "B", "C"]);
/// ```
#[derive(Debug)]
pub struct Bst<T> {
    /// Arena storage; every slot is a live node.
    pub(crate) nodes: Vec<Node<T>>,
    /// Root node, or `NULL_NODE` for an empty tree.
    pub(crate) root: NodeId,
}

// ============================================================================
// ARENA ACCESS
// ============================================================================

impl<T> Bst<T> {
    /// Allocate a node in the arena and return its ID.
    pub(crate) fn alloc(&mut self, node: Node<T>) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        id
    }

    /// Borrow the node with the given ID. The ID must be live.
    pub(crate) fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id as usize]
    }

    /// Mutably borrow the node with the given ID. The ID must be live.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.nodes[id as usize]
    }
}
