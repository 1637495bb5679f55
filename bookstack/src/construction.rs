//! Construction, bulk rebuild, and copy operations for [`Bst`].
//!
//! This module covers the whole-tree lifecycle: creating an empty tree,
//! rebuilding a balanced tree from a sorted vector, draining a tree back
//! into a sorted vector, deep copy, and structural equality.

use crate::types::{Bst, Node, NodeId, NULL_NODE};

impl<T> Bst<T> {
    /// Create an empty tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookstack::Bst;
    ///
    /// let tree: Bst<i32> = Bst::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn new() -> Self {
        Bst {
            nodes: Vec::new(),
            root: NULL_NODE,
        }
    }

    /// In-order node IDs of the subtree rooted at `id`, appended to `out`.
    pub(crate) fn push_in_order(&self, id: NodeId, out: &mut Vec<NodeId>) {
        if id == NULL_NODE {
            return;
        }
        let node = self.node(id);
        self.push_in_order(node.left, out);
        out.push(id);
        self.push_in_order(node.right, out);
    }
}

impl<T> Default for Bst<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Bst<T> {
    /// Build a height-balanced tree from a strictly ascending vector.
    ///
    /// Constructor form of [`rebuild_from_sorted`](Bst::rebuild_from_sorted).
    ///
    /// # Examples
    ///
    /// ```
    /// use bookstack::Bst;
    ///
    /// let tree = Bst::from_sorted_vec(vec![1, 2, 3, 4, 5, 6, 7]);
    /// assert_eq!(*tree.root(), 4);
    /// assert_eq!(tree.height(), 3);
    /// ```
    pub fn from_sorted_vec(records: Vec<T>) -> Self {
        let mut tree = Self::new();
        tree.rebuild_from_sorted(records);
        tree
    }

    /// Replace the tree's contents with a height-balanced tree built from a
    /// sorted vector.
    ///
    /// The midpoint of each range becomes the subtree root; the halves on
    /// either side recursively become its subtrees, so the resulting height
    /// is ⌈log₂(n+1)⌉. The previous contents are released first.
    ///
    /// The input must already be strictly ascending (sorted, no duplicates);
    /// this operation balances, it does not sort. The precondition is checked
    /// in debug builds only.
    pub fn rebuild_from_sorted(&mut self, records: Vec<T>) {
        debug_assert!(
            records.windows(2).all(|pair| pair[0] < pair[1]),
            "rebuild_from_sorted requires a strictly ascending input"
        );
        self.clear();
        let len = records.len();
        if len == 0 {
            return;
        }
        self.nodes.reserve(len);
        let mut slots: Vec<Option<T>> = records.into_iter().map(Some).collect();
        self.root = self.build_balanced(&mut slots, 0, len - 1);
    }

    /// Build the subtree for `slots[start..=end]`; midpoint is the root.
    fn build_balanced(&mut self, slots: &mut [Option<T>], start: usize, end: usize) -> NodeId {
        let mid = start + (end - start) / 2;
        let record = slots[mid].take().expect("slot consumed twice");
        let id = self.alloc(Node::leaf(record));
        if mid > start {
            let left = self.build_balanced(slots, start, mid - 1);
            self.node_mut(id).left = left;
        }
        if mid < end {
            let right = self.build_balanced(slots, mid + 1, end);
            self.node_mut(id).right = right;
        }
        id
    }

    /// Drain the tree into an ascending vector, leaving nothing behind.
    ///
    /// Pairs with [`rebuild_from_sorted`](Bst::rebuild_from_sorted) to
    /// rebalance an existing tree.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut order = Vec::with_capacity(self.nodes.len());
        self.push_in_order(self.root, &mut order);
        self.root = NULL_NODE;
        let mut slots: Vec<Option<Node<T>>> = self.nodes.drain(..).map(Some).collect();
        order
            .into_iter()
            .map(|id| slots[id as usize].take().expect("node visited twice").record)
            .collect()
    }

    /// Rebuild the tree to minimal height: drain in-order, then rebuild
    /// balanced. The in-order sequence is unchanged.
    pub fn rebalance(&mut self) {
        let drained = std::mem::take(self).into_sorted_vec();
        self.rebuild_from_sorted(drained);
    }
}

// ============================================================================
// COPY CONSTRUCTION AND STRUCTURAL EQUALITY
// ============================================================================

impl<T: Clone> Bst<T> {
    /// Copy the subtree rooted at `id` into `dst`, pre-order, and return the
    /// new root ID.
    fn clone_subtree(src: &Bst<T>, id: NodeId, dst: &mut Bst<T>) -> NodeId {
        let node = src.node(id);
        let new_id = dst.alloc(Node::leaf(node.record.clone()));
        if node.left != NULL_NODE {
            let left = Self::clone_subtree(src, node.left, dst);
            dst.node_mut(new_id).left = left;
        }
        if node.right != NULL_NODE {
            let right = Self::clone_subtree(src, node.right, dst);
            dst.node_mut(new_id).right = right;
        }
        new_id
    }
}

impl<T: Clone> Clone for Bst<T> {
    /// Deep copy: every node and its record is copied pre-order into a fresh
    /// arena. The copy has identical shape and values and is fully
    /// independent of the original.
    fn clone(&self) -> Self {
        let mut copy = Bst::new();
        copy.nodes.reserve(self.nodes.len());
        if self.root != NULL_NODE {
            copy.root = Self::clone_subtree(self, self.root, &mut copy);
        }
        copy
    }
}

impl<T: PartialEq> Bst<T> {
    /// Node-by-node comparison of shape and records.
    fn subtree_eq(&self, id: NodeId, other: &Bst<T>, other_id: NodeId) -> bool {
        match (id == NULL_NODE, other_id == NULL_NODE) {
            (true, true) => true,
            (false, false) => {
                let a = self.node(id);
                let b = other.node(other_id);
                a.record == b.record
                    && self.subtree_eq(a.left, other, b.left)
                    && self.subtree_eq(a.right, other, b.right)
            }
            _ => false,
        }
    }
}

impl<T: PartialEq> PartialEq for Bst<T> {
    /// Structural equality: true only if both trees have the same shape and
    /// equal records at every position. Independent of arena numbering.
    fn eq(&self, other: &Self) -> bool {
        self.subtree_eq(self.root, other, other.root)
    }
}

impl<T: Eq> Eq for Bst<T> {}
