//! Validation and measurement utilities for [`Bst`].
//!
//! Used by tests and by the balanced-rebuild property: after
//! [`Bst::rebalance`] the height must equal [`balanced_height`] of the
//! record count.

use crate::types::{Bst, NodeId, NULL_NODE};

/// Minimal height of a binary tree holding `len` records: ⌈log₂(len+1)⌉.
pub fn balanced_height(len: usize) -> usize {
    (usize::BITS - len.leading_zeros()) as usize
}

impl<T: Ord> Bst<T> {
    /// Check the search invariant: for every node, all records to the left
    /// compare less and all records to the right compare greater.
    pub fn check_invariants(&self) -> bool {
        self.check_subtree(self.root, None, None)
    }

    fn check_subtree(&self, id: NodeId, min: Option<&T>, max: Option<&T>) -> bool {
        if id == NULL_NODE {
            return true;
        }
        let node = self.node(id);
        if let Some(min) = min {
            if node.record <= *min {
                return false;
            }
        }
        if let Some(max) = max {
            if node.record >= *max {
                return false;
            }
        }
        self.check_subtree(node.left, min, Some(&node.record))
            && self.check_subtree(node.right, Some(&node.record), max)
    }
}

impl<T> Bst<T> {
    /// Number of nodes on the longest root-to-leaf path; 0 for an empty tree.
    pub fn height(&self) -> usize {
        self.height_of(self.root)
    }

    fn height_of(&self, id: NodeId) -> usize {
        if id == NULL_NODE {
            return 0;
        }
        let node = self.node(id);
        1 + self.height_of(node.left).max(self.height_of(node.right))
    }
}
