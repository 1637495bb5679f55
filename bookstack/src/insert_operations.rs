//! INSERT operations for [`Bst`].

use std::cmp::Ordering;

use crate::types::{Bst, Node, NULL_NODE};

impl<T: Ord> Bst<T> {
    /// Insert a record at its sorted position.
    ///
    /// Walks from the root, descending left on `Less` and right on
    /// `Greater`, and attaches the record as a new leaf. On `Equal` the tree
    /// does not take ownership: the duplicate is handed back as
    /// `Err(record)` and the caller disposes of it. Duplicate rejection is a
    /// normal outcome, not an error condition.
    ///
    /// No rebalancing is performed; see [`rebalance`](Bst::rebalance).
    ///
    /// # Examples
    ///
    /// ```
    /// use bookstack::Bst;
    ///
    /// let mut tree = Bst::new();
    /// assert!(tree.insert(7).is_ok());
    /// assert_eq!(tree.insert(7), Err(7));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, record: T) -> Result<(), T> {
        if self.root == NULL_NODE {
            self.root = self.alloc(Node::leaf(record));
            return Ok(());
        }
        let mut current = self.root;
        loop {
            match record.cmp(&self.node(current).record) {
                Ordering::Less => {
                    let left = self.node(current).left;
                    if left == NULL_NODE {
                        let id = self.alloc(Node::leaf(record));
                        self.node_mut(current).left = id;
                        return Ok(());
                    }
                    current = left;
                }
                Ordering::Greater => {
                    let right = self.node(current).right;
                    if right == NULL_NODE {
                        let id = self.alloc(Node::leaf(record));
                        self.node_mut(current).right = id;
                        return Ok(());
                    }
                    current = right;
                }
                Ordering::Equal => return Err(record),
            }
        }
    }
}
