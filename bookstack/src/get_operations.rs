//! GET operations for [`Bst`].

use std::cmp::Ordering;

use crate::types::{Bst, NULL_NODE};

impl<T: Ord> Bst<T> {
    /// Look up the stored record equal to `query`.
    ///
    /// Returns a non-owning reference to the record in the tree (not a
    /// copy), or `None` if absent. The tree is unchanged. The reference is
    /// only valid while the tree holds the record; it cannot outlive a
    /// `clear` or rebuild.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookstack::Bst;
    ///
    /// let mut tree = Bst::new();
    /// tree.insert(3).unwrap();
    /// assert_eq!(tree.get(&3), Some(&3));
    /// assert_eq!(tree.get(&4), None);
    /// ```
    pub fn get(&self, query: &T) -> Option<&T> {
        let mut current = self.root;
        while current != NULL_NODE {
            let node = self.node(current);
            match query.cmp(&node.record) {
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
                Ordering::Equal => return Some(&node.record),
            }
        }
        None
    }

    /// Mutable variant of [`get`](Bst::get), for updating a stored record in
    /// place.
    ///
    /// The caller must not modify any field that participates in the
    /// record's ordering; doing so breaks the tree's search invariant.
    pub fn get_mut(&mut self, query: &T) -> Option<&mut T> {
        let mut current = self.root;
        while current != NULL_NODE {
            match query.cmp(&self.node(current).record) {
                Ordering::Less => current = self.node(current).left,
                Ordering::Greater => current = self.node(current).right,
                Ordering::Equal => return Some(&mut self.node_mut(current).record),
            }
        }
        None
    }

    /// True if a record equal to `query` is stored.
    pub fn contains(&self, query: &T) -> bool {
        self.get(query).is_some()
    }
}
