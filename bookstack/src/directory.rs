//! The patron directory: a single binary search tree keyed by patron ID.

use crate::error::{LibraryError, Result};
use crate::patron::Patron;
use crate::types::Bst;

/// Every patron registered with the library.
pub struct PatronDirectory {
    patrons: Bst<Patron>,
}

impl PatronDirectory {
    pub fn new() -> PatronDirectory {
        PatronDirectory {
            patrons: Bst::new(),
        }
    }

    /// Parse a patron record line and register the patron.
    ///
    /// A duplicate ID is rejected by the tree; the rejected record is
    /// disposed of here and reported as a duplicate-entry error.
    pub fn add_patron(&mut self, line: &str) -> Result<()> {
        let patron = Patron::parse(line)?;
        match self.patrons.insert(patron) {
            Ok(()) => Ok(()),
            Err(rejected) => Err(LibraryError::duplicate(format!(
                "patron {} already registered",
                rejected.id()
            ))),
        }
    }

    /// Find a patron by ID.
    pub fn find(&self, id: &str) -> Option<&Patron> {
        self.patrons.get(&Patron::query(id))
    }

    /// Mutable variant of [`find`](PatronDirectory::find), for updating the
    /// ledger and history.
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Patron> {
        self.patrons.get_mut(&Patron::query(id))
    }

    pub fn len(&self) -> usize {
        self.patrons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patrons.is_empty()
    }

    /// Rebuild the directory tree to minimal height.
    pub fn rebalance(&mut self) {
        self.patrons.rebalance();
    }
}

impl Default for PatronDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_and_finds_patrons() {
        let mut directory = PatronDirectory::new();
        directory.add_patron("2222 Hopper Grace").unwrap();
        directory.add_patron("1111 Lovelace Ada").unwrap();

        let patron = directory.find("1111").expect("registered");
        assert_eq!(patron.first_name(), "Ada");
        assert!(directory.find("3333").is_none());
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut directory = PatronDirectory::new();
        directory.add_patron("1111 Lovelace Ada").unwrap();
        let err = directory.add_patron("1111 Byron Augusta").unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(directory.len(), 1);
        // The original registration is untouched.
        assert_eq!(directory.find("1111").unwrap().last_name(), "Lovelace");
    }

    #[test]
    fn malformed_line_is_a_parse_error() {
        let mut directory = PatronDirectory::new();
        assert!(directory.add_patron("1111").unwrap_err().is_parse());
        assert!(directory.is_empty());
    }
}
