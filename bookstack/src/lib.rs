//! Library circulation simulator backed by per-category binary search trees.
//!
//! The core of the crate is [`Bst`], a generic ordered container of unique
//! records with arena-backed node storage. On top of it, [`Catalog`] shards
//! book records into one tree per [`Category`], [`PatronDirectory`] keys
//! patrons by ID, and [`Library`] replays a line-oriented script of
//! checkout/return/display [`Command`]s against both stores.
//!
//! ```
//! use bookstack::Library;
//!
//! let mut library = Library::new();
//! library
//!     .load_books("F Austen Jane, Emma, 1815\n".as_bytes())
//!     .unwrap();
//! library
//!     .load_patrons("1111 Lovelace Ada\n".as_bytes())
//!     .unwrap();
//!
//! let mut out = Vec::new();
//! let stats = library
//!     .run_commands("C 1111 F H Austen Jane, Emma,\nD\n".as_bytes(), &mut out)
//!     .unwrap();
//! assert_eq!(stats.applied, 2);
//! ```

mod book;
mod catalog;
mod command;
mod construction;
mod directory;
mod error;
mod factory;
mod get_operations;
mod insert_operations;
mod iteration;
mod library;
mod patron;
mod types;
mod validation;

pub use book::{Book, BookKey, Category, Format, DEFAULT_COPIES};
pub use catalog::Catalog;
pub use command::{Command, CommandKind};
pub use directory::PatronDirectory;
pub use error::{LibraryError, Result};
pub use factory::BookFactory;
pub use iteration::InOrderIter;
pub use library::{Library, LoadStats};
pub use patron::{Action, HistoryEvent, Patron};
pub use types::{Bst, NodeId, NULL_NODE};
pub use validation::balanced_height;

impl<T> Bst<T> {
    /// Returns the number of records in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree holds no records.
    pub fn is_empty(&self) -> bool {
        self.root == NULL_NODE
    }

    /// Release every node and record. Safe to call on an already-empty
    /// tree.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = NULL_NODE;
    }

    /// Non-owning reference to the root record, the tree's representative
    /// element.
    ///
    /// # Panics
    ///
    /// Panics if the tree is empty; callers check
    /// [`is_empty`](Bst::is_empty) first.
    pub fn root(&self) -> &T {
        assert!(self.root != NULL_NODE, "root() called on an empty tree");
        &self.node(self.root).record
    }
}
