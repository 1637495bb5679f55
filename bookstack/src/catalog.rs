//! The catalog: one binary search tree of books per category.

use std::fmt;
use std::io;

use crate::book::{Book, Category};
use crate::error::{LibraryError, Result};
use crate::factory::BookFactory;
use crate::types::Bst;

/// All books the library owns, sharded by category into per-category trees
/// indexed by [`Category::index`].
pub struct Catalog {
    factory: BookFactory,
    shelves: [Bst<Book>; Category::COUNT],
}

impl Catalog {
    /// An empty catalog with one empty tree per category.
    pub fn new() -> Catalog {
        Catalog {
            factory: BookFactory::new(),
            shelves: Default::default(),
        }
    }

    /// Parse a record line and shelve the book in its category's tree.
    ///
    /// A duplicate is rejected by the tree and handed back to us; we dispose
    /// of it and report a duplicate-entry error. No tree is mutated on any
    /// failure path.
    pub fn add_book(&mut self, line: &str) -> Result<()> {
        let book = self.factory.parse_record(line)?;
        let slot = self.factory.category_index(&book);
        match self.shelves[slot].insert(book) {
            Ok(()) => Ok(()),
            Err(rejected) => Err(LibraryError::duplicate(format!(
                "book already on shelf: {}",
                rejected.key()
            ))),
        }
    }

    /// Parse a book query line (type code, format code, key fields).
    pub fn parse_query(&self, line: &str) -> Result<Book> {
        self.factory.parse_query(line)
    }

    /// Find the shelved book matching a query record.
    pub fn find(&self, query: &Book) -> Option<&Book> {
        self.shelves[query.category().index()].get(query)
    }

    /// Mutable variant of [`find`](Catalog::find), for updating copy counts.
    pub fn find_mut(&mut self, query: &Book) -> Option<&mut Book> {
        self.shelves[query.category().index()].get_mut(query)
    }

    /// The tree backing one category's shelf.
    pub fn shelf(&self, category: Category) -> &Bst<Book> {
        &self.shelves[category.index()]
    }

    /// Total number of titles across every category.
    pub fn len(&self) -> usize {
        self.shelves.iter().map(Bst::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shelves.iter().all(Bst::is_empty)
    }

    /// Print every non-empty category in fixed order: section header, column
    /// header, then the shelf's books ascending.
    ///
    /// The section header comes from the shelf's root record, so a shelf
    /// only ever labels itself with a category it actually holds.
    pub fn display_all(&self, out: &mut impl io::Write) -> io::Result<()> {
        for category in Category::ALL {
            let shelf = &self.shelves[category.index()];
            if shelf.is_empty() {
                continue;
            }
            let header = shelf.root().category();
            writeln!(out, "{}", header.label())?;
            writeln!(out, "{}", header.column_header())?;
            for book in shelf {
                writeln!(out, "{book}")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Sideways rendering of one category's tree, for inspecting shape.
    pub fn display_sideways(&self, category: Category, out: &mut impl fmt::Write) -> fmt::Result {
        self.shelves[category.index()].display_sideways(out)
    }

    /// Rebuild every shelf to minimal height. In-order listings are
    /// unchanged.
    pub fn rebalance_all(&mut self) {
        for shelf in &mut self.shelves {
            shelf.rebalance();
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        for line in [
            "F Clancy Tom, The Hunt for Red October, 1984",
            "F Austen Jane, Emma, 1815",
            "C Seuss Dr., Green Eggs and Ham, 1960",
            "P National Geographic, 3 1988",
        ] {
            catalog.add_book(line).unwrap();
        }
        catalog
    }

    #[test]
    fn books_land_on_their_category_shelf() {
        let catalog = sample_catalog();
        assert_eq!(catalog.shelf(Category::Fiction).len(), 2);
        assert_eq!(catalog.shelf(Category::Children).len(), 1);
        assert_eq!(catalog.shelf(Category::Periodical).len(), 1);
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn duplicate_title_is_reported_and_not_shelved() {
        let mut catalog = sample_catalog();
        let err = catalog
            .add_book("F Austen Jane, Emma, 1815")
            .unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn lookup_round_trips_through_queries() {
        let catalog = sample_catalog();
        let query = catalog.parse_query("F H Austen Jane, Emma,").unwrap();
        let found = catalog.find(&query).expect("Emma is shelved");
        assert_eq!(found.year(), 1815);
        assert!(catalog
            .find(&catalog.parse_query("F H Austen Jane, Persuasion,").unwrap())
            .is_none());
    }

    #[test]
    fn display_groups_by_category_in_fixed_order() {
        let catalog = sample_catalog();
        let mut rendered = Vec::new();
        catalog.display_all(&mut rendered).unwrap();
        let text = String::from_utf8(rendered).unwrap();

        let children = text.find("CHILDREN'S BOOKS").unwrap();
        let fiction = text.find("FICTION BOOKS").unwrap();
        let periodicals = text.find("PERIODICALS").unwrap();
        assert!(children < fiction && fiction < periodicals);

        // Fiction shelf lists ascending by author.
        let austen = text.find("Austen Jane").unwrap();
        let clancy = text.find("Clancy Tom").unwrap();
        assert!(austen < clancy);
    }

    #[test]
    fn empty_categories_are_skipped() {
        let mut catalog = Catalog::new();
        catalog
            .add_book("F Austen Jane, Emma, 1815")
            .unwrap();
        let mut rendered = Vec::new();
        catalog.display_all(&mut rendered).unwrap();
        let text = String::from_utf8(rendered).unwrap();
        assert!(!text.contains("CHILDREN'S BOOKS"));
        assert!(!text.contains("PERIODICALS"));
    }

    #[test]
    fn sideways_rendering_shows_the_shelf_shape() {
        let catalog = sample_catalog();
        let mut rendering = String::new();
        catalog
            .display_sideways(Category::Fiction, &mut rendering)
            .unwrap();
        assert_eq!(rendering.lines().count(), 2);
        // Clancy sorts after Austen, so it prints first in the rotated view.
        let clancy = rendering.find("Clancy Tom").unwrap();
        let austen = rendering.find("Austen Jane").unwrap();
        assert!(clancy < austen);
    }

    #[test]
    fn rebalance_all_preserves_listings() {
        let mut catalog = sample_catalog();
        let mut before = Vec::new();
        catalog.display_all(&mut before).unwrap();
        catalog.rebalance_all();
        let mut after = Vec::new();
        catalog.display_all(&mut after).unwrap();
        assert_eq!(before, after);
    }
}
