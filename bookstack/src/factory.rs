//! Registry-based construction of book records from type-tagged text.
//!
//! The registry maps every [`Category`] to its field-parse functions and is
//! validated at construction, so the code table used to create a book and
//! the index derivation used to shelve it cannot drift apart.

use crate::book::{Book, Category};
use crate::error::{LibraryError, Result};

type ParseFn = fn(&str) -> Result<Book>;

/// One registered category: its tag plus the field parsers it delegates to.
struct RegistryEntry {
    category: Category,
    parse_record: ParseFn,
    parse_query: ParseFn,
}

/// Factory for book records and book queries.
pub struct BookFactory {
    entries: [RegistryEntry; Category::COUNT],
}

impl BookFactory {
    /// Build the registry and validate it: every category registered exactly
    /// once, in slot order, with a code that round-trips through
    /// [`Category::from_code`].
    ///
    /// # Panics
    ///
    /// Panics if the registry is inconsistent; this is a startup-time
    /// programming error, not an input error.
    pub fn new() -> BookFactory {
        let factory = BookFactory {
            entries: [
                RegistryEntry {
                    category: Category::Children,
                    parse_record: Book::parse_children_record,
                    parse_query: Book::parse_children_query,
                },
                RegistryEntry {
                    category: Category::Fiction,
                    parse_record: Book::parse_fiction_record,
                    parse_query: Book::parse_fiction_query,
                },
                RegistryEntry {
                    category: Category::Periodical,
                    parse_record: Book::parse_periodical_record,
                    parse_query: Book::parse_periodical_query,
                },
            ],
        };
        factory.validate();
        factory
    }

    fn validate(&self) {
        for (slot, entry) in self.entries.iter().enumerate() {
            assert_eq!(
                entry.category.index(),
                slot,
                "category {:?} registered in slot {slot}",
                entry.category
            );
            assert_eq!(
                Category::from_code(entry.category.code()),
                Some(entry.category),
                "code `{}` does not round-trip",
                entry.category.code()
            );
        }
    }

    /// Read the leading type code and delegate field parsing to the matching
    /// category. The whole line is consumed either way; a failed parse
    /// leaves no partial state behind.
    pub fn parse_record(&self, line: &str) -> Result<Book> {
        let (category, fields) = self.split_code(line)?;
        (self.entries[category.index()].parse_record)(fields)
    }

    /// Parse a book query: same shape as a record with a format code after
    /// the type code, and non-key fields optional.
    pub fn parse_query(&self, line: &str) -> Result<Book> {
        let (category, fields) = self.split_code(line)?;
        (self.entries[category.index()].parse_query)(fields)
    }

    /// Shelf slot for a book; by construction the inverse of the code used
    /// by [`parse_record`](BookFactory::parse_record).
    pub fn category_index(&self, book: &Book) -> usize {
        book.category().index()
    }

    fn split_code<'a>(&self, line: &'a str) -> Result<(Category, &'a str)> {
        let trimmed = line.trim_start();
        let code = trimmed
            .chars()
            .next()
            .ok_or_else(|| LibraryError::parse("empty record line"))?;
        let category = Category::from_code(code).ok_or_else(|| {
            LibraryError::parse(format!("`{code}` is not a recognized book type"))
        })?;
        Ok((category, &trimmed[code.len_utf8()..]))
    }
}

impl Default for BookFactory {
    fn default() -> Self {
        Self::new()
    }
}
