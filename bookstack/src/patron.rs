//! Patron records: identity, checkout ledger, and borrowing history.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::io;

use crate::book::BookKey;
use crate::error::{LibraryError, Result};

/// Width of the action column in history listings.
const ACTION_WIDTH: usize = 10;

/// What a patron did with a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Checkout,
    Return,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Checkout => "CheckOut",
            Action::Return => "Return",
        }
    }
}

/// One entry in a patron's borrowing history, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEvent {
    pub action: Action,
    pub book: BookKey,
}

/// A registered library patron.
///
/// Ordered and compared by ID alone; names, the checkout ledger, and the
/// history never participate in comparisons, so a bare-ID query record finds
/// the full stored record.
#[derive(Debug, Clone)]
pub struct Patron {
    id: String,
    last_name: String,
    first_name: String,
    /// Copies currently held, by book key.
    checkouts: HashMap<BookKey, u32>,
    history: Vec<HistoryEvent>,
}

impl Patron {
    pub fn new(
        id: impl Into<String>,
        last_name: impl Into<String>,
        first_name: impl Into<String>,
    ) -> Patron {
        Patron {
            id: id.into(),
            last_name: last_name.into(),
            first_name: first_name.into(),
            checkouts: HashMap::new(),
            history: Vec::new(),
        }
    }

    /// A bare-ID record for tree lookups.
    pub fn query(id: impl Into<String>) -> Patron {
        Patron::new(id, "", "")
    }

    /// Parse a patron record line: `id last first`, whitespace-separated.
    /// Anything after the third token is ignored.
    pub(crate) fn parse(line: &str) -> Result<Patron> {
        let mut tokens = line.split_whitespace();
        let (Some(id), Some(last_name), Some(first_name)) =
            (tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(LibraryError::parse(
                "expected `id last-name first-name` tokens",
            ));
        };
        Ok(Patron::new(id, last_name, first_name))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Copies of `book` this patron currently holds.
    pub fn holding(&self, book: &BookKey) -> u32 {
        self.checkouts.get(book).copied().unwrap_or(0)
    }

    /// Record a successful checkout in the ledger and the history.
    pub fn record_checkout(&mut self, book: BookKey) {
        *self.checkouts.entry(book.clone()).or_insert(0) += 1;
        self.history.push(HistoryEvent {
            action: Action::Checkout,
            book,
        });
    }

    /// Record a return. Fails without mutating if the patron does not hold a
    /// copy of the book.
    pub fn record_return(&mut self, book: &BookKey) -> bool {
        match self.checkouts.get_mut(book) {
            Some(held) if *held > 0 => {
                *held -= 1;
                self.history.push(HistoryEvent {
                    action: Action::Return,
                    book: book.clone(),
                });
                true
            }
            _ => false,
        }
    }

    /// Events in the order they happened.
    pub fn history(&self) -> &[HistoryEvent] {
        &self.history
    }

    /// Write the patron line followed by one indented line per history
    /// event.
    pub fn display_history(&self, out: &mut impl io::Write) -> io::Result<()> {
        writeln!(out, "{self}")?;
        for event in &self.history {
            writeln!(
                out,
                "  {:<width$}{}",
                event.action.label(),
                event.book,
                width = ACTION_WIDTH
            )?;
        }
        Ok(())
    }
}

impl Ord for Patron {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl PartialOrd for Patron {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Patron {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Patron {}

impl fmt::Display for Patron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.id, self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::Book;

    #[test]
    fn parses_three_tokens() {
        let patron = Patron::parse("1111 Lovelace Ada").unwrap();
        assert_eq!(patron.id(), "1111");
        assert_eq!(patron.last_name(), "Lovelace");
        assert_eq!(patron.first_name(), "Ada");
    }

    #[test]
    fn rejects_short_lines() {
        assert!(Patron::parse("1111 Lovelace").is_err());
        assert!(Patron::parse("").is_err());
    }

    #[test]
    fn query_record_matches_full_record() {
        let full = Patron::new("2222", "Hopper", "Grace");
        assert_eq!(full, Patron::query("2222"));
    }

    #[test]
    fn return_without_checkout_fails_without_mutating() {
        let mut patron = Patron::new("1111", "Lovelace", "Ada");
        let key = Book::fiction("Austen Jane", "Emma", 1815).key();
        assert!(!patron.record_return(&key));
        assert!(patron.history().is_empty());
    }

    #[test]
    fn ledger_tracks_copies_per_book() {
        let mut patron = Patron::new("1111", "Lovelace", "Ada");
        let key = Book::fiction("Austen Jane", "Emma", 1815).key();
        patron.record_checkout(key.clone());
        patron.record_checkout(key.clone());
        assert_eq!(patron.holding(&key), 2);
        assert!(patron.record_return(&key));
        assert_eq!(patron.holding(&key), 1);
        assert_eq!(patron.history().len(), 3);
    }
}
