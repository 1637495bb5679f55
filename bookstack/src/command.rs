//! Command parsing and execution.
//!
//! Commands are plain values owned by the caller. Parsing resolves only the
//! text; patron and book references are resolved at execution time, and a
//! failed command is discarded without mutating either store.

use std::io;

use crate::book::Book;
use crate::catalog::Catalog;
use crate::directory::PatronDirectory;
use crate::error::{LibraryError, Result};

/// Command type tag, mapped through its own registry of one-character codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Checkout,
    Return,
    DisplayLibrary,
    PatronHistory,
}

impl CommandKind {
    pub const ALL: [CommandKind; 4] = [
        CommandKind::Checkout,
        CommandKind::Return,
        CommandKind::DisplayLibrary,
        CommandKind::PatronHistory,
    ];

    /// One-character command code at the start of a script line.
    pub fn code(self) -> char {
        match self {
            CommandKind::Checkout => 'C',
            CommandKind::Return => 'R',
            CommandKind::DisplayLibrary => 'D',
            CommandKind::PatronHistory => 'H',
        }
    }

    /// Inverse of [`code`](CommandKind::code); `None` for unrecognized
    /// codes.
    pub fn from_code(code: char) -> Option<CommandKind> {
        match code.to_ascii_uppercase() {
            'C' => Some(CommandKind::Checkout),
            'R' => Some(CommandKind::Return),
            'D' => Some(CommandKind::DisplayLibrary),
            'H' => Some(CommandKind::PatronHistory),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CommandKind::Checkout => "CHECKOUT",
            CommandKind::Return => "RETURN",
            CommandKind::DisplayLibrary => "DISPLAY LIBRARY",
            CommandKind::PatronHistory => "PATRON HISTORY",
        }
    }
}

/// One unit of work parsed from the command script.
#[derive(Debug, Clone)]
pub enum Command {
    /// Take a copy off the shelf for a patron.
    Checkout { patron_id: String, query: Book },
    /// Put a patron's copy back on the shelf.
    Return { patron_id: String, query: Book },
    /// Print the whole catalog, sorted and grouped by category.
    DisplayLibrary,
    /// Print a patron's borrowing history.
    PatronHistory { patron_id: String },
}

/// `<patron-id> <book-query>` tail shared by checkout and return lines.
fn parse_patron_and_query(rest: &str, catalog: &Catalog) -> Result<(String, Book)> {
    let rest = rest.trim_start();
    let (patron_id, query_text) = rest
        .split_once(char::is_whitespace)
        .ok_or_else(|| LibraryError::parse("expected `patron-id book-query`"))?;
    let query = catalog.parse_query(query_text)?;
    Ok((patron_id.to_string(), query))
}

impl Command {
    /// Parse one script line. The catalog supplies the book-query parser.
    pub fn parse(line: &str, catalog: &Catalog) -> Result<Command> {
        let trimmed = line.trim_start();
        let code = trimmed
            .chars()
            .next()
            .ok_or_else(|| LibraryError::parse("empty command line"))?;
        let kind = CommandKind::from_code(code).ok_or_else(|| {
            LibraryError::parse(format!("`{code}` is not a recognized command"))
        })?;
        let rest = &trimmed[code.len_utf8()..];
        match kind {
            CommandKind::DisplayLibrary => Ok(Command::DisplayLibrary),
            CommandKind::PatronHistory => {
                let patron_id = rest.split_whitespace().next().ok_or_else(|| {
                    LibraryError::parse("history command is missing a patron id")
                })?;
                Ok(Command::PatronHistory {
                    patron_id: patron_id.to_string(),
                })
            }
            CommandKind::Checkout => {
                let (patron_id, query) = parse_patron_and_query(rest, catalog)?;
                Ok(Command::Checkout { patron_id, query })
            }
            CommandKind::Return => {
                let (patron_id, query) = parse_patron_and_query(rest, catalog)?;
                Ok(Command::Return { patron_id, query })
            }
        }
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Checkout { .. } => CommandKind::Checkout,
            Command::Return { .. } => CommandKind::Return,
            Command::DisplayLibrary => CommandKind::DisplayLibrary,
            Command::PatronHistory { .. } => CommandKind::PatronHistory,
        }
    }

    /// Execute against the stores, writing display output to `out`.
    ///
    /// Every failure is local to this command: the error carries the
    /// diagnostic and neither store has been mutated.
    pub fn execute(
        &self,
        catalog: &mut Catalog,
        patrons: &mut PatronDirectory,
        out: &mut impl io::Write,
    ) -> Result<()> {
        match self {
            Command::Checkout { patron_id, query } => {
                let patron = patrons.find_mut(patron_id).ok_or_else(|| {
                    LibraryError::not_found(format!("patron {patron_id} is not registered"))
                })?;
                let book = catalog.find_mut(query).ok_or_else(|| {
                    LibraryError::not_found(format!("book {} is not in the catalog", query.key()))
                })?;
                if !book.check_out() {
                    return Err(LibraryError::unavailable(format!(
                        "no copies of {} left for patron {}",
                        book.key(),
                        patron.id()
                    )));
                }
                patron.record_checkout(book.key());
                Ok(())
            }
            Command::Return { patron_id, query } => {
                let patron = patrons.find_mut(patron_id).ok_or_else(|| {
                    LibraryError::not_found(format!("patron {patron_id} is not registered"))
                })?;
                let book = catalog.find_mut(query).ok_or_else(|| {
                    LibraryError::not_found(format!("book {} is not in the catalog", query.key()))
                })?;
                let key = book.key();
                if book.at_capacity() {
                    return Err(LibraryError::unavailable(format!(
                        "every copy of {key} is already shelved"
                    )));
                }
                if !patron.record_return(&key) {
                    return Err(LibraryError::not_found(format!(
                        "patron {} never checked out {key}",
                        patron.id()
                    )));
                }
                let checked_in = book.check_in();
                debug_assert!(checked_in, "capacity verified before the return");
                Ok(())
            }
            Command::DisplayLibrary => {
                catalog.display_all(out)?;
                Ok(())
            }
            Command::PatronHistory { patron_id } => {
                let patron = patrons.find(patron_id).ok_or_else(|| {
                    LibraryError::not_found(format!("patron {patron_id} is not registered"))
                })?;
                patron.display_history(out)?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::DEFAULT_COPIES;

    fn stores() -> (Catalog, PatronDirectory) {
        let mut catalog = Catalog::new();
        catalog
            .add_book("F Austen Jane, Emma, 1815")
            .unwrap();
        let mut patrons = PatronDirectory::new();
        patrons.add_patron("1111 Lovelace Ada").unwrap();
        (catalog, patrons)
    }

    fn run(line: &str, catalog: &mut Catalog, patrons: &mut PatronDirectory) -> Result<()> {
        let command = Command::parse(line, catalog)?;
        command.execute(catalog, patrons, &mut Vec::<u8>::new())
    }

    #[test]
    fn checkout_moves_a_copy_to_the_patron() {
        let (mut catalog, mut patrons) = stores();
        run("C 1111 F H Austen Jane, Emma,", &mut catalog, &mut patrons).unwrap();

        let query = catalog.parse_query("F H Austen Jane, Emma,").unwrap();
        let book = catalog.find(&query).unwrap();
        assert_eq!(book.available(), DEFAULT_COPIES - 1);
        let patron = patrons.find("1111").unwrap();
        assert_eq!(patron.holding(&book.key()), 1);
        assert_eq!(patron.history().len(), 1);
    }

    #[test]
    fn checkout_with_zero_copies_mutates_nothing() {
        let (mut catalog, mut patrons) = stores();
        for _ in 0..DEFAULT_COPIES {
            run("C 1111 F H Austen Jane, Emma,", &mut catalog, &mut patrons).unwrap();
        }
        let err =
            run("C 1111 F H Austen Jane, Emma,", &mut catalog, &mut patrons).unwrap_err();
        assert!(matches!(err, LibraryError::Unavailable(_)));

        let query = catalog.parse_query("F H Austen Jane, Emma,").unwrap();
        let book = catalog.find(&query).unwrap();
        assert_eq!(book.available(), 0);
        // History holds only the successful checkouts.
        assert_eq!(
            patrons.find("1111").unwrap().history().len(),
            DEFAULT_COPIES as usize
        );
    }

    #[test]
    fn return_without_checkout_mutates_nothing() {
        let (mut catalog, mut patrons) = stores();
        // Free a shelf slot so capacity is not the failing precondition.
        run("C 1111 F H Austen Jane, Emma,", &mut catalog, &mut patrons).unwrap();
        patrons.add_patron("2222 Hopper Grace").unwrap();

        let err =
            run("R 2222 F H Austen Jane, Emma,", &mut catalog, &mut patrons).unwrap_err();
        assert!(err.is_not_found());

        let query = catalog.parse_query("F H Austen Jane, Emma,").unwrap();
        assert_eq!(catalog.find(&query).unwrap().available(), DEFAULT_COPIES - 1);
        assert!(patrons.find("2222").unwrap().history().is_empty());
    }

    #[test]
    fn return_restores_the_copy() {
        let (mut catalog, mut patrons) = stores();
        run("C 1111 F H Austen Jane, Emma,", &mut catalog, &mut patrons).unwrap();
        run("R 1111 F H Austen Jane, Emma,", &mut catalog, &mut patrons).unwrap();

        let query = catalog.parse_query("F H Austen Jane, Emma,").unwrap();
        assert_eq!(catalog.find(&query).unwrap().available(), DEFAULT_COPIES);
        assert_eq!(patrons.find("1111").unwrap().history().len(), 2);
    }

    #[test]
    fn unknown_patron_or_book_fails_the_command() {
        let (mut catalog, mut patrons) = stores();
        assert!(run("C 9999 F H Austen Jane, Emma,", &mut catalog, &mut patrons)
            .unwrap_err()
            .is_not_found());
        assert!(run("C 1111 F H Austen Jane, Persuasion,", &mut catalog, &mut patrons)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn unrecognized_command_code_is_a_parse_error() {
        let (catalog, _) = stores();
        assert!(Command::parse("Z 1111", &catalog).unwrap_err().is_parse());
        assert!(Command::parse("", &catalog).unwrap_err().is_parse());
    }

    #[test]
    fn command_codes_round_trip() {
        for kind in CommandKind::ALL {
            assert_eq!(CommandKind::from_code(kind.code()), Some(kind));
        }
    }
}
