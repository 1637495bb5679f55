//! Book records: categories, ordering keys, copy counts, and field parsing.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{LibraryError, Result};

/// Number of copies the library stocks for every new title.
pub const DEFAULT_COPIES: u32 = 5;

// Column widths for the fixed-width display rows.
const AVAIL_WIDTH: usize = 5;
const AUTHOR_WIDTH: usize = 22;
const TITLE_WIDTH: usize = 36;
const MONTH_WIDTH: usize = 5;
const YEAR_WIDTH: usize = 4;

/// Truncate to at most `max` characters, on a character boundary.
fn truncated(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

// ============================================================================
// CATEGORY AND FORMAT TAGS
// ============================================================================

/// Concrete kind of a book record; doubles as the shelf index in the
/// catalog. Variant order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Children,
    Fiction,
    Periodical,
}

impl Category {
    /// Number of categories; the catalog owns one tree per entry.
    pub const COUNT: usize = 3;

    /// All categories in display order.
    pub const ALL: [Category; Self::COUNT] =
        [Category::Children, Category::Fiction, Category::Periodical];

    /// One-character type code used in record and command lines.
    pub fn code(self) -> char {
        match self {
            Category::Children => 'C',
            Category::Fiction => 'F',
            Category::Periodical => 'P',
        }
    }

    /// Inverse of [`code`](Category::code); `None` for unrecognized codes.
    pub fn from_code(code: char) -> Option<Category> {
        match code.to_ascii_uppercase() {
            'C' => Some(Category::Children),
            'F' => Some(Category::Fiction),
            'P' => Some(Category::Periodical),
            _ => None,
        }
    }

    /// Shelf slot in the catalog.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Section header shown above the category's listing.
    pub fn label(self) -> &'static str {
        match self {
            Category::Children => "CHILDREN'S BOOKS",
            Category::Fiction => "FICTION BOOKS",
            Category::Periodical => "PERIODICALS",
        }
    }

    /// Column header row matching this category's display rows.
    pub fn column_header(self) -> String {
        match self {
            Category::Children => format!(
                "{:>avail$}  {:<title$}  {:<author$}  {:>year$}",
                "AVAIL",
                "TITLE",
                "AUTHOR",
                "YEAR",
                avail = AVAIL_WIDTH,
                title = TITLE_WIDTH,
                author = AUTHOR_WIDTH,
                year = YEAR_WIDTH,
            ),
            Category::Fiction => format!(
                "{:>avail$}  {:<author$}  {:<title$}  {:>year$}",
                "AVAIL",
                "AUTHOR",
                "TITLE",
                "YEAR",
                avail = AVAIL_WIDTH,
                author = AUTHOR_WIDTH,
                title = TITLE_WIDTH,
                year = YEAR_WIDTH,
            ),
            Category::Periodical => format!(
                "{:>avail$}  {:<title$}  {:>month$}  {:>year$}",
                "AVAIL",
                "TITLE",
                "MONTH",
                "YEAR",
                avail = AVAIL_WIDTH,
                title = TITLE_WIDTH,
                month = MONTH_WIDTH,
                year = YEAR_WIDTH,
            ),
        }
    }
}

/// Physical format of a copy. Only hardcopy circulates today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Format {
    #[default]
    Hardcopy,
}

impl Format {
    /// One-character format code used in query lines.
    pub fn code(self) -> char {
        match self {
            Format::Hardcopy => 'H',
        }
    }

    /// Inverse of [`code`](Format::code); `None` for unrecognized codes.
    pub fn from_code(code: char) -> Option<Format> {
        match code.to_ascii_uppercase() {
            'H' => Some(Format::Hardcopy),
            _ => None,
        }
    }
}

// ============================================================================
// BOOK RECORD
// ============================================================================

/// A unique title plus its circulating copy counts.
///
/// Ordering is a tagged comparison: category first, then that category's own
/// key fields (fiction: author, title; children's: title, author;
/// periodicals: year, month, title). Comparing books of different categories
/// is therefore well-defined, and equality deliberately ignores non-key
/// fields such as copy counts and, for fiction and children's books, the
/// publication year.
#[derive(Debug, Clone)]
pub struct Book {
    category: Category,
    /// Author, `last first`; empty for periodicals.
    author: String,
    title: String,
    /// Publication month, 1-12; periodicals only, 0 otherwise.
    month: u32,
    year: i32,
    format: Format,
    available: u32,
    total: u32,
}

impl Book {
    /// A fiction record with the default copy counts.
    pub fn fiction(author: impl Into<String>, title: impl Into<String>, year: i32) -> Book {
        Book {
            category: Category::Fiction,
            author: author.into(),
            title: title.into(),
            month: 0,
            year,
            format: Format::Hardcopy,
            available: DEFAULT_COPIES,
            total: DEFAULT_COPIES,
        }
    }

    /// A children's record with the default copy counts.
    pub fn children(author: impl Into<String>, title: impl Into<String>, year: i32) -> Book {
        Book {
            category: Category::Children,
            ..Book::fiction(author, title, year)
        }
    }

    /// A periodical record with the default copy counts.
    pub fn periodical(title: impl Into<String>, month: u32, year: i32) -> Book {
        Book {
            category: Category::Periodical,
            author: String::new(),
            title: title.into(),
            month,
            year,
            format: Format::Hardcopy,
            available: DEFAULT_COPIES,
            total: DEFAULT_COPIES,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Copies currently on the shelf.
    pub fn available(&self) -> u32 {
        self.available
    }

    /// Copies the library owns in total.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// True if at least one copy is on the shelf.
    pub fn is_available(&self) -> bool {
        self.available > 0
    }

    /// True if every copy is already on the shelf, so nothing can be
    /// returned.
    pub fn at_capacity(&self) -> bool {
        self.available >= self.total
    }

    /// Take one copy off the shelf. Fails without mutating when none are
    /// available.
    pub fn check_out(&mut self) -> bool {
        if self.available == 0 {
            return false;
        }
        self.available -= 1;
        true
    }

    /// Put one copy back on the shelf. Fails without mutating when the shelf
    /// already holds every copy.
    pub fn check_in(&mut self) -> bool {
        if self.at_capacity() {
            return false;
        }
        self.available += 1;
        true
    }

    /// Owned ordering key, for ledgers and history lines that cannot hold a
    /// reference into the catalog.
    pub fn key(&self) -> BookKey {
        match self.category {
            Category::Children => BookKey::Children {
                title: self.title.clone(),
                author: self.author.clone(),
            },
            Category::Fiction => BookKey::Fiction {
                author: self.author.clone(),
                title: self.title.clone(),
            },
            Category::Periodical => BookKey::Periodical {
                year: self.year,
                month: self.month,
                title: self.title.clone(),
            },
        }
    }

    /// Category-specific key comparison; callers have already matched the
    /// categories.
    fn key_cmp(&self, other: &Book) -> Ordering {
        match self.category {
            Category::Children => self
                .title
                .cmp(&other.title)
                .then_with(|| self.author.cmp(&other.author)),
            Category::Fiction => self
                .author
                .cmp(&other.author)
                .then_with(|| self.title.cmp(&other.title)),
            Category::Periodical => self
                .year
                .cmp(&other.year)
                .then_with(|| self.month.cmp(&other.month))
                .then_with(|| self.title.cmp(&other.title)),
        }
    }
}

impl Ord for Book {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.key_cmp(other))
    }
}

impl PartialOrd for Book {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Book {}

impl fmt::Display for Book {
    /// Fixed-width display row; column order follows the category's key.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category {
            Category::Children => write!(
                f,
                "{:>avail$}  {:<title$}  {:<author$}  {:>year$}",
                self.available,
                truncated(&self.title, TITLE_WIDTH),
                truncated(&self.author, AUTHOR_WIDTH),
                self.year,
                avail = AVAIL_WIDTH,
                title = TITLE_WIDTH,
                author = AUTHOR_WIDTH,
                year = YEAR_WIDTH,
            ),
            Category::Fiction => write!(
                f,
                "{:>avail$}  {:<author$}  {:<title$}  {:>year$}",
                self.available,
                truncated(&self.author, AUTHOR_WIDTH),
                truncated(&self.title, TITLE_WIDTH),
                self.year,
                avail = AVAIL_WIDTH,
                author = AUTHOR_WIDTH,
                title = TITLE_WIDTH,
                year = YEAR_WIDTH,
            ),
            Category::Periodical => write!(
                f,
                "{:>avail$}  {:<title$}  {:>month$}  {:>year$}",
                self.available,
                truncated(&self.title, TITLE_WIDTH),
                self.month,
                self.year,
                avail = AVAIL_WIDTH,
                title = TITLE_WIDTH,
                month = MONTH_WIDTH,
                year = YEAR_WIDTH,
            ),
        }
    }
}

// ============================================================================
// OWNED KEYS
// ============================================================================

/// The ordering key of a book, detached from its record.
///
/// Holds exactly the fields that participate in the book's ordering, so two
/// keys are equal precisely when the books they came from compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BookKey {
    Children { title: String, author: String },
    Fiction { author: String, title: String },
    Periodical { year: i32, month: u32, title: String },
}

impl fmt::Display for BookKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookKey::Children { title, author } | BookKey::Fiction { author, title } => {
                write!(f, "{title}, {author}")
            }
            BookKey::Periodical { year, month, title } => {
                write!(f, "{title} {month}/{year}")
            }
        }
    }
}

// ============================================================================
// FIELD PARSING
// ============================================================================

/// Comma-separated fields, trimmed, with a trailing empty field (from a
/// trailing comma) dropped.
fn split_fields(text: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = text.split(',').map(str::trim).collect();
    if fields.last() == Some(&"") {
        fields.pop();
    }
    fields
}

fn parse_year(token: &str) -> Result<i32> {
    let year: i32 = token
        .parse()
        .map_err(|_| LibraryError::parse(format!("`{token}` is not a valid year")))?;
    if year < 0 {
        return Err(LibraryError::parse(format!(
            "year {year} must not be negative"
        )));
    }
    Ok(year)
}

fn parse_month(token: &str) -> Result<u32> {
    let month: u32 = token
        .parse()
        .map_err(|_| LibraryError::parse(format!("`{token}` is not a valid month")))?;
    if !(1..=12).contains(&month) {
        return Err(LibraryError::parse(format!(
            "month {month} is outside 1-12"
        )));
    }
    Ok(month)
}

/// Split off the one-character format code that prefixes a query.
fn take_format(text: &str) -> Result<(Format, &str)> {
    let trimmed = text.trim_start();
    let (token, rest) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));
    let mut chars = token.chars();
    let code = chars
        .next()
        .ok_or_else(|| LibraryError::parse("missing format code"))?;
    if chars.next().is_some() {
        return Err(LibraryError::parse(format!(
            "`{token}` is not a format code"
        )));
    }
    let format = Format::from_code(code)
        .ok_or_else(|| LibraryError::parse(format!("`{code}` is not a recognized format")))?;
    Ok((format, rest))
}

/// `author, title` with an optional `year`; `require_year` distinguishes
/// records from queries (year is not part of the fiction/children's key).
fn parse_author_title_fields(
    fields: &str,
    require_year: bool,
) -> Result<(String, String, i32)> {
    let fields = split_fields(fields);
    let (author, title) = match fields.as_slice() {
        [author, title] if !require_year => (*author, *title),
        [author, title, year_token] => {
            let year = parse_year(year_token)?;
            return finish_author_title(author, title, year);
        }
        _ => {
            return Err(LibraryError::parse(
                "expected `author, title, year` fields",
            ))
        }
    };
    finish_author_title(author, title, 0)
}

fn finish_author_title(author: &str, title: &str, year: i32) -> Result<(String, String, i32)> {
    if author.is_empty() {
        return Err(LibraryError::parse("author field is empty"));
    }
    if title.is_empty() {
        return Err(LibraryError::parse("title field is empty"));
    }
    Ok((author.to_string(), title.to_string(), year))
}

/// `title, month year` for periodicals; every field is part of the key.
fn parse_periodical_fields(fields: &str) -> Result<(String, u32, i32)> {
    let fields = split_fields(fields);
    let [title, issue] = fields.as_slice() else {
        return Err(LibraryError::parse("expected `title, month year` fields"));
    };
    if title.is_empty() {
        return Err(LibraryError::parse("title field is empty"));
    }
    let mut tokens = issue.split_whitespace();
    let (Some(month_token), Some(year_token), None) =
        (tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(LibraryError::parse("expected `month year` after the title"));
    };
    Ok((
        title.to_string(),
        parse_month(month_token)?,
        parse_year(year_token)?,
    ))
}

impl Book {
    /// Parse fiction record fields: `author, title, year`.
    pub(crate) fn parse_fiction_record(fields: &str) -> Result<Book> {
        let (author, title, year) = parse_author_title_fields(fields, true)?;
        Ok(Book::fiction(author, title, year))
    }

    /// Parse children's record fields: `author, title, year`.
    pub(crate) fn parse_children_record(fields: &str) -> Result<Book> {
        let (author, title, year) = parse_author_title_fields(fields, true)?;
        Ok(Book::children(author, title, year))
    }

    /// Parse periodical record fields: `title, month year`.
    pub(crate) fn parse_periodical_record(fields: &str) -> Result<Book> {
        let (title, month, year) = parse_periodical_fields(fields)?;
        Ok(Book::periodical(title, month, year))
    }

    /// Parse a fiction query: format code, then `author, title` with the
    /// non-key year optional.
    pub(crate) fn parse_fiction_query(fields: &str) -> Result<Book> {
        let (format, rest) = take_format(fields)?;
        let (author, title, year) = parse_author_title_fields(rest, false)?;
        let mut book = Book::fiction(author, title, year);
        book.format = format;
        Ok(book)
    }

    /// Parse a children's query: format code, then `author, title` with the
    /// non-key year optional.
    pub(crate) fn parse_children_query(fields: &str) -> Result<Book> {
        let (format, rest) = take_format(fields)?;
        let (author, title, year) = parse_author_title_fields(rest, false)?;
        let mut book = Book::children(author, title, year);
        book.format = format;
        Ok(book)
    }

    /// Parse a periodical query: format code, then `title, month year`.
    pub(crate) fn parse_periodical_query(fields: &str) -> Result<Book> {
        let (format, rest) = take_format(fields)?;
        let (title, month, year) = parse_periodical_fields(rest)?;
        let mut book = Book::periodical(title, month, year);
        book.format = format;
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fiction_orders_by_author_then_title() {
        let a = Book::fiction("Austen Jane", "Emma", 1815);
        let b = Book::fiction("Austen Jane", "Persuasion", 1817);
        let c = Book::fiction("Borges Jorge", "Ficciones", 1944);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn children_orders_by_title_then_author() {
        let a = Book::children("Seuss Dr.", "Green Eggs and Ham", 1960);
        let b = Book::children("Sendak Maurice", "Where the Wild Things Are", 1963);
        assert!(a < b);
    }

    #[test]
    fn periodical_orders_by_year_month_title() {
        let a = Book::periodical("Harper's", 12, 2019);
        let b = Book::periodical("Atlantic", 1, 2020);
        let c = Book::periodical("Harper's", 1, 2020);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn categories_never_interleave() {
        let children = Book::children("Zz", "Zz", 2000);
        let fiction = Book::fiction("Aa", "Aa", 2000);
        let periodical = Book::periodical("Aa", 1, 1900);
        assert!(children < fiction);
        assert!(fiction < periodical);
    }

    #[test]
    fn fiction_equality_ignores_year_and_counts() {
        let mut a = Book::fiction("Clancy Tom", "The Hunt for Red October", 1984);
        let b = Book::fiction("Clancy Tom", "The Hunt for Red October", 0);
        assert!(a.check_out());
        assert_eq!(a, b);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn checkout_stops_at_zero_copies() {
        let mut book = Book::fiction("Austen Jane", "Emma", 1815);
        for _ in 0..DEFAULT_COPIES {
            assert!(book.check_out());
        }
        assert!(!book.check_out());
        assert_eq!(book.available(), 0);
    }

    #[test]
    fn checkin_stops_at_total_copies() {
        let mut book = Book::fiction("Austen Jane", "Emma", 1815);
        assert!(!book.check_in());
        assert!(book.check_out());
        assert!(book.check_in());
        assert_eq!(book.available(), DEFAULT_COPIES);
    }

    #[test]
    fn parses_record_fields() {
        let book = Book::parse_fiction_record(" Clancy Tom, The Hunt for Red October, 1984").unwrap();
        assert_eq!(book.author(), "Clancy Tom");
        assert_eq!(book.title(), "The Hunt for Red October");
        assert_eq!(book.year(), 1984);
        assert_eq!(book.available(), DEFAULT_COPIES);

        let issue = Book::parse_periodical_record(" National Geographic, 3 1988").unwrap();
        assert_eq!(issue.title(), "National Geographic");
        assert_eq!(issue.year(), 1988);
    }

    #[test]
    fn rejects_malformed_record_fields() {
        assert!(Book::parse_fiction_record("Clancy Tom, The Hunt for Red October").is_err());
        assert!(Book::parse_fiction_record(", Title, 1984").is_err());
        assert!(Book::parse_fiction_record("Author, Title, -3").is_err());
        assert!(Book::parse_periodical_record("Zine, 13 2001").is_err());
        assert!(Book::parse_periodical_record("Zine, March 2001").is_err());
    }

    #[test]
    fn query_year_is_optional_for_fiction() {
        let query = Book::parse_fiction_query("H Clancy Tom, The Hunt for Red October,").unwrap();
        let record = Book::parse_fiction_record("Clancy Tom, The Hunt for Red October, 1984").unwrap();
        assert_eq!(query, record);
    }

    #[test]
    fn query_requires_known_format() {
        assert!(Book::parse_fiction_query("X Clancy Tom, The Hunt for Red October,").is_err());
        assert!(Book::parse_fiction_query("Clancy Tom, The Hunt for Red October,").is_err());
    }

    #[test]
    fn display_row_truncates_to_column_width() {
        let long_title = "T".repeat(TITLE_WIDTH + 10);
        let book = Book::fiction("Author A", long_title, 2001);
        let row = book.to_string();
        assert!(row.contains(&"T".repeat(TITLE_WIDTH)));
        assert!(!row.contains(&"T".repeat(TITLE_WIDTH + 1)));
    }
}
