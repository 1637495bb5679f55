//! Error types for library operations.

use thiserror::Error;

/// Result type for library operations.
pub type Result<T> = std::result::Result<T, LibraryError>;

/// Errors that can occur while loading records or replaying commands.
///
/// None of these are fatal to a batch: callers report the diagnostic, skip
/// the offending line, and continue. Only a missing input file (surfacing as
/// `Io` before any processing) aborts the driver.
#[derive(Error, Debug)]
pub enum LibraryError {
    /// Malformed or unrecognized input line.
    #[error("parse error: {0}")]
    Parse(String),

    /// Insert of a record whose key is already stored.
    #[error("duplicate entry: {0}")]
    Duplicate(String),

    /// A command referenced a patron or book that is not in the store.
    #[error("not found: {0}")]
    NotFound(String),

    /// A checkout or return could not be honored by the copy counts.
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// Input file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl LibraryError {
    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a duplicate-entry error.
    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }

    /// Create a not-found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an unavailable error.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Check if this error is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Check if this error is a duplicate-entry error.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }

    /// Check if this error is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
