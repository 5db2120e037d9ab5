//! Row types returned by the repositories
//!
//! Entities are insert-only: writers take the fields below and hand back the
//! surrogate id assigned by SQLite. Listing types carry the joined columns.

pub mod blog;
pub mod library;

pub use blog::{BlogStats, CommentListing, PostFilter, PostListing};
pub use library::{
    AuthorBookCount, BookListing, LibraryStats, NewAuthor, NewBook, NewIssue, NewReader,
    OutstandingIssue, ReaderOnLoan,
};

/// Surrogate key assigned by the store
pub type RowId = i64;
