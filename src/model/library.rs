//! Library rows: authors, genres, readers, books, book issues

use serde::Serialize;

use super::RowId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
    pub birth_year: Option<i32>,
}

impl NewAuthor {
    pub fn new(first_name: &str, last_name: &str, birth_year: Option<i32>) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            birth_year,
        }
    }
}

/// Reader registration; `registration_date` defaults to the current date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReader {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl NewReader {
    pub fn new(first_name: &str, last_name: &str, email: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author_id: RowId,
    pub genre_id: RowId,
    pub publication_year: Option<i32>,
    pub isbn: String,
}

/// A loan of one book to one reader.
///
/// `issue_date` falls back to the current date when `None`. A `None`
/// `return_date` marks the loan as outstanding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    pub book_id: RowId,
    pub reader_id: RowId,
    pub issue_date: Option<String>,
    pub return_date: Option<String>,
}

/// One row of Book ⋈ Author ⋈ Genre
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookListing {
    pub id: RowId,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub publication_year: Option<i32>,
    pub isbn: Option<String>,
}

/// A reader holding at least one unreturned book
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReaderOnLoan {
    pub id: RowId,
    pub name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorBookCount {
    pub author: String,
    pub books: usize,
}

/// One row of BookIssue ⋈ Reader ⋈ Book ⋈ Author with `return_date IS NULL`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutstandingIssue {
    pub issue_id: RowId,
    pub reader: String,
    pub title: String,
    pub author: String,
    pub issue_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LibraryStats {
    pub authors: usize,
    pub books: usize,
    pub readers: usize,
    pub outstanding_issues: usize,
}
