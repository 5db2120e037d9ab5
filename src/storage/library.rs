//! Library repository: authors, genres, readers, books, book issues

use rusqlite::{OptionalExtension, params};

use super::connection::{Database, classify_write_error, count, row_exists};
use super::schema;
use crate::config::StoreConfig;
use crate::model::{
    AuthorBookCount, BookListing, LibraryStats, NewAuthor, NewBook, NewIssue, NewReader,
    OutstandingIssue, ReaderOnLoan, RowId,
};
use crate::{Error, Result};

/// Repository over the library database
#[derive(Debug, Clone)]
pub struct LibraryStore {
    db: Database,
}

impl LibraryStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            db: Database::new(config),
        }
    }

    /// Construct the store and ensure its schema exists
    pub fn open(config: StoreConfig) -> Result<Self> {
        let store = Self::new(config);
        store.initialize_schema()?;
        Ok(store)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn initialize_schema(&self) -> Result<()> {
        self.db.execute_schema(&schema::library_schema_statements())
    }

    // ========== Writers ==========

    pub fn add_author(&self, author: &NewAuthor) -> Result<RowId> {
        self.db.write("add_author", |tx| {
            tx.execute(
                "INSERT INTO authors (first_name, last_name, birth_year) VALUES (?1, ?2, ?3)",
                params![author.first_name, author.last_name, author.birth_year],
            )
            .map_err(|e| classify_write_error(e, "author"))?;
            Ok(tx.last_insert_rowid())
        })
    }

    pub fn add_genre(&self, name: &str) -> Result<RowId> {
        self.db.write("add_genre", |tx| {
            tx.execute("INSERT INTO genres (genre_name) VALUES (?1)", [name])
                .map_err(|e| classify_write_error(e, "genre"))?;
            Ok(tx.last_insert_rowid())
        })
    }

    pub fn add_reader(&self, reader: &NewReader) -> Result<RowId> {
        self.db.write("add_reader", |tx| {
            tx.execute(
                "INSERT INTO readers (first_name, last_name, email) VALUES (?1, ?2, ?3)",
                params![reader.first_name, reader.last_name, reader.email],
            )
            .map_err(|e| classify_write_error(e, "reader"))?;
            Ok(tx.last_insert_rowid())
        })
    }

    /// Add a book once its author and genre are known to exist
    pub fn add_book(&self, book: &NewBook) -> Result<RowId> {
        self.db.write("add_book", |tx| {
            if !row_exists(tx, "authors", "author_id", book.author_id)? {
                return Err(Error::not_found("author", book.author_id));
            }
            if !row_exists(tx, "genres", "genre_id", book.genre_id)? {
                return Err(Error::not_found("genre", book.genre_id));
            }

            tx.execute(
                r#"
                INSERT INTO books (title, author_id, genre_id, publication_year, isbn)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    book.title,
                    book.author_id,
                    book.genre_id,
                    book.publication_year,
                    book.isbn,
                ],
            )
            .map_err(|e| classify_write_error(e, "book"))?;
            Ok(tx.last_insert_rowid())
        })
    }

    /// Record a loan once the book and reader are known to exist
    pub fn issue_book(&self, issue: &NewIssue) -> Result<RowId> {
        self.db.write("issue_book", |tx| {
            if !row_exists(tx, "books", "book_id", issue.book_id)? {
                return Err(Error::not_found("book", issue.book_id));
            }
            if !row_exists(tx, "readers", "reader_id", issue.reader_id)? {
                return Err(Error::not_found("reader", issue.reader_id));
            }

            tx.execute(
                r#"
                INSERT INTO book_issues (book_id, reader_id, issue_date, return_date)
                VALUES (?1, ?2, COALESCE(?3, CURRENT_DATE), ?4)
                "#,
                params![issue.book_id, issue.reader_id, issue.issue_date, issue.return_date],
            )
            .map_err(|e| classify_write_error(e, "book issue"))?;
            Ok(tx.last_insert_rowid())
        })
    }

    // ========== Lookups ==========

    pub fn find_author_id(&self, first_name: &str, last_name: &str) -> Result<Option<RowId>> {
        self.db.read(|conn| {
            conn.query_row(
                r#"
                SELECT author_id FROM authors
                WHERE first_name = ?1 AND last_name = ?2
                ORDER BY author_id LIMIT 1
                "#,
                [first_name, last_name],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
        })
    }

    pub fn find_genre_id(&self, name: &str) -> Result<Option<RowId>> {
        self.db.read(|conn| {
            conn.query_row(
                "SELECT genre_id FROM genres WHERE genre_name = ?1",
                [name],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
        })
    }

    pub fn find_reader_id(&self, email: &str) -> Result<Option<RowId>> {
        self.db.read(|conn| {
            conn.query_row(
                "SELECT reader_id FROM readers WHERE email = ?1",
                [email],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
        })
    }

    pub fn find_book_id(&self, isbn: &str) -> Result<Option<RowId>> {
        self.db.read(|conn| {
            conn.query_row(
                "SELECT book_id FROM books WHERE isbn = ?1",
                [isbn],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
        })
    }

    // ========== Joined readers ==========

    /// Books with author and genre, by author last name then title
    pub fn list_books(&self, genre: Option<&str>) -> Result<Vec<BookListing>> {
        self.db.read(|conn| {
            let mut sql = String::from(
                r#"
                SELECT b.book_id, b.title, a.first_name || ' ' || a.last_name,
                       g.genre_name, b.publication_year, b.isbn
                FROM books b
                JOIN authors a ON b.author_id = a.author_id
                JOIN genres g ON b.genre_id = g.genre_id
                "#,
            );
            if genre.is_some() {
                sql.push_str(" WHERE g.genre_name = ?1");
            }
            sql.push_str(" ORDER BY a.last_name, b.title");

            let mut stmt = conn.prepare(&sql)?;
            let books = stmt
                .query_map(rusqlite::params_from_iter(genre), |row| {
                    Ok(BookListing {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        author: row.get(2)?,
                        genre: row.get(3)?,
                        publication_year: row.get(4)?,
                        isbn: row.get(5)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(books)
        })
    }

    /// Distinct readers holding at least one unreturned book, by last name
    pub fn readers_with_books(&self) -> Result<Vec<ReaderOnLoan>> {
        self.db.read(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT DISTINCT r.reader_id, r.first_name || ' ' || r.last_name, r.email, r.last_name
                FROM readers r
                JOIN book_issues bi ON r.reader_id = bi.reader_id
                WHERE bi.return_date IS NULL
                ORDER BY r.last_name, r.reader_id
                "#,
            )?;
            let readers = stmt
                .query_map([], |row| {
                    Ok(ReaderOnLoan {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        email: row.get(2)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(readers)
        })
    }

    /// Every author with their book count, most prolific first
    pub fn books_per_author(&self) -> Result<Vec<AuthorBookCount>> {
        self.db.read(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT a.first_name || ' ' || a.last_name, COUNT(b.book_id) AS book_count
                FROM authors a
                LEFT JOIN books b ON a.author_id = b.author_id
                GROUP BY a.author_id
                ORDER BY book_count DESC, a.last_name
                "#,
            )?;
            let counts = stmt
                .query_map([], |row| {
                    Ok(AuthorBookCount {
                        author: row.get(0)?,
                        books: row.get::<_, i64>(1)? as usize,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(counts)
        })
    }

    /// Unreturned loans with reader, book and author, by reader then issue date
    pub fn outstanding_issues(&self) -> Result<Vec<OutstandingIssue>> {
        self.db.read(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT bi.issue_id,
                       r.first_name || ' ' || r.last_name,
                       b.title,
                       a.first_name || ' ' || a.last_name,
                       bi.issue_date
                FROM book_issues bi
                JOIN readers r ON bi.reader_id = r.reader_id
                JOIN books b ON bi.book_id = b.book_id
                JOIN authors a ON b.author_id = a.author_id
                WHERE bi.return_date IS NULL
                ORDER BY r.last_name, bi.issue_date, bi.issue_id
                "#,
            )?;
            let issues = stmt
                .query_map([], |row| {
                    Ok(OutstandingIssue {
                        issue_id: row.get(0)?,
                        reader: row.get(1)?,
                        title: row.get(2)?,
                        author: row.get(3)?,
                        issue_date: row.get(4)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(issues)
        })
    }

    // ========== Aggregates ==========

    pub fn count_authors(&self) -> Result<usize> {
        self.db.read(|conn| count(conn, "SELECT COUNT(*) FROM authors"))
    }

    pub fn count_books(&self) -> Result<usize> {
        self.db.read(|conn| count(conn, "SELECT COUNT(*) FROM books"))
    }

    pub fn count_readers(&self) -> Result<usize> {
        self.db.read(|conn| count(conn, "SELECT COUNT(*) FROM readers"))
    }

    pub fn count_outstanding_issues(&self) -> Result<usize> {
        self.db
            .read(|conn| count(conn, "SELECT COUNT(*) FROM book_issues WHERE return_date IS NULL"))
    }

    pub fn stats(&self) -> Result<LibraryStats> {
        Ok(LibraryStats {
            authors: self.count_authors()?,
            books: self.count_books()?,
            readers: self.count_readers()?,
            outstanding_issues: self.count_outstanding_issues()?,
        })
    }
}
