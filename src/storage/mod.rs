//! Storage Layer - SQLite-backed repositories
//!
//! Blog database:
//! - users(username, email)
//! - categories(name)
//! - posts(title, content, user_id, category_id, created_at)
//! - comments(text, post_id, user_id, created_at)
//!
//! Library database:
//! - authors(first_name, last_name, birth_year)
//! - genres(genre_name)
//! - readers(first_name, last_name, email, registration_date)
//! - books(title, author_id, genre_id, publication_year, isbn)
//! - book_issues(book_id, reader_id, issue_date, return_date)

pub mod blog;
pub mod connection;
pub mod library;
pub mod schema;

pub use blog::BlogStore;
pub use connection::Database;
pub use library::LibraryStore;
