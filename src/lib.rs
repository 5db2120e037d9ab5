//! # Relstore - Relational Store Access Layer
//!
//! Small repositories over local single-file SQLite databases.
//!
//! Relstore provides:
//! - A blog schema (users, categories, posts, comments)
//! - A library schema (authors, genres, readers, books, book issues)
//! - Per-call connections with one transaction per write
//! - Joined listings and aggregate counts
//! - A fixed demonstration flow for each schema

pub mod config;
pub mod model;
pub mod storage;
pub mod ui;
pub mod demo;

// Re-exports for convenient access
pub use config::{RelstoreConfig, StoreConfig};
pub use storage::{BlogStore, LibraryStore};

/// Result type alias for Relstore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Relstore operations
///
/// Writers surface the three recoverable outcomes of a store call as
/// `NotFound`, `Duplicate` and `Storage`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("{entity} already exists: {detail}")]
    Duplicate { entity: &'static str, detail: String },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Error::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// True for a missing parent row
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// True for a UNIQUE or PRIMARY KEY violation
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Error::Duplicate { .. })
    }
}
