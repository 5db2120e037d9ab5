//! Database schema definitions

// ========== Blog ==========

pub const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL UNIQUE
)
"#;

pub const CREATE_CATEGORIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
)
"#;

/// Posts go away with their author. A category with posts cannot be deleted.
pub const CREATE_POSTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS posts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    user_id INTEGER NOT NULL,
    category_id INTEGER NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
    FOREIGN KEY (category_id) REFERENCES categories(id)
)
"#;

pub const CREATE_COMMENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS comments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    text TEXT NOT NULL,
    post_id INTEGER NOT NULL,
    user_id INTEGER NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (post_id) REFERENCES posts(id) ON DELETE CASCADE,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
)
"#;

pub const CREATE_BLOG_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_posts_user ON posts(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_posts_category ON posts(category_id)",
    "CREATE INDEX IF NOT EXISTS idx_posts_created ON posts(created_at)",
    "CREATE INDEX IF NOT EXISTS idx_comments_post ON comments(post_id)",
];

// ========== Library ==========

pub const CREATE_AUTHORS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS authors (
    author_id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    birth_year INTEGER
)
"#;

pub const CREATE_GENRES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS genres (
    genre_id INTEGER PRIMARY KEY AUTOINCREMENT,
    genre_name TEXT NOT NULL UNIQUE
)
"#;

pub const CREATE_READERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS readers (
    reader_id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT UNIQUE,
    registration_date DATE NOT NULL DEFAULT CURRENT_DATE
)
"#;

pub const CREATE_BOOKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS books (
    book_id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    author_id INTEGER NOT NULL,
    genre_id INTEGER NOT NULL,
    publication_year INTEGER,
    isbn TEXT UNIQUE,
    FOREIGN KEY (author_id) REFERENCES authors(author_id) ON DELETE CASCADE,
    FOREIGN KEY (genre_id) REFERENCES genres(genre_id) ON DELETE CASCADE
)
"#;

/// A NULL `return_date` is an outstanding loan
pub const CREATE_BOOK_ISSUES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS book_issues (
    issue_id INTEGER PRIMARY KEY AUTOINCREMENT,
    book_id INTEGER NOT NULL,
    reader_id INTEGER NOT NULL,
    issue_date DATE NOT NULL DEFAULT CURRENT_DATE,
    return_date DATE,
    FOREIGN KEY (book_id) REFERENCES books(book_id) ON DELETE CASCADE,
    FOREIGN KEY (reader_id) REFERENCES readers(reader_id) ON DELETE CASCADE
)
"#;

pub const CREATE_LIBRARY_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_books_author ON books(author_id)",
    "CREATE INDEX IF NOT EXISTS idx_books_genre ON books(genre_id)",
    "CREATE INDEX IF NOT EXISTS idx_issues_reader ON book_issues(reader_id)",
    "CREATE INDEX IF NOT EXISTS idx_issues_open ON book_issues(return_date)",
];

/// All blog schema statements, parents before children
pub fn blog_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_USERS_TABLE,
        CREATE_CATEGORIES_TABLE,
        CREATE_POSTS_TABLE,
        CREATE_COMMENTS_TABLE,
    ];
    stmts.extend(CREATE_BLOG_INDEXES.iter().copied());
    stmts
}

/// All library schema statements, parents before children
pub fn library_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_AUTHORS_TABLE,
        CREATE_GENRES_TABLE,
        CREATE_READERS_TABLE,
        CREATE_BOOKS_TABLE,
        CREATE_BOOK_ISSUES_TABLE,
    ];
    stmts.extend(CREATE_LIBRARY_INDEXES.iter().copied());
    stmts
}
