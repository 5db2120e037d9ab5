//! Blog repository: users, categories, posts, comments

use rusqlite::{Connection, OptionalExtension, params};

use super::connection::{Database, classify_write_error, count, row_exists};
use super::schema;
use crate::config::StoreConfig;
use crate::model::{BlogStats, CommentListing, PostFilter, PostListing, RowId};
use crate::{Error, Result};

const POST_LISTING_SELECT: &str = r#"
    SELECT p.id, p.title, p.content, p.created_at, u.username, c.name
    FROM posts p
    JOIN users u ON p.user_id = u.id
    JOIN categories c ON p.category_id = c.id
"#;

/// Repository over the blog database
#[derive(Debug, Clone)]
pub struct BlogStore {
    db: Database,
}

impl BlogStore {
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

    /// Create any missing tables and indexes. Safe to call repeatedly.
    pub fn initialize_schema(&self) -> Result<()> {
        self.db.execute_schema(&schema::blog_schema_statements())
    }

    // ========== Writers ==========

    pub fn add_user(&self, username: &str, email: &str) -> Result<RowId> {
        self.db.write("add_user", |tx| {
            tx.execute(
                "INSERT INTO users (username, email) VALUES (?1, ?2)",
                params![username, email],
            )
            .map_err(|e| classify_write_error(e, "user"))?;
            Ok(tx.last_insert_rowid())
        })
    }

    pub fn add_category(&self, name: &str) -> Result<RowId> {
        self.db.write("add_category", |tx| {
            tx.execute("INSERT INTO categories (name) VALUES (?1)", [name])
                .map_err(|e| classify_write_error(e, "category"))?;
            Ok(tx.last_insert_rowid())
        })
    }

    /// Create a post once its author and category are known to exist
    pub fn create_post(
        &self,
        title: &str,
        content: &str,
        user_id: RowId,
        category_id: RowId,
    ) -> Result<RowId> {
        self.db.write("create_post", |tx| {
            if !row_exists(tx, "users", "id", user_id)? {
                return Err(Error::not_found("user", user_id));
            }
            if !row_exists(tx, "categories", "id", category_id)? {
                return Err(Error::not_found("category", category_id));
            }

            tx.execute(
                "INSERT INTO posts (title, content, user_id, category_id) VALUES (?1, ?2, ?3, ?4)",
                params![title, content, user_id, category_id],
            )
            .map_err(|e| classify_write_error(e, "post"))?;
            Ok(tx.last_insert_rowid())
        })
    }

    pub fn add_comment(&self, text: &str, post_id: RowId, user_id: RowId) -> Result<RowId> {
        self.db.write("add_comment", |tx| {
            if !row_exists(tx, "posts", "id", post_id)? {
                return Err(Error::not_found("post", post_id));
            }
            if !row_exists(tx, "users", "id", user_id)? {
                return Err(Error::not_found("user", user_id));
            }

            tx.execute(
                "INSERT INTO comments (text, post_id, user_id) VALUES (?1, ?2, ?3)",
                params![text, post_id, user_id],
            )
            .map_err(|e| classify_write_error(e, "comment"))?;
            Ok(tx.last_insert_rowid())
        })
    }

    // ========== Lookups ==========

    pub fn find_user_id(&self, username: &str) -> Result<Option<RowId>> {
        self.db.read(|conn| {
            conn.query_row(
                "SELECT id FROM users WHERE username = ?1",
                [username],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
        })
    }

    pub fn find_category_id(&self, name: &str) -> Result<Option<RowId>> {
        self.db.read(|conn| {
            conn.query_row(
                "SELECT id FROM categories WHERE name = ?1",
                [name],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
        })
    }

    // ========== Joined readers ==========

    /// Posts with author and category names, newest first
    pub fn list_posts(&self, filter: &PostFilter) -> Result<Vec<PostListing>> {
        self.db.read(|conn| {
            let order = "ORDER BY p.created_at DESC, p.id DESC";
            match filter {
                PostFilter::All => {
                    query_posts(conn, &format!("{POST_LISTING_SELECT} {order}"), &[])
                }
                PostFilter::Category(name) => query_posts(
                    conn,
                    &format!("{POST_LISTING_SELECT} WHERE c.name = ?1 {order}"),
                    &[name],
                ),
                PostFilter::Author(username) => query_posts(
                    conn,
                    &format!("{POST_LISTING_SELECT} WHERE u.username = ?1 {order}"),
                    &[username],
                ),
            }
        })
    }

    /// Comments on one post, oldest first
    pub fn comments_for_post(&self, post_id: RowId) -> Result<Vec<CommentListing>> {
        self.db.read(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT cm.id, cm.post_id, cm.text, u.username, cm.created_at
                FROM comments cm
                JOIN users u ON cm.user_id = u.id
                WHERE cm.post_id = ?1
                ORDER BY cm.created_at ASC, cm.id ASC
                "#,
            )?;

            let comments = stmt
                .query_map([post_id], |row| {
                    Ok(CommentListing {
                        id: row.get(0)?,
                        post_id: row.get(1)?,
                        text: row.get(2)?,
                        author: row.get(3)?,
                        created_at: row.get(4)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(comments)
        })
    }

    // ========== Aggregates ==========

    pub fn count_users(&self) -> Result<usize> {
        self.db.read(|conn| count(conn, "SELECT COUNT(*) FROM users"))
    }

    pub fn count_categories(&self) -> Result<usize> {
        self.db.read(|conn| count(conn, "SELECT COUNT(*) FROM categories"))
    }

    pub fn count_posts(&self) -> Result<usize> {
        self.db.read(|conn| count(conn, "SELECT COUNT(*) FROM posts"))
    }

    pub fn count_comments(&self) -> Result<usize> {
        self.db.read(|conn| count(conn, "SELECT COUNT(*) FROM comments"))
    }

    pub fn stats(&self) -> Result<BlogStats> {
        Ok(BlogStats {
            users: self.count_users()?,
            categories: self.count_categories()?,
            posts: self.count_posts()?,
            comments: self.count_comments()?,
        })
    }
}

fn query_posts(conn: &Connection, sql: &str, args: &[&String]) -> Result<Vec<PostListing>> {
    let mut stmt = conn.prepare(sql)?;
    let posts = stmt
        .query_map(rusqlite::params_from_iter(args), row_to_post)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(posts)
}

fn row_to_post(row: &rusqlite::Row) -> rusqlite::Result<PostListing> {
    Ok(PostListing {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        created_at: row.get(3)?,
        author: row.get(4)?,
        category: row.get(5)?,
    })
}
