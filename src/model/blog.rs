//! Blog rows: users, categories, posts, comments

use serde::Serialize;

use super::RowId;

/// Equality predicate applied to the joined post listing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PostFilter {
    #[default]
    All,
    /// Match `categories.name`
    Category(String),
    /// Match `users.username`
    Author(String),
}

/// One row of Post ⋈ User ⋈ Category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostListing {
    pub id: RowId,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub author: String,
    pub category: String,
}

/// One row of Comment ⋈ User
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentListing {
    pub id: RowId,
    pub post_id: RowId,
    pub text: String,
    pub author: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlogStats {
    pub users: usize,
    pub categories: usize,
    pub posts: usize,
    pub comments: usize,
}
