//! Tabular rendering of listings
//!
//! Long text is shortened here and only here; stored values are untouched.

use tabled::{Table, Tabled, settings::Style};

use crate::model::{
    AuthorBookCount, BookListing, CommentListing, OutstandingIssue, PostListing, ReaderOnLoan,
};

/// Longest post or comment body shown before it is cut
pub const DISPLAY_TEXT_LIMIT: usize = 100;

/// Cut `text` to `limit` characters and mark the cut with `...`
pub fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        render(&self.rows)
    }
}

pub fn stats_table(stats: &[(&str, usize)]) -> String {
    let mut builder = TableBuilder::new();
    for (label, value) in stats {
        builder.add_row(label, &value.to_string());
    }
    builder.build()
}

fn render<T: Tabled>(rows: &[T]) -> String {
    if rows.is_empty() {
        return String::new();
    }
    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct PostRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Date")]
    created_at: String,
    #[tabled(rename = "Content")]
    content: String,
}

pub fn posts_table(posts: &[PostListing]) -> String {
    let rows: Vec<PostRow> = posts
        .iter()
        .map(|p| PostRow {
            id: p.id,
            title: p.title.clone(),
            author: p.author.clone(),
            category: p.category.clone(),
            created_at: p.created_at.clone(),
            content: truncate(&p.content, DISPLAY_TEXT_LIMIT),
        })
        .collect();
    render(&rows)
}

#[derive(Tabled)]
struct CommentRow {
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Date")]
    created_at: String,
    #[tabled(rename = "Comment")]
    text: String,
}

pub fn comments_table(comments: &[CommentListing]) -> String {
    let rows: Vec<CommentRow> = comments
        .iter()
        .map(|c| CommentRow {
            author: c.author.clone(),
            created_at: c.created_at.clone(),
            text: truncate(&c.text, DISPLAY_TEXT_LIMIT),
        })
        .collect();
    render(&rows)
}

#[derive(Tabled)]
struct BookRow {
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Genre")]
    genre: String,
    #[tabled(rename = "Year")]
    year: String,
    #[tabled(rename = "ISBN")]
    isbn: String,
}

pub fn books_table(books: &[BookListing]) -> String {
    let rows: Vec<BookRow> = books
        .iter()
        .map(|b| BookRow {
            title: b.title.clone(),
            author: b.author.clone(),
            genre: b.genre.clone(),
            year: b.publication_year.map(|y| y.to_string()).unwrap_or_default(),
            isbn: b.isbn.clone().unwrap_or_default(),
        })
        .collect();
    render(&rows)
}

#[derive(Tabled)]
struct ReaderRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Reader")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
}

pub fn readers_table(readers: &[ReaderOnLoan]) -> String {
    let rows: Vec<ReaderRow> = readers
        .iter()
        .map(|r| ReaderRow {
            id: r.id,
            name: r.name.clone(),
            email: r.email.clone().unwrap_or_default(),
        })
        .collect();
    render(&rows)
}

#[derive(Tabled)]
struct AuthorCountRow {
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Books")]
    books: usize,
}

pub fn author_counts_table(counts: &[AuthorBookCount]) -> String {
    let rows: Vec<AuthorCountRow> = counts
        .iter()
        .map(|c| AuthorCountRow {
            author: c.author.clone(),
            books: c.books,
        })
        .collect();
    render(&rows)
}

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "Reader")]
    reader: String,
    #[tabled(rename = "Book")]
    title: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Issued")]
    issue_date: String,
}

pub fn issues_table(issues: &[OutstandingIssue]) -> String {
    let rows: Vec<IssueRow> = issues
        .iter()
        .map(|i| IssueRow {
            reader: i.reader.clone(),
            title: i.title.clone(),
            author: i.author.clone(),
            issue_date: i.issue_date.clone(),
        })
        .collect();
    render(&rows)
}
