pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{empty, error, header, info, section, success, table_or_empty, warn};
pub use table::{
    author_counts_table, books_table, comments_table, issues_table, posts_table, readers_table,
    stats_table, truncate, TableBuilder, DISPLAY_TEXT_LIMIT,
};
pub use theme::{Stream, Tone, paint};
