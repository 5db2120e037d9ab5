//! Relstore CLI - blog and library demonstrations over SQLite

use clap::{Parser, Subcommand, ValueEnum};
use relstore::config::{self, RelstoreConfig, StoreConfig};
use relstore::demo::{self, DemoReport};
use relstore::model::PostFilter;
use relstore::ui::{self, Icons};
use relstore::{BlogStore, LibraryStore};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "relstore")]
#[command(version)]
#[command(about = "SQLite-backed blog and library repositories")]
#[command(long_about = r#"
Relstore keeps two small relational schemas in local SQLite files:
  • blog: users, categories, posts, comments
  • library: authors, genres, readers, books, loans

Example usage:
  relstore blog --reset
  relstore library --database data/library.db
  relstore posts --category Python
  relstore books --on-loan --format json
  relstore stats library
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the blog demonstration
    Blog {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Delete the database file first
        #[arg(long)]
        reset: bool,
    },

    /// Run the library demonstration
    Library {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Delete the database file first
        #[arg(long)]
        reset: bool,
    },

    /// List blog posts with their authors and categories
    Posts {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Only posts in this category
        #[arg(long, conflicts_with = "author")]
        category: Option<String>,

        /// Only posts by this username
        #[arg(long)]
        author: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// List library books, or the books currently on loan
    Books {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Only books in this genre
        #[arg(long, conflicts_with = "on_loan")]
        genre: Option<String>,

        /// Show unreturned loans instead
        #[arg(long)]
        on_loan: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Show row counts for one schema
    Stats {
        schema: Schema,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum Schema {
    Blog,
    Library,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays parseable for --format json.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let (settings, config_error) = config::load_config_or_default(Some(&config_path));
    tracing::debug!(config = %config_path.display(), ?settings, "configuration loaded");

    // The demos report a broken config and carry on with defaults; every other
    // command refuses to run against settings the user did not ask for.
    if let Some(err) = config_error {
        match cli.command {
            Commands::Blog { .. } | Commands::Library { .. } => {
                ui::error(&format!("{err}; using default settings"));
            }
            Commands::Init { .. } => {}
            _ => return Err(err.into()),
        }
    }

    match cli.command {
        Commands::Blog { database, reset } => {
            let store_config = resolve(&settings.blog, database);
            if reset {
                remove_database(&store_config.database);
            }
            let report = demo::run_blog_demo(&BlogStore::new(store_config));
            print_report(&report);
        }

        Commands::Library { database, reset } => {
            let store_config = resolve(&settings.library, database);
            if reset {
                remove_database(&store_config.database);
            }
            let report = demo::run_library_demo(&LibraryStore::new(store_config));
            print_report(&report);
        }

        Commands::Posts { database, category, author, format } => {
            let store = BlogStore::open(resolve(&settings.blog, database))?;
            let filter = match (category, author) {
                (Some(category), _) => PostFilter::Category(category),
                (None, Some(author)) => PostFilter::Author(author),
                (None, None) => PostFilter::All,
            };
            let posts = store.list_posts(&filter)?;

            if format == Format::Json {
                println!("{}", serde_json::to_string_pretty(&posts)?);
            } else {
                ui::table_or_empty(ui::posts_table(&posts), "No posts found.");
            }
        }

        Commands::Books { database, genre, on_loan, format } => {
            let store = LibraryStore::open(resolve(&settings.library, database))?;

            if on_loan {
                let issues = store.outstanding_issues()?;
                if format == Format::Json {
                    println!("{}", serde_json::to_string_pretty(&issues)?);
                } else {
                    ui::table_or_empty(ui::issues_table(&issues), "No books on loan.");
                }
            } else {
                let books = store.list_books(genre.as_deref())?;
                if format == Format::Json {
                    println!("{}", serde_json::to_string_pretty(&books)?);
                } else {
                    ui::table_or_empty(ui::books_table(&books), "No books found.");
                }
            }
        }

        Commands::Stats { schema, database, format } => match schema {
            Schema::Blog => {
                let store_config = resolve(&settings.blog, database);
                let path = store_config.database.clone();
                let stats = BlogStore::open(store_config)?.stats()?;
                if format == Format::Json {
                    println!("{}", serde_json::to_string_pretty(&stats)?);
                } else {
                    println!("{} Blog statistics ({})", Icons::STATS, path.display());
                    println!(
                        "{}",
                        ui::stats_table(&[
                            ("Users", stats.users),
                            ("Categories", stats.categories),
                            ("Posts", stats.posts),
                            ("Comments", stats.comments),
                        ])
                    );
                }
            }
            Schema::Library => {
                let store_config = resolve(&settings.library, database);
                let path = store_config.database.clone();
                let stats = LibraryStore::open(store_config)?.stats()?;
                if format == Format::Json {
                    println!("{}", serde_json::to_string_pretty(&stats)?);
                } else {
                    println!("{} Library statistics ({})", Icons::STATS, path.display());
                    println!(
                        "{}",
                        ui::stats_table(&[
                            ("Authors", stats.authors),
                            ("Books", stats.books),
                            ("Readers", stats.readers),
                            ("Books on loan", stats.outstanding_issues),
                        ])
                    );
                }
            }
        },

        Commands::Init { force } => {
            config::write_config(&config_path, &RelstoreConfig::default(), force)?;
            ui::success(&format!("Wrote {}", config_path.display()));
        }
    }

    Ok(())
}

/// `--database` wins over the config file
fn resolve(configured: &StoreConfig, database: Option<PathBuf>) -> StoreConfig {
    match database {
        Some(path) => StoreConfig {
            database: path,
            ..configured.clone()
        },
        None => configured.clone(),
    }
}

fn remove_database(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => ui::info("Removed", &path.display().to_string()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => ui::error(&format!("Could not remove {}: {}", path.display(), e)),
    }
}

fn print_report(report: &DemoReport) {
    println!();
    if report.errors() == 0 {
        ui::success(&format!("Done: {} rows written", report.inserted));
    } else {
        ui::warn(&format!(
            "Done: {} rows written, {} duplicates, {} missing references, {} failures",
            report.inserted, report.duplicates, report.missing, report.failures
        ));
    }
}
