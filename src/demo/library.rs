use super::{DemoReport, Sample, all_fresh};
use crate::model::{NewAuthor, NewBook, NewIssue, NewReader};
use crate::storage::LibraryStore;
use crate::ui::{self, Icons};

const SAMPLE_AUTHORS: &[(&str, &str, i32)] = &[
    ("Leo", "Tolstoy", 1828),
    ("Fyodor", "Dostoevsky", 1821),
    ("Anton", "Chekhov", 1860),
    ("Alexander", "Pushkin", 1799),
];

const SAMPLE_GENRES: &[&str] = &["Novel", "Short Story", "Poem", "Drama"];

const SAMPLE_READERS: &[(&str, &str, &str)] = &[
    ("Ivan", "Ivanov", "ivanov@mail.ru"),
    ("Petr", "Petrov", "petrov@ya.ru"),
    ("Maria", "Sidorova", "sidorova@gmail.com"),
    ("Anna", "Kuznetsova", "kuznetsova@mail.ru"),
];

/// (title, author index, genre index, year, isbn)
const SAMPLE_BOOKS: &[(&str, usize, usize, i32, &str)] = &[
    ("War and Peace", 0, 0, 1869, "978-5-389-07464-0"),
    ("Anna Karenina", 0, 0, 1877, "978-5-389-05327-0"),
    ("Crime and Punishment", 1, 0, 1866, "978-5-389-06227-2"),
    ("The Brothers Karamazov", 1, 0, 1880, "978-5-389-07465-7"),
    ("The Cherry Orchard", 2, 3, 1904, "978-5-389-05328-7"),
    ("Eugene Onegin", 3, 2, 1833, "978-5-389-06228-9"),
];

/// (book index, reader index, issued, returned)
const SAMPLE_ISSUES: &[(usize, usize, &str, Option<&str>)] = &[
    (0, 0, "2024-01-15", None),
    (2, 1, "2024-01-20", Some("2024-02-10")),
    (4, 2, "2024-02-01", None),
    (1, 0, "2024-02-05", None),
    (5, 3, "2024-01-10", Some("2024-01-25")),
    (3, 1, "2024-02-15", None),
];

pub fn run_library_demo(store: &LibraryStore) -> DemoReport {
    let mut report = DemoReport::default();

    ui::header(Icons::BOOK, &format!("Library database: {}", store.database().path().display()));
    if let Err(err) = store.initialize_schema() {
        report.failures += 1;
        ui::error(&format!("Could not create the library schema: {err}"));
        return report;
    }
    ui::success("Schema ready");

    ui::section("Loading sample data");
    populate(store, &mut report);

    ui::section("Books with authors and genres");
    let books = report.read("Listing books", store.list_books(None));
    ui::table_or_empty(ui::books_table(&books), "No books yet");

    ui::section("Readers holding books");
    let readers = report.read("Listing readers", store.readers_with_books());
    ui::table_or_empty(ui::readers_table(&readers), "Every book is on the shelf");

    ui::section("Books per author");
    let counts = report.read("Counting books per author", store.books_per_author());
    ui::table_or_empty(ui::author_counts_table(&counts), "No authors yet");

    ui::section("Books on loan");
    let issues = report.read("Listing loans", store.outstanding_issues());
    ui::table_or_empty(ui::issues_table(&issues), "Every book is on the shelf");

    ui::section("Statistics");
    match store.stats() {
        Ok(stats) => println!(
            "{}",
            ui::stats_table(&[
                ("Authors", stats.authors),
                ("Books", stats.books),
                ("Readers", stats.readers),
                ("Books on loan", stats.outstanding_issues),
            ])
        ),
        Err(err) => {
            report.failures += 1;
            ui::error(&format!("Could not read statistics: {err}"));
        }
    }

    report
}

fn populate(store: &LibraryStore, report: &mut DemoReport) {
    // Authors carry no natural key, so look before inserting.
    let authors: Vec<Option<Sample>> = SAMPLE_AUTHORS
        .iter()
        .map(|(first, last, born)| match store.find_author_id(first, last) {
            Ok(Some(id)) => {
                ui::warn(&format!("Author '{first} {last}' already exists, reusing it"));
                Some(Sample { id, fresh: false })
            }
            Ok(None) => report
                .write(
                    &format!("Author '{first} {last}'"),
                    store.add_author(&NewAuthor::new(first, last, Some(*born))),
                )
                .map(|id| Sample { id, fresh: true }),
            Err(err) => {
                report.record_error(&err);
                ui::error(&format!("Author '{first} {last}': {err}"));
                None
            }
        })
        .collect();

    let genres: Vec<Option<Sample>> = SAMPLE_GENRES
        .iter()
        .map(|name| {
            report.write_or_reuse(
                &format!("Genre '{name}'"),
                store.add_genre(name),
                || store.find_genre_id(name),
            )
        })
        .collect();

    let readers: Vec<Option<Sample>> = SAMPLE_READERS
        .iter()
        .map(|(first, last, email)| {
            report.write_or_reuse(
                &format!("Reader '{first} {last}'"),
                store.add_reader(&NewReader::new(first, last, email)),
                || store.find_reader_id(email),
            )
        })
        .collect();

    let books: Vec<Option<Sample>> = SAMPLE_BOOKS
        .iter()
        .map(|(title, author, genre, year, isbn)| {
            let (Some(author), Some(genre)) = (authors[*author], genres[*genre]) else {
                ui::warn(&format!("Book '{title}' skipped, its author or genre is missing"));
                return None;
            };
            let book = NewBook {
                title: title.to_string(),
                author_id: author.id,
                genre_id: genre.id,
                publication_year: Some(*year),
                isbn: isbn.to_string(),
            };
            report.write_or_reuse(&format!("Book '{title}'"), store.add_book(&book), || {
                store.find_book_id(isbn)
            })
        })
        .collect();

    for (book, reader, issued, returned) in SAMPLE_ISSUES {
        // Loans are recorded only for books created in this run.
        let Some([book_id, reader_id]) = all_fresh([books[*book], readers[*reader]]) else {
            ui::warn("Loan skipped, sample data already loaded");
            continue;
        };
        let issue = NewIssue {
            book_id,
            reader_id,
            issue_date: Some(issued.to_string()),
            return_date: returned.map(str::to_string),
        };
        report.write("Loan", store.issue_book(&issue));
    }
}
