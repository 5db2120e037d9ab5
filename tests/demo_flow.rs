use relstore::demo::{DemoReport, run_blog_demo, run_library_demo};
use relstore::model::{BlogStats, LibraryStats, PostFilter};
use relstore::{BlogStore, LibraryStore, StoreConfig};
use tempfile::TempDir;

fn blog_store(dir: &TempDir) -> BlogStore {
    BlogStore::new(StoreConfig::new(dir.path().join("blog.db")))
}

fn library_store(dir: &TempDir) -> LibraryStore {
    LibraryStore::new(StoreConfig::new(dir.path().join("library.db")))
}

#[test]
fn test_blog_demo_fresh_database() {
    let dir = tempfile::tempdir().unwrap();
    let store = blog_store(&dir);

    let report = run_blog_demo(&store);
    assert_eq!(report.errors(), 0);
    // 3 users, 3 categories, 3 sample posts, 2 comments, 1 extra post
    assert_eq!(report.inserted, 12);

    assert_eq!(
        store.stats().unwrap(),
        BlogStats {
            users: 3,
            categories: 3,
            posts: 4,
            comments: 2
        }
    );

    let posts = store.list_posts(&PostFilter::All).unwrap();
    assert_eq!(posts[0].title, "A new post about JOIN in SQL");
    assert_eq!(posts[0].author, "ivan_writer");
    assert_eq!(posts[0].category, "Python");

    let python = store.list_posts(&PostFilter::Category("Python".into())).unwrap();
    assert_eq!(python.len(), 2);
}

#[test]
fn test_blog_demo_rerun_reports_duplicates_and_continues() {
    let dir = tempfile::tempdir().unwrap();
    let store = blog_store(&dir);
    run_blog_demo(&store);

    let report = run_blog_demo(&store);
    assert_eq!(
        report,
        DemoReport {
            inserted: 1,
            duplicates: 6,
            missing: 0,
            failures: 0
        }
    );
    assert_eq!(store.count_users().unwrap(), 3);
    assert_eq!(store.count_posts().unwrap(), 5);
    assert_eq!(store.count_comments().unwrap(), 2);
}

#[test]
fn test_library_demo_fresh_database() {
    let dir = tempfile::tempdir().unwrap();
    let store = library_store(&dir);

    let report = run_library_demo(&store);
    assert_eq!(report.errors(), 0);
    assert_eq!(report.inserted, 24);

    assert_eq!(
        store.stats().unwrap(),
        LibraryStats {
            authors: 4,
            books: 6,
            readers: 4,
            outstanding_issues: 4
        }
    );

    let readers: Vec<String> = store
        .readers_with_books()
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(readers, vec!["Ivan Ivanov", "Petr Petrov", "Maria Sidorova"]);

    let per_author = store.books_per_author().unwrap();
    assert_eq!(per_author.len(), 4);
    assert_eq!(per_author[0].books, 2);
    assert_eq!(per_author[3].books, 1);
}

#[test]
fn test_library_demo_rerun_keeps_counts() {
    let dir = tempfile::tempdir().unwrap();
    let store = library_store(&dir);
    run_library_demo(&store);

    let report = run_library_demo(&store);
    assert_eq!(report.inserted, 0);
    // genres, readers and books collide; authors are looked up first
    assert_eq!(report.duplicates, 14);
    assert_eq!(report.failures, 0);
    assert_eq!(store.count_authors().unwrap(), 4);
    assert_eq!(store.count_outstanding_issues().unwrap(), 4);
}

#[test]
fn test_demo_with_unwritable_path_does_not_panic() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the database file should be
    let path = dir.path().join("occupied");
    std::fs::create_dir(&path).unwrap();

    let report = run_blog_demo(&BlogStore::new(StoreConfig::new(&path)));
    assert_eq!(report.failures, 1);
    assert_eq!(report.inserted, 0);
}
