use relstore::model::{NewAuthor, NewBook, NewIssue, NewReader, PostFilter};
use relstore::{BlogStore, Error, LibraryStore, StoreConfig};

fn blog() -> (tempfile::TempDir, BlogStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = BlogStore::open(StoreConfig::new(dir.path().join("blog.db"))).unwrap();
    (dir, store)
}

#[test]
fn test_python_category_scenario() {
    let (_dir, store) = blog();
    let user = store.add_user("ivan_writer", "ivan@mail.com").unwrap();
    let ids: Vec<i64> = ["Python", "Databases", "Web"]
        .iter()
        .map(|name| store.add_category(name).unwrap())
        .collect();
    store
        .create_post("My first Python post", "Today I learned...", user, ids[0])
        .unwrap();

    let rows = store.list_posts(&PostFilter::Category("Python".into())).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "My first Python post");
}

#[test]
fn test_many_users_then_repeat_each() {
    let (_dir, store) = blog();
    for i in 0..20 {
        let username = format!("user_{i}");
        let email = format!("user_{i}@example.org");
        assert!(store.add_user(&username, &email).unwrap() > 0);
        assert!(store.add_user(&username, &email).unwrap_err().is_duplicate());
    }
    assert_eq!(store.count_users().unwrap(), 20);
}

#[test]
fn test_posts_to_missing_parents_never_write() {
    let (_dir, store) = blog();
    let user = store.add_user("u", "u@example.org").unwrap();
    let category = store.add_category("c").unwrap();

    for bogus in [0, -1, user + 1, i64::MAX] {
        let err = store.create_post("t", "c", bogus, category).unwrap_err();
        assert!(err.is_not_found());
        let err = store.create_post("t", "c", user, bogus).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }
    assert_eq!(store.count_posts().unwrap(), 0);
}

#[test]
fn test_parent_check_holds_with_foreign_keys_off() {
    // The database itself accepts dangling references here.
    let dir = tempfile::tempdir().unwrap();
    let store = BlogStore::open(
        StoreConfig::new(dir.path().join("blog.db")).with_foreign_keys(false),
    )
    .unwrap();
    let category = store.add_category("c").unwrap();
    assert!(store.create_post("t", "c", 77, category).unwrap_err().is_not_found());
}

#[test]
fn test_returned_loan_excluded_open_loan_included() {
    let dir = tempfile::tempdir().unwrap();
    let store = LibraryStore::open(StoreConfig::new(dir.path().join("library.db"))).unwrap();

    let author = store.add_author(&NewAuthor::new("Alexander", "Pushkin", Some(1799))).unwrap();
    let genre = store.add_genre("Poem").unwrap();
    let reader = store.add_reader(&NewReader::new("Anna", "Kuznetsova", "anna@mail.ru")).unwrap();
    let book = store
        .add_book(&NewBook {
            title: "Eugene Onegin".into(),
            author_id: author,
            genre_id: genre,
            publication_year: Some(1833),
            isbn: "978-5-389-06228-9".into(),
        })
        .unwrap();

    store
        .issue_book(&NewIssue {
            book_id: book,
            reader_id: reader,
            issue_date: Some("2024-01-10".into()),
            return_date: Some("2024-01-25".into()),
        })
        .unwrap();
    assert!(store.outstanding_issues().unwrap().is_empty());
    assert!(store.readers_with_books().unwrap().is_empty());

    let open = store
        .issue_book(&NewIssue {
            book_id: book,
            reader_id: reader,
            issue_date: Some("2024-03-01".into()),
            return_date: None,
        })
        .unwrap();
    let outstanding = store.outstanding_issues().unwrap();
    assert_eq!(outstanding.len(), 1);
    assert_eq!(outstanding[0].issue_id, open);
}
