use super::{DemoReport, Sample, all_fresh};
use crate::model::{PostFilter, RowId};
use crate::storage::BlogStore;
use crate::ui::{self, Icons};

const SAMPLE_USERS: &[(&str, &str)] = &[
    ("ivan_writer", "ivan@mail.com"),
    ("maria_blogger", "maria@ya.ru"),
    ("alex_reader", "alex@example.org"),
];

const SAMPLE_CATEGORIES: &[&str] = &["Python", "Databases", "Web"];

/// (title, content, author index, category index)
const SAMPLE_POSTS: &[(&str, &str, usize, usize)] = &[
    (
        "My first Python post",
        "Today I learned the basics of Python: variables, loops and functions. Next up are modules and packages, then a small project to put it all together.",
        0,
        0,
    ),
    (
        "SQLite - a great database to start with",
        "SQLite is simple to use and needs no server...",
        1,
        1,
    ),
    (
        "Django vs Flask",
        "Comparing two popular frameworks...",
        0,
        2,
    ),
];

/// (text, post index, author index)
const SAMPLE_COMMENTS: &[(&str, usize, usize)] = &[
    ("Great introduction, thanks!", 0, 2),
    ("Which version of SQLite do you use?", 1, 0),
];

const NEW_POST: (&str, &str) = (
    "A new post about JOIN in SQL",
    "JOIN operations let you combine rows from several tables...",
);

pub fn run_blog_demo(store: &BlogStore) -> DemoReport {
    let mut report = DemoReport::default();

    ui::header(Icons::DATABASE, &format!("Blog database: {}", store.database().path().display()));
    if let Err(err) = store.initialize_schema() {
        report.failures += 1;
        ui::error(&format!("Could not create the blog schema: {err}"));
        return report;
    }
    ui::success("Schema ready");

    ui::section("Loading sample data");
    let (users, categories) = populate(store, &mut report);

    print_posts(store, &mut report, "All posts", &PostFilter::All);

    ui::section("Adding a new post");
    // Ids come from the inserts above, never from assumed numbering.
    match (users.first().copied().flatten(), categories.first().copied().flatten()) {
        (Some(user), Some(category)) => {
            let added = report.write(
                &format!("Post '{}'", NEW_POST.0),
                store.create_post(NEW_POST.0, NEW_POST.1, user.id, category.id),
            );
            if added.is_some() {
                print_posts(store, &mut report, "All posts", &PostFilter::All);
            }
        }
        _ => ui::warn("No author or category available, skipping the new post"),
    }

    print_posts(
        store,
        &mut report,
        "Posts in 'Python'",
        &PostFilter::Category("Python".to_string()),
    );

    ui::section("Statistics");
    match store.stats() {
        Ok(stats) => println!(
            "{}",
            ui::stats_table(&[
                ("Users", stats.users),
                ("Categories", stats.categories),
                ("Posts", stats.posts),
                ("Comments", stats.comments),
            ])
        ),
        Err(err) => {
            report.failures += 1;
            ui::error(&format!("Could not read statistics: {err}"));
        }
    }

    report
}

fn populate(
    store: &BlogStore,
    report: &mut DemoReport,
) -> (Vec<Option<Sample>>, Vec<Option<Sample>>) {
    let users: Vec<Option<Sample>> = SAMPLE_USERS
        .iter()
        .map(|(username, email)| {
            report.write_or_reuse(
                &format!("User '{username}'"),
                store.add_user(username, email),
                || store.find_user_id(username),
            )
        })
        .collect();

    let categories: Vec<Option<Sample>> = SAMPLE_CATEGORIES
        .iter()
        .map(|name| {
            report.write_or_reuse(
                &format!("Category '{name}'"),
                store.add_category(name),
                || store.find_category_id(name),
            )
        })
        .collect();

    let mut posts: Vec<Option<RowId>> = Vec::with_capacity(SAMPLE_POSTS.len());
    for (title, content, author, category) in SAMPLE_POSTS {
        // Sample posts only go in alongside freshly created parents, so a
        // rerun does not pile up copies.
        let post = match all_fresh([users[*author], categories[*category]]) {
            Some([user_id, category_id]) => report.write(
                &format!("Post '{title}'"),
                store.create_post(title, content, user_id, category_id),
            ),
            None => {
                ui::warn(&format!("Post '{title}' skipped, sample data already loaded"));
                None
            }
        };
        posts.push(post);
    }

    for (text, post, author) in SAMPLE_COMMENTS {
        match (posts[*post], users[*author]) {
            (Some(post_id), Some(user)) => {
                report.write("Comment", store.add_comment(text, post_id, user.id));
            }
            _ => ui::warn("Comment skipped, its post was not created in this run"),
        }
    }

    (users, categories)
}

fn print_posts(store: &BlogStore, report: &mut DemoReport, title: &str, filter: &PostFilter) {
    ui::section(title);
    let posts = report.read("Listing posts", store.list_posts(filter));
    ui::table_or_empty(ui::posts_table(&posts), "No posts yet");

    for post in &posts {
        let comments = report.read("Listing comments", store.comments_for_post(post.id));
        if !comments.is_empty() {
            println!("{} Comments on '{}':", Icons::MOD, post.title);
            println!("{}", ui::comments_table(&comments));
        }
    }
}
