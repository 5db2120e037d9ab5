use crate::ui::Icons;
use crate::ui::theme::{Stream, Tone, paint};

pub fn header(icon: &str, text: &str) {
    println!();
    println!("{} {}", icon, paint(text, Tone::Heading, Stream::Stdout));
}

pub fn section(title: &str) {
    println!();
    println!("━ {} ━", paint(title, Tone::Heading, Stream::Stdout));
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, paint(label, Tone::Good, Stream::Stdout));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, paint(label, Tone::Bad, Stream::Stderr));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, paint(label, Tone::Caution, Stream::Stderr));
}

pub fn info(label: &str, value: &str) {
    println!(
        "{} {}: {}",
        paint(Icons::INFO, Tone::Label, Stream::Stdout),
        paint(label, Tone::Faint, Stream::Stdout),
        value
    );
}

pub fn empty(label: &str) {
    println!("{} {}", Icons::EMPTY, paint(label, Tone::Faint, Stream::Stdout));
}

/// Print a rendered table, or `empty_label` when there is nothing to show
pub fn table_or_empty(table: String, empty_label: &str) {
    if table.is_empty() {
        empty(empty_label);
    } else {
        println!("{}", table);
    }
}
