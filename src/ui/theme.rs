//! Terminal colors for status lines
//!
//! Whether to color is decided once per stream by `console`, which honors
//! `NO_COLOR`, `CLICOLOR_FORCE` and tty detection.

use owo_colors::Style;

/// The role a piece of text plays in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Heading,
    Good,
    Bad,
    Caution,
    Label,
    Faint,
}

impl Tone {
    pub fn style(self) -> Style {
        match self {
            Tone::Heading => Style::new().cyan().bold(),
            Tone::Good => Style::new().green().bold(),
            Tone::Bad => Style::new().red().bold(),
            Tone::Caution => Style::new().yellow().bold(),
            Tone::Label => Style::new().magenta(),
            Tone::Faint => Style::new().bright_black(),
        }
    }
}

/// Which stream the text is headed for
#[derive(Debug, Clone, Copy)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    fn colors_enabled(self) -> bool {
        match self {
            Stream::Stdout => console::colors_enabled(),
            Stream::Stderr => console::colors_enabled_stderr(),
        }
    }
}

/// Render `text` in `tone`, or leave it bare when `stream` takes no color
pub fn paint(text: &str, tone: Tone, stream: Stream) -> String {
    render(text, tone, stream.colors_enabled())
}

fn render(text: &str, tone: Tone, colored: bool) -> String {
    if colored {
        tone.style().style(text).to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_render_is_untouched() {
        assert_eq!(render("Books", Tone::Heading, false), "Books");
    }

    #[test]
    fn test_colored_render_wraps_text_in_escapes() {
        let out = render("failed", Tone::Bad, true);
        assert!(out.contains("failed"));
        assert!(out.starts_with('\u{1b}'));
        assert_ne!(out, "failed");
    }

    #[test]
    fn test_tones_are_distinct() {
        assert_ne!(
            render("x", Tone::Good, true),
            render("x", Tone::Caution, true)
        );
    }
}
