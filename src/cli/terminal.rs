//! Colored terminal output for the `proofline` reports

use std::sync::LazyLock;

use owo_colors::{OwoColorize, colors::css};

static COLOR: LazyLock<bool> =
    LazyLock::new(|| supports_color::on(supports_color::Stream::Stdout).is_some());

/// The roles text plays in the reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    /// Every diagnostic was suppressed.
    Clean,
    /// A diagnostic that survived filtering.
    Finding,
    /// A diagnostic hidden by a directive.
    Suppressed,
    /// A directive that ingestion dropped.
    Dropped,
    /// Separators, placeholders and summaries.
    Muted,
}

fn paint(text: &str, style: Style, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match style {
        Style::Clean => text.fg::<css::Green>().to_string(),
        Style::Finding => text.fg::<css::IndianRed>().bold().to_string(),
        Style::Suppressed => text.dimmed().strikethrough().to_string(),
        Style::Dropped => text.fg::<css::Orange>().to_string(),
        Style::Muted => text.dimmed().to_string(),
    }
}

/// Styles report text, falling back to plain text when stdout has no color
/// support.
pub trait Colorize: AsRef<str> {
    fn clean(&self) -> String {
        paint(self.as_ref(), Style::Clean, *COLOR)
    }

    fn finding(&self) -> String {
        paint(self.as_ref(), Style::Finding, *COLOR)
    }

    fn suppressed(&self) -> String {
        paint(self.as_ref(), Style::Suppressed, *COLOR)
    }

    fn dropped(&self) -> String {
        paint(self.as_ref(), Style::Dropped, *COLOR)
    }

    fn muted(&self) -> String {
        paint(self.as_ref(), Style::Muted, *COLOR)
    }
}

impl<T: AsRef<str> + ?Sized> Colorize for T {}
