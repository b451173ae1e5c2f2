use std::sync::LazyLock;

use regex::Regex;

static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {0,3}(#{1,6})(?:[ \t]+(.*?))?[ \t]*$").expect("heading pattern is valid")
});

static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([ \t]*)(?:[-*+]|\d+[.)])[ \t]+(.*)$").expect("list item pattern is valid")
});

static COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*<!--(.*?)-->[ \t]*$").expect("comment pattern is valid")
});

static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {0,3}(`{3,}|~{3,})(.*)$").expect("fence pattern is valid")
});

/// The role of a single source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Line<'a> {
    Blank,
    Heading { level: usize, text: &'a str },
    ListItem { level: usize, text: &'a str },
    /// An HTML comment starting with `@`. Holds the text after the `@`.
    Marker(&'a str),
    /// Any other HTML comment on its own line.
    Comment,
    /// A code fence or a line inside a fenced code block.
    Code,
    Text(&'a str),
}

impl<'a> Line<'a> {
    fn classify(line: &'a str) -> Self {
        if line.trim().is_empty() {
            return Self::Blank;
        }

        if let Some(captures) = COMMENT.captures(line) {
            let body = captures.get(1).map_or("", |m| m.as_str()).trim();
            return body
                .strip_prefix('@')
                .map_or(Self::Comment, |marker| Self::Marker(marker.trim()));
        }

        if let Some(captures) = HEADING.captures(line) {
            let level = captures.get(1).map_or(0, |m| m.len());
            let text = captures
                .get(2)
                .map_or("", |m| m.as_str())
                .trim_end_matches('#')
                .trim_end();
            return Self::Heading { level, text };
        }

        if let Some(captures) = LIST_ITEM.captures(line) {
            let indent = captures.get(1).map_or("", |m| m.as_str());
            let text = captures.get(2).map_or("", |m| m.as_str()).trim();
            return Self::ListItem {
                level: indent_width(indent) / 2,
                text,
            };
        }

        Self::Text(line.trim())
    }
}

/// The opening run of a fenced code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fence {
    marker: char,
    len: usize,
}

impl Fence {
    /// Splits a fence line into its run and info string.
    fn parse(line: &str) -> Option<(&str, &str)> {
        let captures = FENCE.captures(line)?;
        let run = captures.get(1)?.as_str();
        let info = captures.get(2).map_or("", |m| m.as_str());
        Some((run, info))
    }

    /// A backtick fence cannot carry backticks in its info string.
    fn open(run: &str, info: &str) -> Option<Self> {
        let marker = run.chars().next()?;
        if marker == '`' && info.contains('`') {
            return None;
        }
        Some(Self {
            marker,
            len: run.chars().count(),
        })
    }

    fn is_closed_by(self, run: &str, info: &str) -> bool {
        run.starts_with(self.marker) && run.chars().count() >= self.len && info.trim().is_empty()
    }
}

/// Classifies the lines of a document in order.
///
/// Everything between an opening code fence and its closing fence is
/// [`Line::Code`], so headings and markers shown as examples stay inert.
#[derive(Debug, Default)]
pub(super) struct Classifier {
    fence: Option<Fence>,
}

impl Classifier {
    pub(super) fn classify<'a>(&mut self, line: &'a str) -> Line<'a> {
        let fence_line = Fence::parse(line);

        if let Some(open) = self.fence {
            if fence_line.is_some_and(|(run, info)| open.is_closed_by(run, info)) {
                self.fence = None;
            }
            return Line::Code;
        }

        if let Some(fence) = fence_line.and_then(|(run, info)| Fence::open(run, info)) {
            self.fence = Some(fence);
            return Line::Code;
        }

        Line::classify(line)
    }
}

fn indent_width(indent: &str) -> usize {
    indent
        .chars()
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}
