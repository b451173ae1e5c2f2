//! Markdown ingestion.
//!
//! Reads a subset of markdown into a [`Document`] and collects the
//! suppression directives embedded in it:
//!
//! - ATX headings (`#` to `######`) open sections; deeper headings nest under
//!   the nearest shallower one. Text before the first heading forms a
//!   level-0 section without a header.
//! - Blank lines end paragraphs. Lines starting with `-`, `*`, `+` or `N.`
//!   and a space are list items; their indentation divided by two is the
//!   item level.
//! - Fenced code blocks (```` ``` ```` or `~~~`) are skipped, including any
//!   headings or markers inside them.
//! - A directive is an HTML comment on its own line, e.g.
//!   `<!-- @suppress spelling grammar -->`. It applies from the next line of
//!   text and is bounded by the next heading. Markers directly above a
//!   heading, possibly with blank lines in between, cover that heading's
//!   section instead.
//!
//! Malformed directives do not stop ingestion: they are dropped and reported
//! as [`IngestWarning`]s.

mod directives;
mod line;
mod sentences;
mod tree;

use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::domain::{
    directive::{DirectiveError, ParseRuleKindError, SuppressionDirective},
    document::{Document, StructureError},
    symbol::SymbolTable,
};
use directives::DirectiveCollector;
use line::{Classifier, Line};
use sentences::SentenceSplitter;
use tree::TreeBuilder;

/// The result of ingesting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingested {
    /// The block tree.
    pub document: Document,
    /// The directives found in the document, in the order they were
    /// completed.
    pub directives: Vec<SuppressionDirective>,
    /// Directives that were dropped.
    pub warnings: Vec<IngestWarning>,
}

/// A directive marker that could not be turned into a directive.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IngestWarning {
    /// The marker names no rule kind.
    #[error("line {line}: empty directive marker")]
    EmptyMarker {
        /// Line of the marker.
        line: usize,
    },

    /// The marker names a rule kind that does not exist.
    #[error("line {line}: {source}")]
    UnknownKind {
        /// Line of the marker.
        line: usize,
        /// The parse failure.
        source: ParseRuleKindError,
    },

    /// No text follows the marker.
    #[error("line {line}: directive is not followed by any text")]
    NoContent {
        /// Line of the marker.
        line: usize,
    },

    /// The directive could not be completed.
    ///
    /// Raised for rule kinds that require parameters when the marker gives
    /// none. `SUPPRESS` accepts an empty parameter list, so no marker of the
    /// current kinds produces it.
    #[error("line {line}: {source}")]
    InvalidDirective {
        /// Line of the marker.
        line: usize,
        /// The lifecycle failure.
        source: DirectiveError,
    },
}

impl IngestWarning {
    /// The line of the offending marker.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::EmptyMarker { line }
            | Self::NoContent { line }
            | Self::UnknownKind { line, .. }
            | Self::InvalidDirective { line, .. } => *line,
        }
    }
}

/// Errors that stop ingestion.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The source file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },

    /// The parsed document violates the structural invariants.
    #[error("malformed document: {0}")]
    Structure(#[from] StructureError),
}

/// Parses markdown `source`, splitting sentences with the terminal
/// punctuation of `symbols`.
///
/// # Errors
///
/// Returns [`IngestError::Structure`] if the resulting tree violates the
/// document invariants.
pub fn parse_str(source: &str, symbols: &SymbolTable) -> Result<Ingested, IngestError> {
    let mut tree = TreeBuilder::new(SentenceSplitter::new(symbols));
    let mut collector = DirectiveCollector::default();
    let mut classifier = Classifier::default();

    for (index, text) in source.lines().enumerate() {
        let number = NonZeroUsize::MIN.saturating_add(index);
        match classifier.classify(text) {
            Line::Blank | Line::Comment | Line::Code => tree.end_block(),
            Line::Heading { level, text } => {
                collector.heading(number);
                tree.heading(level, (number, text));
            }
            Line::ListItem { level, text } => {
                collector.content(number);
                tree.list_item(level, (number, text));
            }
            Line::Marker(marker) => {
                tree.end_block();
                collector.marker(number, marker);
            }
            Line::Text(text) => {
                collector.content(number);
                tree.text((number, text));
            }
        }
    }

    let document = tree.finish()?;
    let (directives, warnings) = collector.finish();

    tracing::debug!(
        sections = document.sections().count(),
        directives = directives.len(),
        warnings = warnings.len(),
        "ingested document"
    );

    Ok(Ingested {
        document,
        directives,
        warnings,
    })
}

/// Reads and parses the markdown file at `path`.
///
/// # Errors
///
/// Returns [`IngestError::Read`] if the file cannot be read, or
/// [`IngestError::Structure`] if the resulting tree is malformed.
pub fn read_path(path: &Path, symbols: &SymbolTable) -> Result<Ingested, IngestError> {
    let source = std::fs::read_to_string(path).map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&source, symbols)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::{
        Suppressor,
        domain::{diagnostic::Diagnostic, document::Section, symbol::Locale},
    };

    fn parse(source: &str) -> Ingested {
        parse_str(source, SymbolTable::instance(Locale::En)).unwrap()
    }

    const SAMPLE: &str = "\
Intro text.

# Guide
First paragraph. It has two sentences.

<!-- @suppress spelling -->
Second paragraph
wraps.

- item one
- item two

## Details
Detail text.
";

    #[test]
    fn builds_the_block_tree() {
        let ingested = parse(SAMPLE);
        let document = &ingested.document;

        let levels: Vec<_> = document.sections().map(Section::level).collect();
        assert_eq!(levels, vec![0, 1, 2]);

        let guide = &document.top_level_sections()[1];
        assert_eq!(guide.header_sentences()[0].content(), "Guide");
        assert_eq!(guide.paragraphs().len(), 2);
        assert_eq!(guide.paragraphs()[0].sentences().len(), 2);
        assert_eq!(
            guide.paragraphs()[1].sentences()[0].content(),
            "Second paragraph wraps."
        );
        assert_eq!(guide.list_blocks()[0].elements().len(), 2);
        assert_eq!(guide.subsections()[0].header_sentences()[0].line().get(), 13);
    }

    #[test]
    fn collects_bounded_directives() {
        let ingested = parse(SAMPLE);

        assert!(ingested.warnings.is_empty());
        assert_eq!(ingested.directives.len(), 1);
        let directive = &ingested.directives[0];
        assert_eq!(directive.anchor().get(), 7);
        assert_eq!(directive.upper_bound().map(NonZeroUsize::get), Some(13));
        assert_eq!(directive.parameters(), &["spelling"]);
    }

    #[test]
    fn ingested_directives_suppress_within_their_section() {
        let ingested = parse(SAMPLE);
        let suppressor = Suppressor::new(&ingested.document, &ingested.directives);

        // Same section, after the anchor.
        assert!(suppressor.is_suppressed(&Diagnostic::new("Spelling", 8, "x")));
        assert!(suppressor.is_suppressed(&Diagnostic::new("Spelling", 10, "x")));
        // Wrong validator.
        assert!(!suppressor.is_suppressed(&Diagnostic::new("Grammar", 8, "x")));
        // Before the anchor.
        assert!(!suppressor.is_suppressed(&Diagnostic::new("Spelling", 4, "x")));
        // Next section.
        assert!(!suppressor.is_suppressed(&Diagnostic::new("Spelling", 14, "x")));
    }

    #[test]
    fn directive_above_a_heading_covers_its_section() {
        let ingested = parse("<!-- @suppress -->\n# Title\nText.\n\n# Next\nMore.\n");

        let directive = &ingested.directives[0];
        assert_eq!(directive.anchor().get(), 2);
        assert_eq!(directive.upper_bound().map(NonZeroUsize::get), Some(5));

        let suppressor = Suppressor::new(&ingested.document, &ingested.directives);
        assert!(suppressor.is_suppressed(&Diagnostic::new("Style", 3, "x")));
        assert!(!suppressor.is_suppressed(&Diagnostic::new("Style", 6, "x")));
    }

    #[test]
    fn fenced_headings_do_not_split_the_section() {
        let ingested = parse(
            "# Setup\n<!-- @suppress spelling -->\ntext\n```sh\n# install deps\nnpm instal\n```\nThen restart the servr.\n",
        );

        let levels: Vec<_> = ingested.document.sections().map(Section::level).collect();
        assert_eq!(levels, vec![1]);
        assert_eq!(ingested.directives[0].anchor().get(), 3);
        assert!(ingested.directives[0].upper_bound().is_none());

        let suppressor = Suppressor::new(&ingested.document, &ingested.directives);
        assert!(suppressor.is_suppressed(&Diagnostic::new("Spelling", 8, "x")));
    }

    #[test]
    fn fenced_markers_are_not_directives() {
        let ingested = parse("# Usage\n```md\n<!-- @suppress spelling -->\n```\nText.\n");

        assert!(ingested.directives.is_empty());
        assert!(ingested.warnings.is_empty());
        let section = &ingested.document.top_level_sections()[0];
        assert_eq!(section.paragraphs().len(), 1);
    }

    #[test]
    fn stacked_markers_above_a_heading_cover_its_section() {
        let ingested = parse(
            "<!-- @suppress spelling -->\n<!-- @suppress grammar -->\n\n# Title\nText herre.\n",
        );

        assert!(ingested.warnings.is_empty());
        let suppressor = Suppressor::new(&ingested.document, &ingested.directives);
        assert!(suppressor.is_suppressed(&Diagnostic::new("Spelling", 5, "x")));
        assert!(suppressor.is_suppressed(&Diagnostic::new("Grammar", 5, "x")));
    }

    #[test]
    fn trailing_marker_is_reported() {
        let ingested = parse("# Title\nText.\n\n<!-- @suppress -->\n");

        assert!(ingested.directives.is_empty());
        assert_eq!(ingested.warnings, vec![IngestWarning::NoContent { line: 4 }]);
    }

    #[test]
    fn directive_marker_ends_a_paragraph() {
        let ingested = parse("# Title\nOne.\n<!-- @suppress -->\nTwo.\n");
        let section = &ingested.document.top_level_sections()[0];
        assert_eq!(section.paragraphs().len(), 2);
    }

    #[test]
    fn malformed_markers_are_reported_and_skipped() {
        let ingested =
            parse("# Title\n<!-- @ -->\n<!-- @mute spelling -->\n<!-- @suppress -->\nText.\n");

        assert_eq!(ingested.directives.len(), 1);
        let lines: Vec<_> = ingested.warnings.iter().map(IngestWarning::line).collect();
        assert_eq!(lines, vec![2, 3]);
        assert_eq!(
            ingested.warnings[1].to_string(),
            "line 3: unknown rule kind 'mute'"
        );
    }

    #[test]
    fn plain_comments_are_ignored() {
        let ingested = parse("# Title\n<!-- a note -->\nText.\n");
        assert!(ingested.directives.is_empty());
        assert!(ingested.warnings.is_empty());
    }

    #[test]
    fn japanese_sentences_split_at_full_width_marks() {
        let ingested = parse_str(
            "# 見出し\nこれは文です。これも文です。\n",
            SymbolTable::instance(Locale::Ja),
        )
        .unwrap();

        let section = &ingested.document.top_level_sections()[0];
        assert_eq!(section.paragraphs()[0].sentences().len(), 2);
    }

    #[test]
    fn read_path_parses_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let ingested = read_path(file.path(), SymbolTable::instance(Locale::En)).unwrap();
        assert_eq!(ingested, parse(SAMPLE));
    }

    #[test]
    fn read_path_reports_missing_files() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.md");

        let error = read_path(&missing, SymbolTable::instance(Locale::En)).unwrap_err();
        assert!(matches!(error, IngestError::Read { .. }));
    }
}
