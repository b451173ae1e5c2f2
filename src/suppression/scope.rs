//! Precomputed line spans of a document's blocks.

use crate::domain::document::{Document, LineSpan, ListElement, Paragraph, Section};

/// The block spans of one section.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SectionScope {
    /// Header, each paragraph and each list element, in that order.
    blocks: Vec<LineSpan>,
    /// The union of all of the section's own sentences.
    whole: Option<LineSpan>,
}

impl SectionScope {
    fn new(section: &Section) -> Self {
        let blocks = LineSpan::of(section.header_sentences())
            .into_iter()
            .chain(
                section
                    .paragraphs()
                    .iter()
                    .filter_map(|paragraph| LineSpan::of(Paragraph::sentences(paragraph))),
            )
            .chain(
                section
                    .list_elements()
                    .filter_map(|element| LineSpan::of(ListElement::sentences(element))),
            )
            .collect();

        Self {
            blocks,
            whole: section.span(),
        }
    }

    /// Spans in matching order: the individual blocks, then the whole section.
    fn spans(&self) -> impl Iterator<Item = &LineSpan> {
        self.blocks.iter().chain(&self.whole)
    }
}

/// The line spans of every block of a [`Document`], computed once.
///
/// Every section (nested ones included) contributes the span of its header,
/// of each paragraph, of each list element, and of all of its own sentences
/// together. Empty groups contribute nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeIndex {
    sections: Vec<SectionScope>,
}

impl ScopeIndex {
    /// Computes the spans of `document`.
    #[must_use]
    pub fn new(document: &Document) -> Self {
        Self {
            sections: document.sections().map(SectionScope::new).collect(),
        }
    }

    /// Whether `anchor` and `line` lie within the same span, with `anchor`
    /// not after `line`.
    ///
    /// The whole-section span contains every block span of its section, so a
    /// line anywhere in a section shares scope with an anchor anywhere earlier
    /// in that same section.
    #[must_use]
    pub fn shares_scope(&self, anchor: usize, line: usize) -> bool {
        if anchor > line {
            return false;
        }
        self.sections
            .iter()
            .flat_map(SectionScope::spans)
            .any(|span| span.contains(anchor) && span.contains(line))
    }

    /// Number of sections indexed.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }
}
