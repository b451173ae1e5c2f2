//! The document block tree.
//!
//! A [`Document`] owns a tree of [`Section`]s. Each section owns its header
//! sentences, its [`Paragraph`]s, its [`ListBlock`]s and its sub-sections.
//! The tree is assembled through [`DocumentBuilder`] and [`SectionBuilder`]
//! and is read-only once built.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A span of text together with the 1-based source line it starts on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    content: String,
    line: NonZeroUsize,
}

impl Sentence {
    /// Creates a sentence starting on the given line.
    #[must_use]
    pub fn new(content: impl Into<String>, line: NonZeroUsize) -> Self {
        Self {
            content: content.into(),
            line,
        }
    }

    /// The text of the sentence.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The 1-based source line of the sentence.
    #[must_use]
    pub const fn line(&self) -> NonZeroUsize {
        self.line
    }
}

/// An inclusive range of source lines `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    start: usize,
    end: usize,
}

impl LineSpan {
    /// Computes the span covered by a group of sentences.
    ///
    /// Returns `None` for an empty group, which covers no line at all.
    pub fn of<'a>(sentences: impl IntoIterator<Item = &'a Sentence>) -> Option<Self> {
        sentences.into_iter().fold(None, |span, sentence| {
            let line = sentence.line().get();
            Some(match span {
                None => Self {
                    start: line,
                    end: line,
                },
                Some(Self { start, end }) => Self {
                    start: start.min(line),
                    end: end.max(line),
                },
            })
        })
    }

    /// First line of the span.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Last line of the span (inclusive).
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Whether `line` lies within the span.
    #[must_use]
    pub const fn contains(&self, line: usize) -> bool {
        self.start <= line && line <= self.end
    }
}

/// An ordered run of sentences.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Paragraph {
    sentences: Vec<Sentence>,
}

impl Paragraph {
    /// Creates a paragraph from its sentences, in document order.
    #[must_use]
    pub const fn new(sentences: Vec<Sentence>) -> Self {
        Self { sentences }
    }

    /// The sentences of the paragraph.
    #[must_use]
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }
}

/// A single item of a [`ListBlock`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListElement {
    level: usize,
    sentences: Vec<Sentence>,
}

impl ListElement {
    /// Creates a list element at the given nesting level (0 is outermost).
    #[must_use]
    pub const fn new(level: usize, sentences: Vec<Sentence>) -> Self {
        Self { level, sentences }
    }

    /// Nesting level of the element.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// The sentences of the element.
    #[must_use]
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }
}

/// A contiguous list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListBlock {
    elements: Vec<ListElement>,
}

impl ListBlock {
    /// Creates a list block from its elements, in document order.
    #[must_use]
    pub const fn new(elements: Vec<ListElement>) -> Self {
        Self { elements }
    }

    /// The elements of the list.
    #[must_use]
    pub fn elements(&self) -> &[ListElement] {
        &self.elements
    }
}

/// A section of a document.
///
/// Owns its header, paragraphs, list blocks and nested sections. The
/// sentences of the nested sections are not part of this section's own
/// content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    level: usize,
    header: Vec<Sentence>,
    paragraphs: Vec<Paragraph>,
    list_blocks: Vec<ListBlock>,
    subsections: Vec<Section>,
}

impl Section {
    /// Starts building a section at the given heading level.
    ///
    /// Level 0 is reserved for content that precedes the first heading.
    #[must_use]
    pub const fn builder(level: usize) -> SectionBuilder {
        SectionBuilder {
            section: Self {
                level,
                header: Vec::new(),
                paragraphs: Vec::new(),
                list_blocks: Vec::new(),
                subsections: Vec::new(),
            },
        }
    }

    /// Heading level of the section.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// The sentences of the section header.
    #[must_use]
    pub fn header_sentences(&self) -> &[Sentence] {
        &self.header
    }

    /// The paragraphs of the section, in order.
    #[must_use]
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// The list blocks of the section, in order.
    #[must_use]
    pub fn list_blocks(&self) -> &[ListBlock] {
        &self.list_blocks
    }

    /// The sections nested directly under this one.
    #[must_use]
    pub fn subsections(&self) -> &[Self] {
        &self.subsections
    }

    /// Iterates the section's list elements across all of its list blocks.
    pub fn list_elements(&self) -> impl Iterator<Item = &ListElement> {
        self.list_blocks.iter().flat_map(ListBlock::elements)
    }

    /// Iterates every sentence the section owns directly: header first, then
    /// paragraphs, then list elements.
    pub fn sentences(&self) -> impl Iterator<Item = &Sentence> {
        self.header
            .iter()
            .chain(self.paragraphs.iter().flat_map(Paragraph::sentences))
            .chain(self.list_elements().flat_map(ListElement::sentences))
    }

    /// The line span of the section's own content.
    #[must_use]
    pub fn span(&self) -> Option<LineSpan> {
        LineSpan::of(self.sentences())
    }

    fn blocks(&self) -> impl Iterator<Item = &[Sentence]> {
        std::iter::once(self.header.as_slice())
            .chain(self.paragraphs.iter().map(Paragraph::sentences))
            .chain(self.list_elements().map(ListElement::sentences))
    }
}

/// Incrementally assembles a [`Section`].
#[derive(Debug, Clone)]
pub struct SectionBuilder {
    section: Section,
}

impl SectionBuilder {
    /// Sets the header sentences.
    pub fn set_header(&mut self, header: Vec<Sentence>) {
        self.section.header = header;
    }

    /// Appends a paragraph.
    pub fn push_paragraph(&mut self, paragraph: Paragraph) {
        self.section.paragraphs.push(paragraph);
    }

    /// Appends a list block.
    pub fn push_list_block(&mut self, list_block: ListBlock) {
        self.section.list_blocks.push(list_block);
    }

    /// Appends a nested section.
    pub fn push_subsection(&mut self, section: Section) {
        self.section.subsections.push(section);
    }

    /// Sets the header sentences.
    #[must_use]
    pub fn with_header(mut self, header: Vec<Sentence>) -> Self {
        self.set_header(header);
        self
    }

    /// Appends a paragraph.
    #[must_use]
    pub fn with_paragraph(mut self, paragraph: Paragraph) -> Self {
        self.push_paragraph(paragraph);
        self
    }

    /// Appends a list block.
    #[must_use]
    pub fn with_list_block(mut self, list_block: ListBlock) -> Self {
        self.push_list_block(list_block);
        self
    }

    /// Appends a nested section.
    #[must_use]
    pub fn with_subsection(mut self, section: Section) -> Self {
        self.push_subsection(section);
        self
    }

    /// Heading level of the section under construction.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.section.level
    }

    /// Finishes the section.
    #[must_use]
    pub fn build(self) -> Section {
        self.section
    }
}

/// Errors raised when a document violates the structural invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StructureError {
    /// A sentence appears on an earlier line than its predecessor in the same
    /// block.
    #[error("sentence on line {line} follows a sentence on line {previous} in the same block")]
    LineOrder {
        /// Line of the preceding sentence.
        previous: usize,
        /// Line of the out-of-order sentence.
        line: usize,
    },

    /// A section's content overlaps the content of the section before it.
    #[error("section starting on line {start} overlaps the previous section ending on line {previous_end}")]
    Overlap {
        /// Last line of the preceding section.
        previous_end: usize,
        /// First line of the overlapping section.
        start: usize,
    },
}

/// A parsed document: the root of the block tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    sections: Vec<Section>,
}

impl Document {
    /// Starts building a document.
    #[must_use]
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::default()
    }

    /// The top-level sections, in order.
    #[must_use]
    pub fn top_level_sections(&self) -> &[Section] {
        &self.sections
    }

    /// Iterates every section of the document in pre-order.
    #[must_use]
    pub fn sections(&self) -> Sections<'_> {
        Sections {
            stack: self.sections.iter().rev().collect(),
        }
    }

    /// Iterates every sentence of the document in document order.
    pub fn sentences(&self) -> impl Iterator<Item = &Sentence> {
        self.sections().flat_map(Section::sentences)
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Section;
    type IntoIter = Sections<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections()
    }
}

/// Pre-order iterator over the sections of a [`Document`].
#[derive(Debug, Clone)]
pub struct Sections<'a> {
    stack: Vec<&'a Section>,
}

impl<'a> Iterator for Sections<'a> {
    type Item = &'a Section;

    fn next(&mut self) -> Option<Self::Item> {
        let section = self.stack.pop()?;
        self.stack.extend(section.subsections.iter().rev());
        Some(section)
    }
}

/// Assembles a [`Document`] and checks its invariants.
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    sections: Vec<Section>,
}

impl DocumentBuilder {
    /// Appends a top-level section.
    pub fn push_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Appends a top-level section.
    #[must_use]
    pub fn with_section(mut self, section: Section) -> Self {
        self.push_section(section);
        self
    }

    /// Finishes the document.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::LineOrder`] if the lines within a block
    /// decrease, and [`StructureError::Overlap`] if consecutive sections (in
    /// pre-order) share lines.
    pub fn build(self) -> Result<Document, StructureError> {
        let document = Document {
            sections: self.sections,
        };

        let mut previous: Option<LineSpan> = None;
        for section in &document {
            for block in section.blocks() {
                check_line_order(block)?;
            }
            let Some(span) = section.span() else {
                continue;
            };
            if let Some(previous) = previous {
                if span.start() <= previous.end() {
                    return Err(StructureError::Overlap {
                        previous_end: previous.end(),
                        start: span.start(),
                    });
                }
            }
            previous = Some(span);
        }

        Ok(document)
    }
}

fn check_line_order(sentences: &[Sentence]) -> Result<(), StructureError> {
    for pair in sentences.windows(2) {
        let (previous, line) = (pair[0].line().get(), pair[1].line().get());
        if line < previous {
            return Err(StructureError::LineOrder { previous, line });
        }
    }
    Ok(())
}
