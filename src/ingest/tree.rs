use crate::domain::document::{
    Document, DocumentBuilder, ListBlock, ListElement, Paragraph, Section, SectionBuilder,
    StructureError,
};

use super::sentences::{SentenceSplitter, SourceLine};

/// A block whose lines are still being collected.
#[derive(Debug)]
enum OpenBlock<'a> {
    Paragraph(Vec<SourceLine<'a>>),
    List(Vec<OpenItem<'a>>),
}

#[derive(Debug)]
struct OpenItem<'a> {
    level: usize,
    lines: Vec<SourceLine<'a>>,
}

/// Assembles the section tree from classified lines.
///
/// Sections are kept on a stack ordered by heading level. A heading closes
/// every open section at the same or a deeper level before opening its own.
#[derive(Debug)]
pub(super) struct TreeBuilder<'a> {
    splitter: SentenceSplitter,
    document: DocumentBuilder,
    preamble: Option<SectionBuilder>,
    stack: Vec<SectionBuilder>,
    block: Option<OpenBlock<'a>>,
}

impl<'a> TreeBuilder<'a> {
    pub(super) fn new(splitter: SentenceSplitter) -> Self {
        Self {
            splitter,
            document: Document::builder(),
            preamble: Some(Section::builder(0)),
            stack: Vec::new(),
            block: None,
        }
    }

    pub(super) fn text(&mut self, line: SourceLine<'a>) {
        match &mut self.block {
            Some(OpenBlock::Paragraph(lines)) => lines.push(line),
            Some(OpenBlock::List(items)) => {
                if let Some(item) = items.last_mut() {
                    item.lines.push(line);
                }
            }
            None => self.block = Some(OpenBlock::Paragraph(vec![line])),
        }
    }

    pub(super) fn list_item(&mut self, level: usize, line: SourceLine<'a>) {
        let item = OpenItem {
            level,
            lines: vec![line],
        };
        if let Some(OpenBlock::List(items)) = &mut self.block {
            items.push(item);
        } else {
            self.end_block();
            self.block = Some(OpenBlock::List(vec![item]));
        }
    }

    pub(super) fn heading(&mut self, level: usize, line: SourceLine<'a>) {
        self.end_block();
        self.close_preamble();
        while self.stack.last().is_some_and(|open| open.level() >= level) {
            self.close_section();
        }

        let header = self.splitter.split(&[line]);
        self.stack.push(Section::builder(level).with_header(header));
    }

    /// Closes the block being collected, if any.
    pub(super) fn end_block(&mut self) {
        let Some(block) = self.block.take() else {
            return;
        };
        let splitter = &self.splitter;
        let Some(section) = self.stack.last_mut().or(self.preamble.as_mut()) else {
            return;
        };

        match block {
            OpenBlock::Paragraph(lines) => {
                section.push_paragraph(Paragraph::new(splitter.split(&lines)));
            }
            OpenBlock::List(items) => {
                let elements = items
                    .into_iter()
                    .map(|item| ListElement::new(item.level, splitter.split(&item.lines)))
                    .collect();
                section.push_list_block(ListBlock::new(elements));
            }
        }
    }

    pub(super) fn finish(mut self) -> Result<Document, StructureError> {
        self.end_block();
        self.close_preamble();
        while !self.stack.is_empty() {
            self.close_section();
        }
        self.document.build()
    }

    /// Hands the content before the first heading to the document, if there
    /// was any.
    fn close_preamble(&mut self) {
        if let Some(preamble) = self.preamble.take() {
            let section = preamble.build();
            if section.span().is_some() {
                self.document.push_section(section);
            }
        }
    }

    fn close_section(&mut self) {
        let Some(open) = self.stack.pop() else {
            return;
        };
        let section = open.build();
        match self.stack.last_mut() {
            Some(parent) => parent.push_subsection(section),
            None => self.document.push_section(section),
        }
    }
}
