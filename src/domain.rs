//! Domain models for document linting.
//!
//! This module contains the core domain types: the block tree of a parsed
//! document, diagnostics emitted by validators, suppression directives, the
//! per-locale glyph tables, and configuration.

/// The block tree of a parsed document.
pub mod document;
pub use document::{
    Document, DocumentBuilder, LineSpan, ListBlock, ListElement, Paragraph, Section,
    SectionBuilder, Sentence, StructureError,
};

/// Diagnostics emitted by validators.
pub mod diagnostic;
pub use diagnostic::Diagnostic;

/// Inline suppression directives.
pub mod directive;
pub use directive::{DirectiveBuilder, DirectiveError, RuleKind, SuppressionDirective};

/// Per-locale glyph tables.
pub mod symbol;
pub use symbol::{GlyphDefinition, Locale, LookupError, SymbolId, SymbolTable, SymbolTableBuilder};

mod config;
pub use config::{Config, ConfigError, SymbolOverride};
