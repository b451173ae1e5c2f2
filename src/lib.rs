//! Plain-text document linting
//!
//! Documents are parsed into a tree of sections, paragraphs and lists.
//! Validators report diagnostics against source lines, and inline directives
//! embedded in the document hide the diagnostics they cover.

pub mod domain;
pub use domain::{Config, Diagnostic, Document, Locale, SuppressionDirective, SymbolTable};

/// Matching diagnostics against suppression directives.
pub mod suppression;
pub use suppression::{Partition, ScopeIndex, Suppressor, filter_diagnostics};

/// Reading documents and their directives from markdown sources.
pub mod ingest;
pub use ingest::{Ingested, IngestError, IngestWarning};
