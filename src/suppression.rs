//! Filtering diagnostics through suppression directives.
//!
//! A diagnostic survives if no directive triggers on it. A directive
//! triggers when:
//!
//! 1. the diagnostic's line is inside the directive's window,
//! 2. the directive's parameters (if any) name the diagnostic's effective
//!    validator, and
//! 3. the directive's anchor and the diagnostic's line lie within the same
//!    block span of some section, the whole section counting as a block.
//!
//! Matching is order-independent: the suppressed set is the union of the
//! matches of every directive.

mod scope;

use rayon::prelude::*;
pub use scope::ScopeIndex;

use crate::domain::{
    diagnostic::{Diagnostic, SCRIPT_VALIDATOR},
    directive::SuppressionDirective,
    document::Document,
};

/// Applies a set of directives to the diagnostics of one document.
#[derive(Debug, Clone)]
pub struct Suppressor<'a> {
    index: ScopeIndex,
    directives: &'a [SuppressionDirective],
    script_validator: String,
}

/// Diagnostics split by whether a directive hid them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Diagnostics no directive triggered on, in their original order.
    pub retained: Vec<Diagnostic>,
    /// Diagnostics hidden by at least one directive, in their original order.
    pub suppressed: Vec<Diagnostic>,
}

impl<'a> Suppressor<'a> {
    /// Indexes `document` for matching against `directives`.
    #[must_use]
    pub fn new(document: &Document, directives: &'a [SuppressionDirective]) -> Self {
        Self {
            index: ScopeIndex::new(document),
            directives,
            script_validator: SCRIPT_VALIDATOR.to_string(),
        }
    }

    /// Overrides the identifier of the scripting validator whose messages
    /// carry the sub-check name.
    #[must_use]
    pub fn with_script_validator(mut self, name: impl Into<String>) -> Self {
        self.script_validator = name.into();
        self
    }

    /// Whether any directive hides `diagnostic`.
    #[must_use]
    pub fn is_suppressed(&self, diagnostic: &Diagnostic) -> bool {
        let validator = diagnostic.effective_validator_for(&self.script_validator);
        self.directives
            .iter()
            .any(|directive| directive.is_triggered_in(&self.index, diagnostic.line(), validator))
    }

    /// Drops every suppressed diagnostic, keeping the order of the rest.
    #[must_use]
    pub fn filter(&self, diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
        self.partition(diagnostics).retained
    }

    /// Splits `diagnostics` into retained and suppressed, keeping order within
    /// each.
    #[must_use]
    pub fn partition(&self, diagnostics: Vec<Diagnostic>) -> Partition {
        if self.directives.is_empty() {
            return Partition {
                retained: diagnostics,
                suppressed: Vec::new(),
            };
        }

        let (suppressed, retained): (Vec<_>, Vec<_>) = diagnostics
            .into_par_iter()
            .partition(|diagnostic| self.is_suppressed(diagnostic));

        tracing::debug!(
            directives = self.directives.len(),
            sections = self.index.section_count(),
            retained = retained.len(),
            suppressed = suppressed.len(),
            "applied suppression directives"
        );

        Partition {
            retained,
            suppressed,
        }
    }
}

/// Drops every diagnostic that one of `directives` hides in `document`.
#[must_use]
pub fn filter_diagnostics(
    document: &Document,
    directives: &[SuppressionDirective],
    diagnostics: Vec<Diagnostic>,
) -> Vec<Diagnostic> {
    Suppressor::new(document, directives).filter(diagnostics)
}
