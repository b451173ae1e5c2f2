//! Inline suppression directives.
//!
//! A directive is created from a marker found on some source line `L` and
//! applies from line `L + 1` (its *anchor*). Its lifecycle is split across
//! two types:
//!
//! - [`DirectiveBuilder`]: the directive has been parsed and may still
//!   receive parameters.
//! - [`SuppressionDirective`]: the directive is ready for matching, with or
//!   without an upper bound. It cannot be modified any further.

use std::{fmt, num::NonZeroUsize, str::FromStr};

use thiserror::Error;

use crate::{
    domain::{diagnostic::Diagnostic, document::Document},
    suppression::ScopeIndex,
};

/// The kinds of directive that can appear in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Hide diagnostics within the directive's region.
    Suppress,
}

impl RuleKind {
    /// The marker token for this kind, e.g. `SUPPRESS`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Suppress => "SUPPRESS",
        }
    }

    /// Whether a directive of this kind is meaningless without parameters.
    #[must_use]
    pub const fn requires_parameters(self) -> bool {
        match self {
            Self::Suppress => false,
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unrecognised rule kind token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown rule kind '{0}'")]
pub struct ParseRuleKindError(String);

impl FromStr for RuleKind {
    type Err = ParseRuleKindError;

    /// Parses a rule kind token, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case(Self::Suppress.as_str()) {
            Ok(Self::Suppress)
        } else {
            Err(ParseRuleKindError(s.to_string()))
        }
    }
}

/// Errors raised while completing a directive.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectiveError {
    /// The upper bound precedes the anchor line.
    #[error("upper bound {bound} precedes the anchor line {anchor}")]
    BoundBeforeAnchor {
        /// The anchor line of the directive.
        anchor: usize,
        /// The rejected bound.
        bound: usize,
    },

    /// The rule kind needs at least one parameter and none was given.
    #[error("{0} directive requires at least one parameter")]
    MissingParameters(RuleKind),
}

/// A directive that has been parsed and may still receive parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveBuilder {
    kind: RuleKind,
    anchor: NonZeroUsize,
    parameters: Vec<String>,
}

impl DirectiveBuilder {
    /// Adds a validator identifier, case-folded.
    ///
    /// Blank tokens and identifiers already present are ignored.
    pub fn add_parameter(&mut self, token: &str) {
        let token = token.trim();
        if token.is_empty() {
            return;
        }
        let parameter = token.to_lowercase();
        if !self.parameters.contains(&parameter) {
            self.parameters.push(parameter);
        }
    }

    /// Adds a validator identifier, case-folded.
    #[must_use]
    pub fn with_parameter(mut self, token: &str) -> Self {
        self.add_parameter(token);
        self
    }

    /// The first line the directive applies to.
    #[must_use]
    pub const fn anchor(&self) -> NonZeroUsize {
        self.anchor
    }

    /// The rule kind.
    #[must_use]
    pub const fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Completes the directive with an exclusive upper bound: it applies to
    /// lines `[anchor, bound)`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::BoundBeforeAnchor`] if `bound` is below the
    /// anchor line, or [`DirectiveError::MissingParameters`] if the rule kind
    /// requires parameters and none were added.
    pub fn bounded(self, bound: usize) -> Result<SuppressionDirective, DirectiveError> {
        let checked = NonZeroUsize::new(bound)
            .filter(|bound| *bound >= self.anchor)
            .ok_or(DirectiveError::BoundBeforeAnchor {
                anchor: self.anchor.get(),
                bound,
            })?;
        self.finish(Some(checked))
    }

    /// Completes the directive without an upper bound.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::MissingParameters`] if the rule kind requires
    /// parameters and none were added.
    pub fn unbounded(self) -> Result<SuppressionDirective, DirectiveError> {
        self.finish(None)
    }

    fn finish(self, bound: Option<NonZeroUsize>) -> Result<SuppressionDirective, DirectiveError> {
        if self.kind.requires_parameters() && self.parameters.is_empty() {
            return Err(DirectiveError::MissingParameters(self.kind));
        }
        Ok(SuppressionDirective {
            kind: self.kind,
            anchor: self.anchor,
            bound,
            parameters: self.parameters,
        })
    }
}

/// A directive ready for matching against diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuppressionDirective {
    kind: RuleKind,
    anchor: NonZeroUsize,
    bound: Option<NonZeroUsize>,
    parameters: Vec<String>,
}

impl SuppressionDirective {
    /// Starts a directive found on `directive_line`.
    ///
    /// The directive applies from the following line.
    #[allow(clippy::new_ret_no_self)]
    #[must_use]
    pub const fn new(kind: RuleKind, directive_line: usize) -> DirectiveBuilder {
        DirectiveBuilder {
            kind,
            anchor: NonZeroUsize::MIN.saturating_add(directive_line),
            parameters: Vec::new(),
        }
    }

    /// The rule kind.
    #[must_use]
    pub const fn kind(&self) -> RuleKind {
        self.kind
    }

    /// The first line the directive applies to.
    #[must_use]
    pub const fn anchor(&self) -> NonZeroUsize {
        self.anchor
    }

    /// The first line the directive no longer applies to, if bounded.
    #[must_use]
    pub const fn upper_bound(&self) -> Option<NonZeroUsize> {
        self.bound
    }

    /// The case-folded validator identifiers the directive is limited to.
    ///
    /// Empty means every validator.
    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Whether `line` falls inside the directive's window.
    ///
    /// Unbounded directives have no upper restriction.
    #[must_use]
    pub fn in_window(&self, line: usize) -> bool {
        self.bound.is_none_or(|bound| line < bound.get())
    }

    /// Whether the directive's parameters admit the given validator.
    #[must_use]
    pub fn applies_to(&self, validator: &str) -> bool {
        self.parameters.is_empty() || self.parameters.contains(&validator.to_lowercase())
    }

    /// Whether the directive hides `diagnostic` within `document`.
    ///
    /// The block spans of the document are computed on every call; use a
    /// [`ScopeIndex`] (or a [`crate::Suppressor`]) to match many diagnostics.
    #[must_use]
    pub fn is_triggered(&self, document: &Document, diagnostic: &Diagnostic) -> bool {
        self.is_triggered_at(document, diagnostic.line(), diagnostic.effective_validator())
    }

    /// Whether the directive hides a diagnostic of `validator` on `line`.
    ///
    /// `validator` is expected to be the effective identifier already.
    #[must_use]
    pub fn is_triggered_at(&self, document: &Document, line: usize, validator: &str) -> bool {
        self.is_triggered_in(&ScopeIndex::new(document), line, validator)
    }

    /// Whether the directive hides a diagnostic of `validator` on `line`,
    /// given the precomputed spans of the document.
    #[must_use]
    pub fn is_triggered_in(&self, index: &ScopeIndex, line: usize, validator: &str) -> bool {
        if !self.in_window(line) {
            return false;
        }
        if !self.applies_to(validator) {
            return false;
        }
        index.shares_scope(self.anchor.get(), line)
    }
}

impl fmt::Display for SuppressionDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from line {}", self.kind, self.anchor)?;
        if let Some(bound) = self.bound {
            write!(f, " until line {bound}")?;
        }
        if !self.parameters.is_empty() {
            write!(f, " [{}]", self.parameters.join(", "))?;
        }
        Ok(())
    }
}
