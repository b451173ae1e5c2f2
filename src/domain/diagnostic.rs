//! Diagnostics emitted by validators.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::document::Sentence;

/// Validator identifier of the embedded scripting validator.
///
/// Diagnostics from this validator name the sub-check that produced them in
/// the first token of the message, e.g. `[CustomCheck.js] found issue`.
pub const SCRIPT_VALIDATOR: &str = "JavaScript";

/// A finding reported by a validator against a source line.
///
/// Diagnostics are never modified once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    validator: String,
    line: usize,
    message: String,

    /// Name of the sub-check that produced the diagnostic, when the producer
    /// knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub_validator: Option<String>,

    /// The sentence the validator was looking at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sentence: Option<Sentence>,
}

impl Diagnostic {
    /// Creates a diagnostic for the given validator and line.
    #[must_use]
    pub fn new(validator: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self {
            validator: validator.into(),
            line,
            message: message.into(),
            sub_validator: None,
            sentence: None,
        }
    }

    /// Records the sub-check name explicitly.
    #[must_use]
    pub fn with_sub_validator(mut self, name: impl Into<String>) -> Self {
        self.sub_validator = Some(name.into());
        self
    }

    /// Attaches the sentence that triggered the diagnostic.
    #[must_use]
    pub fn with_sentence(mut self, sentence: Sentence) -> Self {
        self.sentence = Some(sentence);
        self
    }

    /// Identifier of the validator that emitted the diagnostic.
    #[must_use]
    pub fn validator(&self) -> &str {
        &self.validator
    }

    /// 1-based source line. Zero for diagnostics not tied to a line.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The explicitly recorded sub-check name, if any.
    #[must_use]
    pub fn sub_validator(&self) -> Option<&str> {
        self.sub_validator.as_deref()
    }

    /// The sentence that triggered the diagnostic, if recorded.
    #[must_use]
    pub const fn sentence(&self) -> Option<&Sentence> {
        self.sentence.as_ref()
    }

    /// The identifier suppression directives match against.
    ///
    /// Equivalent to [`Self::effective_validator_for`] with
    /// [`SCRIPT_VALIDATOR`] as the sentinel.
    #[must_use]
    pub fn effective_validator(&self) -> &str {
        self.effective_validator_for(SCRIPT_VALIDATOR)
    }

    /// The identifier suppression directives match against, given the
    /// sentinel identifier of the scripting validator.
    ///
    /// For diagnostics of any other validator this is the validator
    /// identifier itself. For the sentinel it is the explicit sub-validator
    /// name if recorded, otherwise the name embedded in the message (see
    /// [`embedded_validator_name`]). A message that does not follow the
    /// convention leaves the sentinel in place.
    #[must_use]
    pub fn effective_validator_for(&self, sentinel: &str) -> &str {
        if self.validator != sentinel {
            return &self.validator;
        }
        self.sub_validator
            .as_deref()
            .or_else(|| embedded_validator_name(&self.message))
            .unwrap_or(&self.validator)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [{}] {}", self.line, self.validator, self.message)
    }
}

/// Extracts the sub-check name from a message of the form
/// `[<name>.<ext>] rest of message`.
///
/// Only the first whitespace-delimited token is considered. The brackets and
/// the last `.<ext>` suffix are removed, so `[my.check.js]` yields
/// `my.check`.
///
/// ```
/// use proofline::domain::diagnostic::embedded_validator_name;
///
/// assert_eq!(embedded_validator_name("[CustomCheck.js] found issue"), Some("CustomCheck"));
/// assert_eq!(embedded_validator_name("found issue"), None);
/// ```
#[must_use]
pub fn embedded_validator_name(message: &str) -> Option<&str> {
    let token = message.split_whitespace().next()?;
    let inner = token.strip_prefix('[')?.strip_suffix(']')?;
    let (name, extension) = inner.rsplit_once('.')?;
    if name.is_empty() || extension.is_empty() {
        return None;
    }
    Some(name)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("[CustomCheck.js] found issue", Some("CustomCheck"); "script name")]
    #[test_case("[my.check.js] found issue", Some("my.check"); "dotted name keeps inner dots")]
    #[test_case("  [Padded.js]   leading whitespace", Some("Padded"); "leading whitespace")]
    #[test_case("[Solo.js]", Some("Solo"); "token only")]
    #[test_case("found [Late.js] issue", None; "not first token")]
    #[test_case("[NoExtension] issue", None; "no extension")]
    #[test_case("[.js] issue", None; "empty name")]
    #[test_case("[Name.] issue", None; "empty extension")]
    #[test_case("Name.js issue", None; "no brackets")]
    #[test_case("", None; "empty message")]
    fn embedded_names(message: &str, expected: Option<&str>) {
        assert_eq!(embedded_validator_name(message), expected);
    }

    #[test]
    fn script_diagnostics_resolve_to_embedded_name() {
        let diagnostic = Diagnostic::new("JavaScript", 3, "[CustomCheck.js] found issue");
        assert_eq!(diagnostic.effective_validator(), "CustomCheck");
    }

    #[test]
    fn other_validators_keep_their_identifier() {
        let diagnostic = Diagnostic::new("Spelling", 3, "[CustomCheck.js] found issue");
        assert_eq!(diagnostic.effective_validator(), "Spelling");
    }

    #[test]
    fn explicit_sub_validator_takes_precedence() {
        let diagnostic = Diagnostic::new("JavaScript", 3, "[CustomCheck.js] found issue")
            .with_sub_validator("Explicit");
        assert_eq!(diagnostic.effective_validator(), "Explicit");
    }

    #[test]
    fn malformed_script_message_keeps_sentinel() {
        let diagnostic = Diagnostic::new("JavaScript", 3, "something went wrong");
        assert_eq!(diagnostic.effective_validator(), "JavaScript");
    }

    #[test]
    fn custom_sentinel() {
        let diagnostic = Diagnostic::new("Lua", 3, "[Tone.lua] too casual");
        assert_eq!(diagnostic.effective_validator(), "Lua");
        assert_eq!(diagnostic.effective_validator_for("Lua"), "Tone");
    }

    #[test]
    fn deserializes_from_json() {
        let diagnostic: Diagnostic = serde_json::from_str(
            r#"{"validator": "Spelling", "line": 4, "message": "unknown word"}"#,
        )
        .unwrap();
        assert_eq!(diagnostic, Diagnostic::new("Spelling", 4, "unknown word"));
    }

    #[test]
    fn display() {
        let diagnostic = Diagnostic::new("Spelling", 4, "unknown word");
        assert_eq!(diagnostic.to_string(), "4: [Spelling] unknown word");
    }
}
