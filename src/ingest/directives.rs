use std::num::NonZeroUsize;

use crate::domain::directive::{DirectiveBuilder, DirectiveError, RuleKind, SuppressionDirective};

use super::IngestWarning;

/// A marker whose directive has not been attached to content yet.
#[derive(Debug)]
struct Staged {
    line: NonZeroUsize,
    kind: RuleKind,
    parameters: Vec<String>,
}

/// Collects directives as their markers are read and bounds them at the
/// following heading.
///
/// A directive is anchored on the first content line after its marker.
/// Markers stacked on top of each other, or separated from the content by
/// blank lines, comments or code blocks, all anchor on the same line.
#[derive(Debug, Default)]
pub(super) struct DirectiveCollector {
    staged: Vec<Staged>,
    /// Anchored directives and the lines of their markers.
    pending: Vec<(NonZeroUsize, DirectiveBuilder)>,
    directives: Vec<SuppressionDirective>,
    warnings: Vec<IngestWarning>,
}

impl DirectiveCollector {
    /// Reads the marker text (after the `@`) found on `line`.
    ///
    /// The first token is the rule kind, the rest are parameters separated by
    /// whitespace or commas.
    pub(super) fn marker(&mut self, line: NonZeroUsize, marker: &str) {
        let mut tokens = marker
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty());

        let Some(kind) = tokens.next() else {
            self.warn(IngestWarning::EmptyMarker { line: line.get() });
            return;
        };
        let kind = match kind.parse::<RuleKind>() {
            Ok(kind) => kind,
            Err(source) => {
                self.warn(IngestWarning::UnknownKind {
                    line: line.get(),
                    source,
                });
                return;
            }
        };

        self.staged.push(Staged {
            line,
            kind,
            parameters: tokens.map(str::to_string).collect(),
        });
    }

    /// Anchors the staged directives on the sentence text at `line`.
    pub(super) fn content(&mut self, line: NonZeroUsize) {
        for staged in std::mem::take(&mut self.staged) {
            let mut builder = SuppressionDirective::new(staged.kind, line.get() - 1);
            for parameter in &staged.parameters {
                builder.add_parameter(parameter);
            }
            self.pending.push((staged.line, builder));
        }
    }

    /// Bounds every pending directive anchored before the heading on `line`.
    ///
    /// Directives staged above the heading are anchored on the heading itself
    /// and stay pending, so they cover the heading's section.
    pub(super) fn heading(&mut self, line: NonZeroUsize) {
        self.content(line);

        let (bounded, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|(_, builder)| builder.anchor() < line);
        self.pending = pending;

        for (marker, builder) in bounded {
            let result = builder.bounded(line.get());
            self.complete(marker, result);
        }
    }

    /// Completes the directives still pending, without an upper bound.
    ///
    /// Markers with no content after them are dropped.
    pub(super) fn finish(mut self) -> (Vec<SuppressionDirective>, Vec<IngestWarning>) {
        for staged in std::mem::take(&mut self.staged) {
            self.warn(IngestWarning::NoContent {
                line: staged.line.get(),
            });
        }
        for (marker, builder) in std::mem::take(&mut self.pending) {
            let result = builder.unbounded();
            self.complete(marker, result);
        }
        (self.directives, self.warnings)
    }

    fn complete(
        &mut self,
        marker: NonZeroUsize,
        result: Result<SuppressionDirective, DirectiveError>,
    ) {
        match result {
            Ok(directive) => self.directives.push(directive),
            Err(source) => self.warn(IngestWarning::InvalidDirective {
                line: marker.get(),
                source,
            }),
        }
    }

    fn warn(&mut self, warning: IngestWarning) {
        tracing::warn!("{warning}, directive dropped");
        self.warnings.push(warning);
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn line(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn marker_creates_a_directive_anchored_on_the_next_line() {
        let mut collector = DirectiveCollector::default();
        collector.marker(line(3), "suppress Spelling, grammar");
        collector.content(line(4));
        let (directives, warnings) = collector.finish();

        assert!(warnings.is_empty());
        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0].anchor().get(), 4);
        assert!(directives[0].upper_bound().is_none());
        assert_eq!(directives[0].parameters(), &["spelling", "grammar"]);
    }

    #[test]
    fn heading_bounds_directives_anchored_before_it() {
        let mut collector = DirectiveCollector::default();
        collector.marker(line(2), "SUPPRESS");
        collector.content(line(3));
        collector.content(line(4));
        collector.heading(line(6));
        let (directives, _) = collector.finish();

        assert_eq!(directives[0].anchor().get(), 3);
        assert_eq!(directives[0].upper_bound().map(NonZeroUsize::get), Some(6));
    }

    #[test]
    fn directive_right_above_a_heading_covers_that_section() {
        let mut collector = DirectiveCollector::default();
        collector.marker(line(5), "SUPPRESS");
        collector.heading(line(6));
        collector.heading(line(10));
        let (directives, _) = collector.finish();

        assert_eq!(directives[0].anchor().get(), 6);
        assert_eq!(directives[0].upper_bound().map(NonZeroUsize::get), Some(10));
    }

    #[test]
    fn directives_keep_document_order_within_each_heading() {
        let mut collector = DirectiveCollector::default();
        collector.marker(line(1), "SUPPRESS a");
        collector.marker(line(2), "SUPPRESS b");
        collector.content(line(3));
        collector.heading(line(5));
        collector.marker(line(6), "SUPPRESS c");
        collector.content(line(7));
        let (directives, _) = collector.finish();

        let parameters: Vec<_> = directives
            .iter()
            .map(|directive| directive.parameters()[0].as_str())
            .collect();
        assert_eq!(parameters, vec!["a", "b", "c"]);
    }

    #[test]
    fn stacked_markers_above_a_heading_all_cover_its_section() {
        let mut collector = DirectiveCollector::default();
        collector.marker(line(1), "SUPPRESS spelling");
        collector.marker(line(2), "SUPPRESS grammar");
        collector.heading(line(3));
        collector.content(line(4));
        let (directives, warnings) = collector.finish();

        assert!(warnings.is_empty());
        let anchors: Vec<_> = directives.iter().map(|d| d.anchor().get()).collect();
        assert_eq!(anchors, vec![3, 3]);
        assert!(directives.iter().all(|d| d.upper_bound().is_none()));
    }

    #[test]
    fn marker_separated_from_its_text_anchors_on_the_text() {
        let mut collector = DirectiveCollector::default();
        collector.marker(line(2), "SUPPRESS");
        // Line 3 is blank.
        collector.content(line(4));
        let (directives, _) = collector.finish();

        assert_eq!(directives[0].anchor().get(), 4);
    }

    #[test]
    fn marker_without_following_content_is_dropped_with_a_warning() {
        let mut collector = DirectiveCollector::default();
        collector.content(line(1));
        collector.marker(line(2), "SUPPRESS spelling");
        let (directives, warnings) = collector.finish();

        assert!(directives.is_empty());
        assert_eq!(warnings, vec![IngestWarning::NoContent { line: 2 }]);
    }

    #[test]
    fn suppress_without_parameters_is_not_an_invalid_directive() {
        assert!(!RuleKind::Suppress.requires_parameters());

        let mut collector = DirectiveCollector::default();
        collector.marker(line(1), "SUPPRESS");
        collector.content(line(2));
        collector.heading(line(3));
        let (directives, warnings) = collector.finish();

        assert_eq!(directives.len(), 1);
        assert!(directives[0].parameters().is_empty());
        assert!(warnings.is_empty());
    }

    #[test_case("", IngestWarning::EmptyMarker { line: 7 }; "empty")]
    #[test_case(" , ", IngestWarning::EmptyMarker { line: 7 }; "separators only")]
    #[test_case(
        "silence spelling",
        IngestWarning::UnknownKind { line: 7, source: "silence".parse::<RuleKind>().unwrap_err() };
        "unknown kind"
    )]
    fn malformed_markers_are_dropped_with_a_warning(marker: &str, expected: IngestWarning) {
        let mut collector = DirectiveCollector::default();
        collector.marker(line(7), marker);
        let (directives, warnings) = collector.finish();

        assert!(directives.is_empty());
        assert_eq!(warnings, vec![expected]);
    }
}
