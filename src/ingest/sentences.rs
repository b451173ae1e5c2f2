use std::num::NonZeroUsize;

use crate::domain::{
    document::Sentence,
    symbol::{Locale, SymbolId, SymbolTable},
};

/// A trimmed source line together with its 1-based line number.
pub(super) type SourceLine<'a> = (NonZeroUsize, &'a str);

/// Splits runs of source lines into sentences at the locale's terminal
/// punctuation.
#[derive(Debug, Clone)]
pub(super) struct SentenceSplitter {
    terminators: Vec<char>,
    joiner: &'static str,
}

impl SentenceSplitter {
    const TERMINATORS: [SymbolId; 3] = [
        SymbolId::FullStop,
        SymbolId::QuestionMark,
        SymbolId::ExclamationMark,
    ];

    pub(super) fn new(symbols: &SymbolTable) -> Self {
        let terminators = Self::TERMINATORS
            .iter()
            .filter_map(|&id| symbols.lookup(id).ok())
            .map(|definition| definition.value())
            .collect();

        // Japanese text wraps without word separators.
        let joiner = match symbols.locale() {
            Locale::En => " ",
            Locale::Ja => "",
        };

        Self {
            terminators,
            joiner,
        }
    }

    /// Splits `lines` into sentences. Each sentence records the line its
    /// first non-whitespace character is on. Text after the last terminator
    /// forms a final sentence.
    pub(super) fn split(&self, lines: &[SourceLine<'_>]) -> Vec<Sentence> {
        let mut sentences = Vec::new();
        let mut content = String::new();
        let mut start: Option<NonZeroUsize> = None;

        for &(line, text) in lines {
            if start.is_some() && !text.is_empty() {
                content.push_str(self.joiner);
            }
            for c in text.chars() {
                if start.is_none() {
                    if c.is_whitespace() {
                        continue;
                    }
                    start = Some(line);
                }
                content.push(c);
                if self.terminators.contains(&c) {
                    if let Some(first) = start.take() {
                        sentences.push(Sentence::new(content.trim_end(), first));
                    }
                    content.clear();
                }
            }
        }

        if let Some(first) = start {
            let rest = content.trim_end();
            if !rest.is_empty() {
                sentences.push(Sentence::new(rest, first));
            }
        }

        sentences
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines<'a>(lines: &[(usize, &'a str)]) -> Vec<SourceLine<'a>> {
        lines
            .iter()
            .map(|&(line, text)| (NonZeroUsize::new(line).unwrap(), text))
            .collect()
    }

    fn contents(sentences: &[Sentence]) -> Vec<(&str, usize)> {
        sentences
            .iter()
            .map(|s| (s.content(), s.line().get()))
            .collect()
    }

    #[test]
    fn splits_at_terminal_punctuation() {
        let splitter = SentenceSplitter::new(SymbolTable::instance(Locale::En));
        let sentences = splitter.split(&lines(&[(3, "One. Two? Three! Four")]));

        assert_eq!(
            contents(&sentences),
            vec![("One.", 3), ("Two?", 3), ("Three!", 3), ("Four", 3)]
        );
    }

    #[test]
    fn sentences_spanning_lines_start_where_they_begin() {
        let splitter = SentenceSplitter::new(SymbolTable::instance(Locale::En));
        let sentences = splitter.split(&lines(&[
            (5, "This sentence wraps"),
            (6, "onto the next line. A second"),
            (7, "one."),
        ]));

        assert_eq!(
            contents(&sentences),
            vec![
                ("This sentence wraps onto the next line.", 5),
                ("A second one.", 6),
            ]
        );
    }

    #[test]
    fn sentence_starting_at_line_end_moves_to_the_next_line() {
        let splitter = SentenceSplitter::new(SymbolTable::instance(Locale::En));
        let sentences = splitter.split(&lines(&[(1, "Ends here."), (2, "Starts here.")]));

        assert_eq!(
            contents(&sentences),
            vec![("Ends here.", 1), ("Starts here.", 2)]
        );
    }

    #[test]
    fn japanese_uses_full_width_terminators() {
        let splitter = SentenceSplitter::new(SymbolTable::instance(Locale::Ja));
        let sentences = splitter.split(&lines(&[(1, "これは文です。これも"), (2, "文です。")]));

        assert_eq!(
            contents(&sentences),
            vec![("これは文です。", 1), ("これも文です。", 1)]
        );
    }

    #[test]
    fn ascii_full_stop_does_not_end_japanese_sentences() {
        let splitter = SentenceSplitter::new(SymbolTable::instance(Locale::Ja));
        let sentences = splitter.split(&lines(&[(1, "半角. のまま")]));

        assert_eq!(contents(&sentences), vec![("半角. のまま", 1)]);
    }

    #[test]
    fn no_text_yields_no_sentences() {
        let splitter = SentenceSplitter::new(SymbolTable::instance(Locale::En));
        assert!(splitter.split(&[]).is_empty());
        assert!(splitter.split(&lines(&[(1, "")])).is_empty());
    }
}
