//! Built-in glyph data.

use super::{GlyphDefinition, Locale, SymbolId};

/// `(symbol, accepted glyph, flagged glyphs, space before, space after)`
type Row = (SymbolId, char, &'static str, bool, bool);

const EN: &[Row] = &[
    (SymbolId::Space, ' ', "\u{3000}", false, false),
    (SymbolId::ExclamationMark, '!', "！", false, true),
    (SymbolId::NumberSign, '#', "＃", false, false),
    (SymbolId::DollarSign, '$', "＄", false, false),
    (SymbolId::PercentSign, '%', "％", false, false),
    (SymbolId::QuestionMark, '?', "？", false, true),
    (SymbolId::Ampersand, '&', "＆", false, false),
    (SymbolId::LeftParenthesis, '(', "（", true, false),
    (SymbolId::RightParenthesis, ')', "）", false, true),
    (SymbolId::Asterisk, '*', "＊", false, false),
    (SymbolId::Comma, ',', "、，", false, true),
    (SymbolId::FullStop, '.', "．。", false, true),
    (SymbolId::PlusSign, '+', "＋", false, false),
    (SymbolId::HyphenSign, '-', "ー", false, false),
    (SymbolId::MinusSign, '-', "ー", false, false),
    (SymbolId::Slash, '/', "／", false, false),
    (SymbolId::Colon, ':', "：", false, true),
    (SymbolId::Semicolon, ';', "；", false, true),
    (SymbolId::LessThanSign, '<', "＜", false, false),
    (SymbolId::EqualSign, '=', "＝", false, false),
    (SymbolId::GreaterThanSign, '>', "＞", false, false),
    (SymbolId::AtMark, '@', "＠", false, false),
    (SymbolId::LeftSquareBracket, '[', "", false, false),
    (SymbolId::RightSquareBracket, ']', "", false, false),
    (SymbolId::Backslash, '\\', "", false, false),
    (SymbolId::CircumflexAccent, '^', "＾", false, false),
    (SymbolId::LowLine, '_', "＿", false, false),
    (SymbolId::LeftCurlyBracket, '{', "｛", false, false),
    (SymbolId::RightCurlyBracket, '}', "｝", false, false),
    (SymbolId::VerticalBar, '|', "｜", false, false),
    (SymbolId::Tilde, '~', "〜", false, false),
    (SymbolId::LeftSingleQuotationMark, '‘', "", false, false),
    (SymbolId::RightSingleQuotationMark, '’', "", false, false),
    (SymbolId::LeftDoubleQuotationMark, '“', "", false, false),
    (SymbolId::RightDoubleQuotationMark, '”', "", false, false),
];

const JA: &[Row] = &[
    (SymbolId::Space, '\u{3000}', " ", false, false),
    (SymbolId::ExclamationMark, '！', "!", false, false),
    (SymbolId::NumberSign, '＃', "#", false, false),
    (SymbolId::DollarSign, '$', "＄", false, false),
    (SymbolId::PercentSign, '％', "%", false, false),
    (SymbolId::QuestionMark, '？', "?", false, false),
    (SymbolId::Ampersand, '＆', "&", false, false),
    (SymbolId::LeftParenthesis, '（', "(", false, false),
    (SymbolId::RightParenthesis, '）', ")", false, false),
    (SymbolId::Asterisk, '＊', "*", false, false),
    (SymbolId::Comma, '、', ",", false, false),
    (SymbolId::FullStop, '。', ".", false, false),
    (SymbolId::PlusSign, '＋', "+", false, false),
    (SymbolId::HyphenSign, 'ー', "-", false, false),
    (SymbolId::MinusSign, 'ー', "-", false, false),
    (SymbolId::Slash, '／', "/", false, false),
    (SymbolId::Colon, '：', ":", false, false),
    (SymbolId::Semicolon, '；', ";", false, false),
    (SymbolId::LessThanSign, '＜', "<", false, false),
    (SymbolId::EqualSign, '＝', "=", false, false),
    (SymbolId::GreaterThanSign, '＞', ">", false, false),
    (SymbolId::AtMark, '＠', "@", false, false),
    (SymbolId::LeftSquareBracket, '「', "", false, false),
    (SymbolId::RightSquareBracket, '」', "", false, false),
    (SymbolId::Backslash, '¥', "\\", false, false),
    (SymbolId::CircumflexAccent, '＾', "^", false, false),
    (SymbolId::LowLine, '＿', "_", false, false),
    (SymbolId::LeftCurlyBracket, '｛', "", false, false),
    (SymbolId::RightCurlyBracket, '｝', "", false, false),
    (SymbolId::VerticalBar, '｜', "|", false, false),
    (SymbolId::Tilde, '〜', "~", false, false),
    (SymbolId::DigitZero, '0', "０", false, false),
    (SymbolId::DigitOne, '1', "１", false, false),
    (SymbolId::DigitTwo, '2', "２", false, false),
    (SymbolId::DigitThree, '3', "３", false, false),
    (SymbolId::DigitFour, '4', "４", false, false),
    (SymbolId::DigitFive, '5', "５", false, false),
    (SymbolId::DigitSix, '6', "６", false, false),
    (SymbolId::DigitSeven, '7', "７", false, false),
    (SymbolId::DigitEight, '8', "８", false, false),
    (SymbolId::DigitNine, '9', "９", false, false),
];

/// The built-in definitions of `locale`.
pub(super) fn definitions(locale: Locale) -> impl Iterator<Item = GlyphDefinition> {
    let rows = match locale {
        Locale::En => EN,
        Locale::Ja => JA,
    };
    rows.iter().map(|&(id, value, invalid, before, after)| {
        GlyphDefinition::new(id, value)
            .with_invalid_chars(invalid)
            .with_space_before(before)
            .with_space_after(after)
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn symbol_names_are_unique_within_each_locale() {
        for rows in [EN, JA] {
            let ids: HashSet<_> = rows.iter().map(|row| row.0).collect();
            assert_eq!(ids.len(), rows.len());
        }
    }

    #[test]
    fn accepted_glyph_is_never_flagged() {
        for locale in [Locale::En, Locale::Ja] {
            for definition in definitions(locale) {
                assert!(
                    !definition.is_invalid(definition.value()),
                    "{locale} {}",
                    definition.id()
                );
            }
        }
    }
}
