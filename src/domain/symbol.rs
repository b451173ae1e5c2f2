//! Locale-specific punctuation glyphs.
//!
//! A [`SymbolTable`] maps each [`SymbolId`] to the [`GlyphDefinition`] in use
//! for one [`Locale`]: the glyph writers are expected to use, the glyphs that
//! should be flagged in its place, and whether whitespace is required around
//! it.
//!
//! Tables are assembled with a [`SymbolTableBuilder`] and cannot be modified
//! once built. The built-in table of each locale is available through
//! [`SymbolTable::instance`].
//!
//! A locale's table is complete on its own: looking up a symbol the locale
//! does not define is a [`LookupError`], never a silent fallback to another
//! locale.

mod defaults;

use std::{collections::BTreeMap, fmt, str::FromStr, sync::LazyLock};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A writing locale with its own glyph conventions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// Japanese.
    Ja,
}

impl Locale {
    /// The locale code, e.g. `en`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ja => "ja",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unsupported locale code.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported locale '{0}'")]
pub struct ParseLocaleError(String);

impl FromStr for Locale {
    type Err = ParseLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "ja" => Ok(Self::Ja),
            _ => Err(ParseLocaleError(s.to_string())),
        }
    }
}

macro_rules! symbol_ids {
    ($($variant:ident => $name:literal,)*) => {
        /// Identifies a symbol independently of the glyph used for it.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum SymbolId {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )*
        }

        impl SymbolId {
            /// Every symbol identifier.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// The canonical name, e.g. `FULL_STOP`.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }
        }
    };
}

symbol_ids! {
    Space => "SPACE",
    ExclamationMark => "EXCLAMATION_MARK",
    NumberSign => "NUMBER_SIGN",
    DollarSign => "DOLLAR_SIGN",
    PercentSign => "PERCENT_SIGN",
    QuestionMark => "QUESTION_MARK",
    Ampersand => "AMPERSAND",
    LeftParenthesis => "LEFT_PARENTHESIS",
    RightParenthesis => "RIGHT_PARENTHESIS",
    Asterisk => "ASTERISK",
    Comma => "COMMA",
    FullStop => "FULL_STOP",
    PlusSign => "PLUS_SIGN",
    HyphenSign => "HYPHEN_SIGN",
    MinusSign => "MINUS_SIGN",
    Slash => "SLASH",
    Colon => "COLON",
    Semicolon => "SEMICOLON",
    LessThanSign => "LESS_THAN_SIGN",
    EqualSign => "EQUAL_SIGN",
    GreaterThanSign => "GREATER_THAN_SIGN",
    AtMark => "AT_MARK",
    LeftSquareBracket => "LEFT_SQUARE_BRACKET",
    RightSquareBracket => "RIGHT_SQUARE_BRACKET",
    Backslash => "BACKSLASH",
    CircumflexAccent => "CIRCUMFLEX_ACCENT",
    LowLine => "LOW_LINE",
    LeftCurlyBracket => "LEFT_CURLY_BRACKET",
    RightCurlyBracket => "RIGHT_CURLY_BRACKET",
    VerticalBar => "VERTICAL_BAR",
    Tilde => "TILDE",
    LeftSingleQuotationMark => "LEFT_SINGLE_QUOTATION_MARK",
    RightSingleQuotationMark => "RIGHT_SINGLE_QUOTATION_MARK",
    LeftDoubleQuotationMark => "LEFT_DOUBLE_QUOTATION_MARK",
    RightDoubleQuotationMark => "RIGHT_DOUBLE_QUOTATION_MARK",
    DigitZero => "DIGIT_ZERO",
    DigitOne => "DIGIT_ONE",
    DigitTwo => "DIGIT_TWO",
    DigitThree => "DIGIT_THREE",
    DigitFour => "DIGIT_FOUR",
    DigitFive => "DIGIT_FIVE",
    DigitSix => "DIGIT_SIX",
    DigitSeven => "DIGIT_SEVEN",
    DigitEight => "DIGIT_EIGHT",
    DigitNine => "DIGIT_NINE",
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unknown symbol name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown symbol '{0}'")]
pub struct ParseSymbolIdError(String);

impl FromStr for SymbolId {
    type Err = ParseSymbolIdError;

    /// Parses a symbol name such as `FULL_STOP`, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseSymbolIdError(s.to_string()))
    }
}

impl Serialize for SymbolId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SymbolId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// How a symbol is written in a locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphDefinition {
    id: SymbolId,
    value: char,
    invalid_chars: Vec<char>,
    before_space: bool,
    after_space: bool,
}

impl GlyphDefinition {
    /// Defines `id` as written with `value`, with nothing flagged and no
    /// spacing requirements.
    #[must_use]
    pub const fn new(id: SymbolId, value: char) -> Self {
        Self {
            id,
            value,
            invalid_chars: Vec::new(),
            before_space: false,
            after_space: false,
        }
    }

    /// Flags each character of `chars` as a wrong form of the symbol.
    #[must_use]
    pub fn with_invalid_chars(mut self, chars: &str) -> Self {
        self.invalid_chars = chars.chars().collect();
        self
    }

    /// Requires whitespace immediately before the glyph.
    #[must_use]
    pub fn with_space_before(mut self, required: bool) -> Self {
        self.before_space = required;
        self
    }

    /// Requires whitespace immediately after the glyph.
    #[must_use]
    pub fn with_space_after(mut self, required: bool) -> Self {
        self.after_space = required;
        self
    }

    /// The symbol this glyph represents.
    #[must_use]
    pub const fn id(&self) -> SymbolId {
        self.id
    }

    /// The accepted glyph.
    #[must_use]
    pub const fn value(&self) -> char {
        self.value
    }

    /// Glyphs to flag in place of the accepted one.
    #[must_use]
    pub fn invalid_chars(&self) -> &[char] {
        &self.invalid_chars
    }

    /// Whether `c` is a flagged form of this symbol.
    #[must_use]
    pub fn is_invalid(&self, c: char) -> bool {
        self.invalid_chars.contains(&c)
    }

    /// Whether whitespace is required immediately before the glyph.
    #[must_use]
    pub const fn needs_space_before(&self) -> bool {
        self.before_space
    }

    /// Whether whitespace is required immediately after the glyph.
    #[must_use]
    pub const fn needs_space_after(&self) -> bool {
        self.after_space
    }
}

/// A symbol was looked up that the locale's table does not define.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("symbol {symbol} is not defined for locale '{locale}'")]
pub struct LookupError {
    /// The locale of the table that was queried.
    pub locale: Locale,
    /// The symbol that was requested.
    pub symbol: String,
}

/// The glyph definitions of one locale.
///
/// Immutable once built, so it can be shared freely between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    locale: Locale,
    definitions: BTreeMap<SymbolId, GlyphDefinition>,
}

static EN: LazyLock<SymbolTable> = LazyLock::new(|| SymbolTable::defaults(Locale::En));
static JA: LazyLock<SymbolTable> = LazyLock::new(|| SymbolTable::defaults(Locale::Ja));

impl SymbolTable {
    /// The built-in table for `locale`, built on first use.
    #[must_use]
    pub fn instance(locale: Locale) -> &'static Self {
        match locale {
            Locale::En => &*EN,
            Locale::Ja => &*JA,
        }
    }

    /// Builds a fresh copy of the built-in table for `locale`.
    #[must_use]
    pub fn defaults(locale: Locale) -> Self {
        SymbolTableBuilder::with_defaults(locale).build()
    }

    /// Starts an empty table for `locale`.
    #[must_use]
    pub const fn builder(locale: Locale) -> SymbolTableBuilder {
        SymbolTableBuilder {
            table: Self {
                locale,
                definitions: BTreeMap::new(),
            },
        }
    }

    /// The locale the table describes.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// The definition of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the locale does not define `id`.
    pub fn lookup(&self, id: SymbolId) -> Result<&GlyphDefinition, LookupError> {
        self.definitions.get(&id).ok_or_else(|| LookupError {
            locale: self.locale,
            symbol: id.to_string(),
        })
    }

    /// The definition of the symbol called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if `name` is not a known symbol or the locale
    /// does not define it.
    pub fn lookup_name(&self, name: &str) -> Result<&GlyphDefinition, LookupError> {
        let id = name.parse::<SymbolId>().map_err(|_| LookupError {
            locale: self.locale,
            symbol: name.to_string(),
        })?;
        self.lookup(id)
    }

    /// Whether the locale defines `id`.
    #[must_use]
    pub fn contains(&self, id: SymbolId) -> bool {
        self.definitions.contains_key(&id)
    }

    /// The definition whose flagged glyphs include `c`, if any.
    #[must_use]
    pub fn find_invalid(&self, c: char) -> Option<&GlyphDefinition> {
        self.definitions.values().find(|definition| definition.is_invalid(c))
    }

    /// Iterates the definitions in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = &GlyphDefinition> {
        self.definitions.values()
    }

    /// Number of symbols defined.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the table defines no symbol at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Assembles a [`SymbolTable`].
///
/// Registration is only possible here; [`Self::build`] hands out the finished,
/// read-only table.
#[derive(Debug, Clone)]
pub struct SymbolTableBuilder {
    table: SymbolTable,
}

impl SymbolTableBuilder {
    /// Starts from the built-in definitions of `locale`.
    #[must_use]
    pub fn with_defaults(locale: Locale) -> Self {
        let mut builder = SymbolTable::builder(locale);
        for definition in defaults::definitions(locale) {
            builder.register(definition);
        }
        builder
    }

    /// Registers a definition, returning the one it replaces.
    pub fn register(&mut self, definition: GlyphDefinition) -> Option<GlyphDefinition> {
        self.table.definitions.insert(definition.id(), definition)
    }

    /// The definition registered so far for `id`.
    #[must_use]
    pub fn get(&self, id: SymbolId) -> Option<&GlyphDefinition> {
        self.table.definitions.get(&id)
    }

    /// Finishes the table.
    #[must_use]
    pub fn build(self) -> SymbolTable {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn english_full_stop_needs_space_after() {
        let full_stop = SymbolTable::instance(Locale::En)
            .lookup(SymbolId::FullStop)
            .unwrap();
        assert_eq!(full_stop.value(), '.');
        assert!(full_stop.needs_space_after());
        assert!(!full_stop.needs_space_before());
        assert!(full_stop.is_invalid('。'));
    }

    #[test]
    fn english_left_parenthesis_needs_space_before() {
        let paren = SymbolTable::instance(Locale::En)
            .lookup(SymbolId::LeftParenthesis)
            .unwrap();
        assert!(paren.needs_space_before());
        assert!(!paren.needs_space_after());
    }

    #[test]
    fn japanese_uses_full_width_forms() {
        let table = SymbolTable::instance(Locale::Ja);
        let comma = table.lookup(SymbolId::Comma).unwrap();
        assert_eq!(comma.value(), '、');
        assert_eq!(comma.invalid_chars(), &[',']);
        assert!(!comma.needs_space_after());

        let dollar = table.lookup(SymbolId::DollarSign).unwrap();
        assert_eq!(dollar.value(), '$');
        assert!(dollar.is_invalid('＄'));
    }

    // A locale's table replaces the default one: there is no fallback.
    #[test_case(Locale::Ja, SymbolId::LeftDoubleQuotationMark; "english quotes absent from japanese")]
    #[test_case(Locale::Ja, SymbolId::RightSingleQuotationMark; "english apostrophe absent from japanese")]
    #[test_case(Locale::En, SymbolId::DigitZero; "japanese digits absent from english")]
    fn lookups_do_not_fall_back_across_locales(locale: Locale, id: SymbolId) {
        let error = SymbolTable::instance(locale).lookup(id).unwrap_err();
        assert_eq!(
            error,
            LookupError {
                locale,
                symbol: id.to_string()
            }
        );
    }

    #[test]
    fn lookup_by_name() {
        let table = SymbolTable::instance(Locale::En);
        assert_eq!(
            table.lookup_name("question_mark").unwrap().id(),
            SymbolId::QuestionMark
        );
        let error = table.lookup_name("INTERROBANG").unwrap_err();
        assert_eq!(
            error.to_string(),
            "symbol INTERROBANG is not defined for locale 'en'"
        );
    }

    #[test]
    fn find_invalid_glyph() {
        let table = SymbolTable::instance(Locale::Ja);
        assert_eq!(
            table.find_invalid('?').map(GlyphDefinition::id),
            Some(SymbolId::QuestionMark)
        );
        assert!(table.find_invalid('？').is_none());
    }

    #[test]
    fn instance_is_shared() {
        assert!(std::ptr::eq(
            SymbolTable::instance(Locale::Ja),
            SymbolTable::instance(Locale::Ja)
        ));
        assert_eq!(*SymbolTable::instance(Locale::En), SymbolTable::defaults(Locale::En));
    }

    #[test]
    fn builder_registration_replaces() {
        let mut builder = SymbolTableBuilder::with_defaults(Locale::En);
        let previous = builder.register(
            GlyphDefinition::new(SymbolId::Comma, '，').with_space_after(false),
        );
        assert_eq!(previous.map(|d| d.value()), Some(','));

        let table = builder.build();
        assert_eq!(table.lookup(SymbolId::Comma).unwrap().value(), '，');
        assert_eq!(table.len(), SymbolTable::instance(Locale::En).len());
    }

    #[test]
    fn empty_builder_yields_empty_table() {
        let table = SymbolTable::builder(Locale::Ja).build();
        assert!(table.is_empty());
        assert!(!table.contains(SymbolId::Comma));
    }

    #[test]
    fn tables_are_shareable_across_threads() {
        let table = SymbolTable::instance(Locale::Ja);
        let values: Vec<char> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| table.lookup(SymbolId::FullStop).unwrap().value()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(values.iter().all(|&c| c == '。'));
    }

    #[test_case("en", Locale::En; "english")]
    #[test_case("JA", Locale::Ja; "japanese upper case")]
    fn locale_parses(code: &str, expected: Locale) {
        assert_eq!(code.parse::<Locale>(), Ok(expected));
    }

    #[test]
    fn unknown_locale_is_an_error() {
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn symbol_names_round_trip() {
        for id in SymbolId::ALL {
            assert_eq!(id.as_str().parse::<SymbolId>(), Ok(*id));
        }
    }
}
