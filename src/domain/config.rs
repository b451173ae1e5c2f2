use std::{collections::BTreeMap, io, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    diagnostic::SCRIPT_VALIDATOR,
    symbol::{GlyphDefinition, Locale, SymbolId, SymbolTable, SymbolTableBuilder},
};

/// Configuration for linting a document.
///
/// Controls which locale's glyph table is used, how individual symbols
/// deviate from the locale defaults, and which validator multiplexes named
/// sub-checks through its messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The writing locale of the documents.
    locale: Locale,

    /// Per-symbol changes to the locale's built-in glyph table.
    symbols: BTreeMap<SymbolId, SymbolOverride>,

    /// Identifier of the scripting validator whose messages start with
    /// `[<name>.<ext>]`.
    script_validator: String,
}

/// Changes to one symbol's glyph definition.
///
/// Unset fields keep the locale's built-in value. A symbol the locale does
/// not define must set `value`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolOverride {
    /// The accepted glyph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<char>,
    /// Glyphs to flag in place of the accepted one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_chars: Option<String>,
    /// Whether whitespace is required before the glyph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_space: Option<bool>,
    /// Whether whitespace is required after the glyph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_space: Option<bool>,
}

impl SymbolOverride {
    fn apply(&self, id: SymbolId, base: Option<&GlyphDefinition>) -> Option<GlyphDefinition> {
        let value = self.value.or_else(|| base.map(GlyphDefinition::value))?;
        let invalid = self.invalid_chars.clone().unwrap_or_else(|| {
            base.map(|b| b.invalid_chars().iter().collect())
                .unwrap_or_default()
        });
        let before = self
            .before_space
            .or_else(|| base.map(GlyphDefinition::needs_space_before))
            .unwrap_or_default();
        let after = self
            .after_space
            .or_else(|| base.map(GlyphDefinition::needs_space_after))
            .unwrap_or_default();

        Some(
            GlyphDefinition::new(id, value)
                .with_invalid_chars(&invalid)
                .with_space_before(before)
                .with_space_after(after),
        )
    }
}

/// Errors that can occur when loading, saving or applying a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Read(#[source] io::Error),

    /// The configuration file is not valid.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The configuration file could not be written.
    #[error("failed to write config file: {0}")]
    Write(#[source] io::Error),

    /// An override introduces a symbol without giving its glyph.
    #[error("symbol {symbol} is not defined for locale '{locale}' and its override sets no value")]
    IncompleteSymbol {
        /// The configured locale.
        locale: Locale,
        /// The symbol being overridden.
        symbol: SymbolId,
    },
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            symbols: BTreeMap::new(),
            script_validator: default_script_validator(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        Ok(toml::from_str(&content)?)
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(ConfigError::Write)
    }

    /// Returns the configured locale.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Sets the locale.
    pub const fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    /// Returns the identifier of the scripting validator.
    #[must_use]
    pub fn script_validator(&self) -> &str {
        &self.script_validator
    }

    /// Returns the configured symbol overrides.
    #[must_use]
    pub const fn symbols(&self) -> &BTreeMap<SymbolId, SymbolOverride> {
        &self.symbols
    }

    /// Overrides the definition of a symbol.
    ///
    /// Returns the override it replaces, if any.
    pub fn set_symbol(&mut self, id: SymbolId, symbol: SymbolOverride) -> Option<SymbolOverride> {
        self.symbols.insert(id, symbol)
    }

    /// Builds the glyph table of the configured locale with every override
    /// applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IncompleteSymbol`] if an override adds a symbol
    /// the locale does not define without giving its glyph.
    pub fn symbol_table(&self) -> Result<SymbolTable, ConfigError> {
        let mut builder = SymbolTableBuilder::with_defaults(self.locale);
        for (&id, symbol) in &self.symbols {
            let definition =
                symbol
                    .apply(id, builder.get(id))
                    .ok_or(ConfigError::IncompleteSymbol {
                        locale: self.locale,
                        symbol: id,
                    })?;
            builder.register(definition);
        }
        Ok(builder.build())
    }
}

fn default_script_validator() -> String {
    SCRIPT_VALIDATOR.to_string()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        locale: Locale,

        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        symbols: BTreeMap<SymbolId, SymbolOverride>,

        #[serde(default = "default_script_validator")]
        script_validator: String,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                locale,
                symbols,
                script_validator,
            } => Self {
                locale,
                symbols,
                script_validator,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            locale: config.locale,
            symbols: config.symbols,
            script_validator: config.script_validator,
        }
    }
}
