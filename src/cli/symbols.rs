use clap::Parser;
use proofline::{Config, Locale};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Show the glyph table of a locale")]
pub struct Symbols {
    /// The locale to show (defaults to the configured locale)
    #[arg(long, short)]
    locale: Option<Locale>,
}

impl Symbols {
    #[instrument(level = "debug", skip(config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let mut config = config.clone();
        if let Some(locale) = self.locale {
            config.set_locale(locale);
        }
        let table = config.symbol_table()?;

        println!("Symbols for locale '{}'", table.locale());
        println!("{}", "──────────────────────────".muted());
        println!("{:<30} {:<6} {:<10} Space", "Symbol", "Glyph", "Flagged");
        for definition in table.iter() {
            let flagged: String = definition.invalid_chars().iter().collect();
            let space = match (
                definition.needs_space_before(),
                definition.needs_space_after(),
            ) {
                (true, true) => "both",
                (true, false) => "before",
                (false, true) => "after",
                (false, false) => "",
            };
            println!(
                "{:<30} {:<6} {:<10} {space}",
                definition.id().to_string(),
                definition.value(),
                flagged
            );
        }

        Ok(())
    }
}
