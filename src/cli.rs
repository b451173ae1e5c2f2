use std::path::{Path, PathBuf};

mod directives;
mod filter;
mod symbols;
mod terminal;

use anyhow::Context;
use clap::ArgAction;
use directives::Directives;
use filter::Filter;
use proofline::{
    Config, SymbolTable,
    ingest::{self, Ingested},
};
use symbols::Symbols;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the configuration file
    ///
    /// Built-in defaults are used if the file does not exist.
    #[arg(short, long, default_value = "proofline.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = load_config(&self.config)?;
        self.command.run(&config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Drop the diagnostics that the document's directives suppress
    ///
    /// Exits with status 1 if any diagnostic survives.
    Filter(Filter),

    /// List the suppression directives found in a document
    Directives(Directives),

    /// Show the glyph table of a locale
    Symbols(Symbols),
}

impl Command {
    fn run(self, config: &Config) -> anyhow::Result<()> {
        match self {
            Self::Filter(command) => command.run(config)?,
            Self::Directives(command) => command.run(config)?,
            Self::Symbols(command) => command.run(config)?,
        }
        Ok(())
    }
}

/// Loads the configuration file, falling back to the defaults if it does not
/// exist.
fn load_config(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        tracing::debug!("no config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    Config::load(path).with_context(|| format!("failed to load {}", path.display()))
}

/// Reads a document with the glyph table of the configured locale.
fn ingest_document(path: &Path, symbols: &SymbolTable) -> anyhow::Result<Ingested> {
    ingest::read_path(path, symbols).with_context(|| format!("failed to ingest {}", path.display()))
}
