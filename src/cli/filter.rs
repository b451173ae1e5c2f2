use std::{path::PathBuf, process};

use anyhow::Context;
use clap::Parser;
use proofline::{Config, Diagnostic, Partition, Suppressor};
use tracing::instrument;

use super::{ingest_document, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Drop the diagnostics that the document's directives suppress")]
pub struct Filter {
    /// The markdown document the diagnostics were reported against
    document: PathBuf,

    /// A JSON file holding an array of diagnostics
    #[arg(long, short, value_name = "JSON")]
    diagnostics: PathBuf,

    /// Output format (text, json)
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    output: OutputFormat,

    /// Also report the diagnostics that were suppressed
    #[arg(long)]
    show_suppressed: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Filter {
    #[instrument(level = "debug", skip(self, config), fields(document = %self.document.display()))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let symbols = config.symbol_table()?;
        let ingested = ingest_document(&self.document, &symbols)?;
        let diagnostics = self.read_diagnostics()?;

        let partition = Suppressor::new(&ingested.document, &ingested.directives)
            .with_script_validator(config.script_validator())
            .partition(diagnostics);

        match self.output {
            OutputFormat::Json => self.output_json(&partition)?,
            OutputFormat::Text => self.output_text(&partition),
        }

        if !partition.retained.is_empty() {
            process::exit(1);
        }
        Ok(())
    }

    fn read_diagnostics(&self) -> anyhow::Result<Vec<Diagnostic>> {
        let path = &self.diagnostics;
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse diagnostics in {}", path.display()))
    }

    fn output_json(&self, partition: &Partition) -> anyhow::Result<()> {
        use serde_json::json;

        let output = if self.show_suppressed {
            json!({
                "retained": partition.retained,
                "suppressed": partition.suppressed,
            })
        } else {
            json!(partition.retained)
        };

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_text(&self, partition: &Partition) {
        let document = self.document.display();

        for diagnostic in &partition.retained {
            println!(
                "{document}:{} [{}] {}",
                diagnostic.line(),
                diagnostic.validator().finding(),
                diagnostic.message()
            );
        }

        if self.show_suppressed {
            for diagnostic in &partition.suppressed {
                println!("{}", format!("{document}:{diagnostic} (suppressed)").suppressed());
            }
        }

        let summary = format!(
            "{} diagnostics, {} suppressed",
            partition.retained.len(),
            partition.suppressed.len()
        );
        if partition.retained.is_empty() {
            println!("{}", summary.clean());
        } else {
            println!("{}", summary.muted());
        }
    }
}
