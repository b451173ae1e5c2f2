use std::path::PathBuf;

use clap::Parser;
use proofline::Config;
use tracing::instrument;

use super::{ingest_document, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "List the suppression directives found in a document")]
pub struct Directives {
    /// The markdown document to scan
    document: PathBuf,
}

impl Directives {
    #[instrument(level = "debug", skip(self, config), fields(document = %self.document.display()))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let symbols = config.symbol_table()?;
        let ingested = ingest_document(&self.document, &symbols)?;

        if ingested.directives.is_empty() {
            println!("{}", "No directives found.".muted());
        }
        for directive in &ingested.directives {
            let window = directive.upper_bound().map_or_else(
                || format!("lines {}..", directive.anchor()),
                |bound| format!("lines {}..{bound}", directive.anchor()),
            );
            let parameters = if directive.parameters().is_empty() {
                "all validators".muted()
            } else {
                directive.parameters().join(", ")
            };
            println!("{:<10} {window:<16} {parameters}", directive.kind().to_string());
        }

        for warning in &ingested.warnings {
            println!("{} {warning}", "dropped:".dropped());
        }

        Ok(())
    }
}
