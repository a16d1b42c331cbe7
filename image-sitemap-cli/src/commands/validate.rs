//! `image-sitemap validate <INPUT> [--json]`

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use image_sitemap_core::{validate::validate, InvalidRecord};

use super::{describe, load_records};

/// Arguments for `image-sitemap validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Record file (YAML, or JSON with a `.json` extension).
    pub input: PathBuf,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ValidationJson<'a> {
    urls: usize,
    images: usize,
    invalid: &'a [InvalidRecord],
}

impl ValidateArgs {
    pub fn run(self) -> Result<()> {
        let doc = load_records(&self.input)?;
        let invalid = validate(&doc.nodes);

        if self.json {
            let payload = ValidationJson {
                urls: doc.nodes.len(),
                images: doc.image_count(),
                invalid: &invalid,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize validation JSON")?
            );
        } else if invalid.is_empty() {
            println!(
                "{} {} ({} urls, {} images)",
                "✓".green(),
                self.input.display(),
                doc.nodes.len(),
                doc.image_count()
            );
        } else {
            println!("{} {}", "✗".red(), self.input.display());
            for record in &invalid {
                println!("  · {}", describe(record, &doc));
            }
        }

        if !invalid.is_empty() {
            bail!("{} invalid record(s) in '{}'", invalid.len(), self.input.display());
        }
        Ok(())
    }
}
