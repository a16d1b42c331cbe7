//! `image-sitemap render <INPUT> [-o OUT]`

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use image_sitemap_core::{InvalidRecord, SitemapDocument};
use image_sitemap_output::{write_sitemap, WriteResult};

use super::{describe, load_records, RenderFlags};

/// Arguments for `image-sitemap render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Record file (YAML, or JSON with a `.json` extension).
    pub input: PathBuf,

    /// Write the sitemap here instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Report what would be written without touching the output file.
    #[arg(long, requires = "output")]
    pub dry_run: bool,

    #[command(flatten)]
    pub flags: RenderFlags,
}

impl RenderArgs {
    pub fn run(self) -> Result<()> {
        let doc = load_records(&self.input)?;
        let renderer = self.flags.renderer()?;
        let header = self.flags.header(&doc);

        let Some(output) = self.output.as_ref() else {
            let report = renderer
                .write_to(header, &doc.nodes, io::stdout().lock())
                .context("failed to render sitemap")?;
            print_skipped(&report.skipped, &doc);
            return Ok(());
        };

        let report = renderer
            .render_report(header, &doc.nodes)
            .context("failed to render sitemap")?;
        let result = write_sitemap(output, &report.xml, self.dry_run)
            .with_context(|| format!("failed to write '{}'", output.display()))?;

        let prefix = if self.dry_run { "[dry-run] " } else { "" };
        let verb = match result {
            WriteResult::Written { .. } => "written",
            WriteResult::WouldWrite { .. } => "would write",
            WriteResult::Unchanged { .. } => "unchanged",
        };
        println!(
            "{prefix}{} {} ({verb}: {} urls, {} images)",
            "✓".green(),
            result.path().display(),
            report.urls,
            report.images,
        );
        print_skipped(&report.skipped, &doc);
        Ok(())
    }
}

/// Skipped records go to stderr so stdout stays pure XML.
fn print_skipped(skipped: &[InvalidRecord], doc: &SitemapDocument) {
    if skipped.is_empty() {
        return;
    }
    eprintln!("{} skipped {} invalid record(s):", "!".yellow(), skipped.len());
    for record in skipped {
        eprintln!("  · {}", describe(record, doc));
    }
}
