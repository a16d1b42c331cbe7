//! `image-sitemap diff <INPUT> <SITEMAP>`: show what `render -o` would change.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use image_sitemap_output::diff_sitemap;

use super::{load_records, RenderFlags};

/// Arguments for `image-sitemap diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Record file (YAML, or JSON with a `.json` extension).
    pub input: PathBuf,

    /// Sitemap file currently on disk.
    pub sitemap: PathBuf,

    #[command(flatten)]
    pub flags: RenderFlags,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let doc = load_records(&self.input)?;
        let rendered = self
            .flags
            .renderer()?
            .render(self.flags.header(&doc), &doc.nodes)
            .context("failed to render sitemap")?;

        let diff = diff_sitemap(&self.sitemap, &rendered)
            .with_context(|| format!("diff failed for '{}'", self.sitemap.display()))?;

        match diff {
            None => println!("No differences for '{}'.", self.sitemap.display()),
            Some(unified) => {
                print!("{unified}");
                if !unified.ends_with('\n') {
                    println!();
                }
            }
        }
        Ok(())
    }
}
