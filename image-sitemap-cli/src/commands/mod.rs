pub mod diff;
pub mod render;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use image_sitemap_core::{input, InvalidRecord, RecordPolicy, SitemapDocument};
use image_sitemap_renderer::{RenderOptions, Renderer};

/// Rendering flags shared by `render` and `diff`.
#[derive(Args, Debug)]
pub struct RenderFlags {
    /// XML declaration to emit before `<urlset>`; overrides the record file's `xml_header`.
    #[arg(long, value_name = "STR")]
    pub header: Option<String>,

    /// What to do with records lacking a location URL: reject | skip.
    #[arg(long, value_name = "POLICY", default_value_t = RecordPolicy::Reject)]
    pub policy: RecordPolicy,

    /// Directory of `.tera` files overriding the built-in templates.
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,
}

impl RenderFlags {
    pub fn renderer(&self) -> Result<Renderer> {
        tracing::debug!(policy = %self.policy, templates = ?self.templates, "building renderer");
        Renderer::with_options(RenderOptions {
            policy: self.policy,
            template_dir: self.templates.clone(),
        })
        .context("failed to load sitemap templates")
    }

    /// Header from the command line, falling back to the record file.
    pub fn header<'a>(&'a self, doc: &'a SitemapDocument) -> &'a str {
        self.header.as_deref().unwrap_or(&doc.xml_header)
    }
}

pub fn load_records(path: &Path) -> Result<SitemapDocument> {
    input::load(path).with_context(|| format!("cannot load records from '{}'", path.display()))
}

pub fn describe(record: &InvalidRecord, doc: &SitemapDocument) -> String {
    match *record {
        InvalidRecord::Node { index } => format!("node #{index}: missing <loc>"),
        InvalidRecord::Image { node, index } => {
            let page = doc
                .nodes
                .get(node)
                .map(|n| n.loc.as_str())
                .filter(|loc| !loc.trim().is_empty())
                .unwrap_or("?");
            format!("node #{node} ({page}) image #{index}: missing <image:loc>")
        }
    }
}
