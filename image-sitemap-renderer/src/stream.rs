//! Chunked rendering for sitemaps too large to hold as one string.

use std::borrow::Cow;

use image_sitemap_core::{Accepted, InvalidRecord, NodeRecord};

use crate::context::NodeCtx;
use crate::engine::TemplateEngine;
use crate::error::RenderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Open,
    Nodes,
    Done,
}

/// Iterator over rendered sitemap chunks, produced by [`crate::Renderer::chunks`].
///
/// Yields the header with the opening `<urlset>`, then one `<url>` entry per
/// node, then `</urlset>`. Concatenating every chunk gives exactly the output
/// of [`crate::Renderer::render`]. The iterator stops after the first error.
pub struct SitemapChunks<'r, 'a> {
    engine: &'r TemplateEngine,
    xml_header: String,
    nodes: std::vec::IntoIter<Cow<'a, NodeRecord>>,
    stage: Stage,
    urls: usize,
    images: usize,
    skipped: Vec<InvalidRecord>,
}

impl<'r, 'a> SitemapChunks<'r, 'a> {
    pub(crate) fn new(engine: &'r TemplateEngine, xml_header: &str, accepted: Accepted<'a>) -> Self {
        let urls = accepted.nodes.len();
        let images = accepted.image_count();
        SitemapChunks {
            engine,
            xml_header: xml_header.to_string(),
            nodes: accepted.nodes.into_iter(),
            stage: Stage::Open,
            urls,
            images,
            skipped: accepted.skipped,
        }
    }

    /// Number of `<url>` entries this iterator emits in total.
    pub fn url_count(&self) -> usize {
        self.urls
    }

    /// Number of `<image:image>` entries this iterator emits in total.
    pub fn image_count(&self) -> usize {
        self.images
    }

    /// Records dropped before streaming began.
    pub fn skipped(&self) -> &[InvalidRecord] {
        &self.skipped
    }

    pub fn into_skipped(self) -> Vec<InvalidRecord> {
        self.skipped
    }

    fn next_chunk(&mut self) -> Option<Result<String, RenderError>> {
        match self.stage {
            Stage::Open => {
                self.stage = Stage::Nodes;
                Some(self.engine.render_open(&self.xml_header))
            }
            Stage::Nodes => match self.nodes.next() {
                Some(node) => Some(self.engine.render_node(&NodeCtx::from(&*node))),
                None => {
                    self.stage = Stage::Done;
                    Some(self.engine.render_close())
                }
            },
            Stage::Done => None,
        }
    }
}

impl Iterator for SitemapChunks<'_, '_> {
    type Item = Result<String, RenderError>;

    fn next(&mut self) -> Option<Self::Item> {
        let chunk = self.next_chunk()?;
        if chunk.is_err() {
            self.stage = Stage::Done;
        }
        Some(chunk)
    }
}

impl std::iter::FusedIterator for SitemapChunks<'_, '_> {}
