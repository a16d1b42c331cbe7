//! Template context: serializable rendering payload built from validated records.

use serde::{Deserialize, Serialize};

use image_sitemap_core::{ImageRecord, NodeRecord};

use crate::error::RenderError;

/// Payload for `sitemap.xml.tera`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitemapContext {
    /// Emitted verbatim before `<urlset>`; trailing whitespace is trimmed.
    pub xml_header: String,
    pub nodes: Vec<NodeCtx>,
}

/// Payload for `partials/node.xml.tera`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeCtx {
    pub loc: String,
    pub images: Vec<ImageCtx>,
}

/// Payload for `partials/image.xml.tera`.
///
/// Optional fields are `None` whenever the record field is absent or empty,
/// so templates only need a truthiness check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageCtx {
    pub loc: String,
    pub title: Option<String>,
    pub caption: Option<String>,
    pub license: Option<String>,
}

impl From<&ImageRecord> for ImageCtx {
    fn from(image: &ImageRecord) -> Self {
        ImageCtx {
            loc: image.loc.0.clone(),
            title: image.title_text().map(str::to_owned),
            caption: image.caption_text().map(str::to_owned),
            license: image.license_text().map(str::to_owned),
        }
    }
}

impl From<&NodeRecord> for NodeCtx {
    fn from(node: &NodeRecord) -> Self {
        NodeCtx {
            loc: node.loc.0.clone(),
            images: node.images.iter().map(ImageCtx::from).collect(),
        }
    }
}

impl NodeCtx {
    /// Context for rendering this node on its own (streaming).
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        let mut ctx = tera::Context::new();
        ctx.try_insert("node", self)?;
        Ok(ctx)
    }
}

impl SitemapContext {
    /// Build a [`SitemapContext`] from records that already passed validation.
    pub fn new<'a, I>(xml_header: &str, nodes: I) -> Self
    where
        I: IntoIterator<Item = &'a NodeRecord>,
    {
        SitemapContext {
            xml_header: xml_header.trim_end().to_string(),
            nodes: nodes.into_iter().map(NodeCtx::from).collect(),
        }
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }

    /// Context carrying only the header, for the opening chunk.
    pub fn header_context(xml_header: &str) -> tera::Context {
        let mut ctx = tera::Context::new();
        ctx.insert("xml_header", xml_header.trim_end());
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> NodeRecord {
        NodeRecord::new("https://x.com/a")
            .with_image(
                ImageRecord::new("https://x.com/a.jpg")
                    .with_title("Cat")
                    .with_caption(""),
            )
            .with_image(ImageRecord::new("https://x.com/b.jpg").with_license("https://x.com/l"))
    }

    #[test]
    fn empty_fields_become_none() {
        let ctx = NodeCtx::from(&node());
        assert_eq!(ctx.images[0].title.as_deref(), Some("Cat"));
        assert!(ctx.images[0].caption.is_none());
        assert!(ctx.images[0].license.is_none());
        assert_eq!(ctx.images[1].license.as_deref(), Some("https://x.com/l"));
    }

    #[test]
    fn header_trailing_newline_trimmed() {
        let n = node();
        let ctx = SitemapContext::new("<?xml version=\"1.0\"?>\n", [&n]);
        assert_eq!(ctx.xml_header, "<?xml version=\"1.0\"?>");
        assert_eq!(ctx.nodes.len(), 1);
        assert_eq!(ctx.nodes[0].images.len(), 2);
    }

    #[test]
    fn to_tera_context_succeeds() {
        let n = node();
        let ctx = SitemapContext::new("", [&n]);
        ctx.to_tera_context().expect("context conversion");
        NodeCtx::from(&n).to_tera_context().expect("node context conversion");
    }
}
