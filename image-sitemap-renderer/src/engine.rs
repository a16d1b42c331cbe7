//! Tera rendering engine: [`TemplateEngine`] and [`Renderer`].
//!
//! # Template layout
//!
//! | Template                          | Renders                                   |
//! |-----------------------------------|-------------------------------------------|
//! | `sitemap.xml.tera`                | whole document                            |
//! | `partials/urlset_open.xml.tera`   | header + `<urlset>` with both namespaces  |
//! | `partials/node.xml.tera`          | one `<url>` entry                         |
//! | `partials/image.xml.tera`         | one `<image:image>` entry                 |
//! | `partials/urlset_close.xml.tera`  | `</urlset>`                               |
//!
//! The document template is nothing but the open partial, the node loop and
//! the close partial, so streamed chunks concatenate to the same bytes.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use tera::Tera;

use image_sitemap_core::{InvalidRecord, NodeRecord, RecordPolicy, SitemapDocument};

use crate::context::{NodeCtx, SitemapContext};
use crate::error::RenderError;
use crate::escape::escape_xml;
use crate::stream::SitemapChunks;

// ---------------------------------------------------------------------------
// Embedded templates, baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

pub(crate) const SITEMAP_TPL: &str = "sitemap.xml.tera";
pub(crate) const OPEN_TPL: &str = "partials/urlset_open.xml.tera";
pub(crate) const NODE_TPL: &str = "partials/node.xml.tera";
pub(crate) const IMAGE_TPL: &str = "partials/image.xml.tera";
pub(crate) const CLOSE_TPL: &str = "partials/urlset_close.xml.tera";

const TPLS: &[(&str, &str)] = &[
    (SITEMAP_TPL, include_str!("templates/sitemap.xml.tera")),
    (OPEN_TPL, include_str!("templates/partials/urlset_open.xml.tera")),
    (NODE_TPL, include_str!("templates/partials/node.xml.tera")),
    (IMAGE_TPL, include_str!("templates/partials/image.xml.tera")),
    (CLOSE_TPL, include_str!("templates/partials/urlset_close.xml.tera")),
];

/// Autoescape applies to every template whose name ends with this suffix.
const XML_SUFFIX: &str = ".xml.tera";

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}

fn normalize_template_name(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "/")
        .to_lowercase()
}

fn collect_template_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), RenderError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_template_files(&path, out)?;
        } else if meta.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

fn load_user_templates(dir: &Path) -> Result<Vec<(String, String)>, RenderError> {
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut files = Vec::new();
    collect_template_files(dir, &mut files)?;
    let mut templates = Vec::new();
    for path in files {
        if path.extension().and_then(|s| s.to_str()) != Some("tera") {
            continue;
        }
        let rel = path.strip_prefix(dir).unwrap_or(path.as_path());
        let name = normalize_template_name(rel);
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        tracing::debug!(template = %name, path = %path.display(), "loaded template override");
        templates.push((name, contents));
    }
    Ok(templates)
}

fn build_tera(user_template_dir: Option<&Path>) -> Result<Tera, RenderError> {
    let mut templates: HashMap<String, String> = HashMap::new();
    for (name, content) in TPLS {
        templates.insert(
            normalize_template_name(Path::new(name)),
            (*content).to_string(),
        );
    }
    if let Some(dir) = user_template_dir {
        for (name, content) in load_user_templates(dir)? {
            templates.insert(name, content);
        }
    }

    let mut tera = Tera::default();
    tera.autoescape_on(vec![XML_SUFFIX]);
    tera.set_escape_fn(escape_xml);
    let items: Vec<(String, String)> = templates.into_iter().collect();
    tera.add_raw_templates(items)?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera-based engine for the sitemap templates with optional user overrides.
///
/// `user_template_dir` may contain `.tera` files that override embedded defaults,
/// e.g. `partials/image.xml.tera`. Template names are normalised to lowercase
/// and relative paths.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Construct a new [`TemplateEngine`], loading embedded templates plus any
    /// overrides found in `user_template_dir`.
    pub fn new(user_template_dir: Option<&Path>) -> Result<Self, RenderError> {
        let tera = build_tera(user_template_dir)?;
        Ok(TemplateEngine { tera })
    }

    /// Render the complete document.
    pub fn render_sitemap(&self, ctx: &SitemapContext) -> Result<String, RenderError> {
        let tera_ctx = ctx.to_tera_context()?;
        Ok(self.tera.render(SITEMAP_TPL, &tera_ctx)?)
    }

    /// Render the header and the opening `<urlset>` tag.
    pub fn render_open(&self, xml_header: &str) -> Result<String, RenderError> {
        let tera_ctx = SitemapContext::header_context(xml_header);
        Ok(self.tera.render(OPEN_TPL, &tera_ctx)?)
    }

    /// Render a single `<url>` entry.
    pub fn render_node(&self, node: &NodeCtx) -> Result<String, RenderError> {
        let tera_ctx = node.to_tera_context()?;
        Ok(self.tera.render(NODE_TPL, &tera_ctx)?)
    }

    /// Render the closing `</urlset>` tag.
    pub fn render_close(&self) -> Result<String, RenderError> {
        Ok(self.tera.render(CLOSE_TPL, &tera::Context::new())?)
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Renderer configuration.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// What to do with nodes or images that lack a location URL.
    pub policy: RecordPolicy,
    /// Directory of `.tera` overrides for the embedded templates.
    pub template_dir: Option<PathBuf>,
}

/// Result of a render call with bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Rendered document. Empty when output was streamed to a writer.
    pub xml: String,
    /// Number of `<url>` entries emitted.
    pub urls: usize,
    /// Number of `<image:image>` entries emitted.
    pub images: usize,
    /// Records dropped under [`RecordPolicy::Skip`].
    pub skipped: Vec<InvalidRecord>,
}

/// Sitemap renderer. Create once and reuse; rendering itself is stateless.
pub struct Renderer {
    engine: TemplateEngine,
    policy: RecordPolicy,
}

impl Renderer {
    /// Construct a new [`Renderer`] with embedded templates and the
    /// [`RecordPolicy::Reject`] policy.
    pub fn new() -> Result<Self, RenderError> {
        Self::with_options(RenderOptions::default())
    }

    pub fn with_options(options: RenderOptions) -> Result<Self, RenderError> {
        Ok(Renderer {
            engine: TemplateEngine::new(options.template_dir.as_deref())?,
            policy: options.policy,
        })
    }

    /// Render `nodes` into a complete image sitemap, `xml_header` first.
    pub fn render(&self, xml_header: &str, nodes: &[NodeRecord]) -> Result<String, RenderError> {
        Ok(self.render_report(xml_header, nodes)?.xml)
    }

    /// Render a [`SitemapDocument`] using its own header.
    pub fn render_document(&self, doc: &SitemapDocument) -> Result<String, RenderError> {
        self.render(&doc.xml_header, &doc.nodes)
    }

    /// Like [`Renderer::render`], also returning counts and skipped records.
    pub fn render_report(
        &self,
        xml_header: &str,
        nodes: &[NodeRecord],
    ) -> Result<RenderReport, RenderError> {
        let accepted = self.policy.apply(nodes)?;
        let ctx = SitemapContext::new(xml_header, accepted.iter());
        let xml = self.engine.render_sitemap(&ctx)?;

        let report = RenderReport {
            xml,
            urls: accepted.nodes.len(),
            images: accepted.image_count(),
            skipped: accepted.skipped,
        };
        tracing::debug!(
            urls = report.urls,
            images = report.images,
            skipped = report.skipped.len(),
            bytes = report.xml.len(),
            "rendered image sitemap"
        );
        Ok(report)
    }

    /// Lazily render the sitemap one chunk at a time: the opening tag, one
    /// chunk per node, then the closing tag.
    ///
    /// Records are checked against the policy before the first chunk.
    pub fn chunks<'r, 'a>(
        &'r self,
        xml_header: &str,
        nodes: &'a [NodeRecord],
    ) -> Result<SitemapChunks<'r, 'a>, RenderError> {
        let accepted = self.policy.apply(nodes)?;
        Ok(SitemapChunks::new(&self.engine, xml_header, accepted))
    }

    /// Stream the sitemap into `out` chunk by chunk.
    ///
    /// The returned report has an empty `xml`.
    pub fn write_to<W: Write>(
        &self,
        xml_header: &str,
        nodes: &[NodeRecord],
        mut out: W,
    ) -> Result<RenderReport, RenderError> {
        let mut chunks = self.chunks(xml_header, nodes)?;
        let urls = chunks.url_count();
        let images = chunks.image_count();
        for chunk in chunks.by_ref() {
            out.write_all(chunk?.as_bytes()).map_err(RenderError::Write)?;
        }
        out.flush().map_err(RenderError::Write)?;

        Ok(RenderReport {
            xml: String::new(),
            urls,
            images,
            skipped: chunks.into_skipped(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use image_sitemap_core::ImageRecord;

    const HEADER: &str = r#"<?xml version="1.0"?>"#;

    fn nodes() -> Vec<NodeRecord> {
        vec![
            NodeRecord::new("https://x.com/a")
                .with_image(ImageRecord::new("https://x.com/a.jpg").with_title("Cat")),
            NodeRecord::new("https://x.com/b"),
        ]
    }

    #[test]
    fn renderer_new_succeeds() {
        Renderer::new().expect("Renderer::new should succeed with embedded templates");
    }

    #[test]
    fn embedded_template_names_are_normalised() {
        for (name, _) in TPLS {
            assert_eq!(normalize_template_name(Path::new(name)), *name);
            assert!(name.ends_with(XML_SUFFIX), "{name} must be autoescaped");
        }
    }

    #[test]
    fn header_comes_first() {
        let out = Renderer::new().unwrap().render(HEADER, &nodes()).unwrap();
        assert!(out.starts_with(HEADER));
    }

    #[test]
    fn urls_are_not_html_escaped() {
        let out = Renderer::new().unwrap().render(HEADER, &nodes()).unwrap();
        assert!(out.contains("<loc>https://x.com/a</loc>"));
        assert!(!out.contains("&#x2F;"));
    }

    #[test]
    fn report_counts_match_input() {
        let report = Renderer::new().unwrap().render_report(HEADER, &nodes()).unwrap();
        assert_eq!(report.urls, 2);
        assert_eq!(report.images, 1);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn render_document_uses_document_header() {
        let doc = SitemapDocument {
            xml_header: "<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>".to_string(),
            nodes: nodes(),
        };
        let out = Renderer::new().unwrap().render_document(&doc).unwrap();
        assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>"));
    }

    #[test]
    fn write_to_matches_render() {
        let renderer = Renderer::new().unwrap();
        let mut buf = Vec::new();
        let report = renderer.write_to(HEADER, &nodes(), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), renderer.render(HEADER, &nodes()).unwrap());
        assert_eq!(report.urls, 2);
        assert_eq!(report.images, 1);
        assert!(report.xml.is_empty());
    }

    #[test]
    fn no_crlf_in_rendered_output() {
        let out = Renderer::new().unwrap().render(HEADER, &nodes()).unwrap();
        assert!(!out.contains('\r'));
    }
}
