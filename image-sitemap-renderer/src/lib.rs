//! # image-sitemap-renderer
//!
//! Tera-based renderer that turns [`NodeRecord`](image_sitemap_core::NodeRecord)s
//! into a Google image sitemap:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
//!         xmlns:image="http://www.google.com/schemas/sitemap-image/1.1">
//!   <url>
//!     <loc>https://example.com/gallery</loc>
//!     <image:image><image:loc>https://example.com/cat.jpg</image:loc><image:title>Cat</image:title></image:image>
//!   </url>
//! </urlset>
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use image_sitemap_core::{ImageRecord, NodeRecord, DEFAULT_XML_HEADER};
//! use image_sitemap_renderer::Renderer;
//!
//! fn sitemap() -> Result<String, image_sitemap_renderer::RenderError> {
//!     let nodes = vec![NodeRecord::new("https://example.com/gallery")
//!         .with_image(ImageRecord::new("https://example.com/cat.jpg").with_title("Cat"))];
//!     Renderer::new()?.render(DEFAULT_XML_HEADER, &nodes)
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod escape;
pub mod stream;

pub use context::SitemapContext;
pub use engine::{RenderOptions, RenderReport, Renderer, TemplateEngine};
pub use error::RenderError;
pub use stream::SitemapChunks;
