//! Image sitemap core library: record types, validation, and record file loading.
//!
//! Public API surface:
//! - [`types`]: [`NodeRecord`], [`ImageRecord`], [`SitemapDocument`]
//! - [`validate`]: [`InvalidRecord`] and the [`RecordPolicy`] applied before rendering
//! - [`input`]: load record files (YAML / JSON) handed over by the host
//! - [`error`]: [`SitemapError`]

pub mod error;
pub mod input;
pub mod types;
pub mod validate;

pub use error::SitemapError;
pub use types::{
    is_xml_char, ImageRecord, LocationUrl, NodeRecord, SitemapDocument, DEFAULT_XML_HEADER,
    IMAGE_NS, SITEMAP_NS,
};
pub use validate::{Accepted, InvalidRecord, RecordPolicy};
