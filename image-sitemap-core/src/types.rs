//! Record types consumed by the image sitemap renderer.
//!
//! Records are handed over fully assembled by the host; nothing here queries
//! content storage or builds URLs. All types round-trip through serde so they
//! can be read from YAML or JSON record files.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default namespace of the sitemap `<urlset>` element.
pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Namespace bound to the `image:` prefix.
pub const IMAGE_NS: &str = "http://www.google.com/schemas/sitemap-image/1.1";

/// XML declaration used when a record file does not carry its own.
pub const DEFAULT_XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// An absolute URL as it should appear inside a `<loc>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationUrl(pub String);

impl LocationUrl {
    /// `true` when the URL is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// `true` when the URL can go into a `<loc>` element as-is: not blank,
    /// and every character representable in XML 1.0.
    pub fn is_usable(&self) -> bool {
        !self.is_blank() && self.0.chars().all(is_xml_char)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for LocationUrl {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for LocationUrl {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// XML 1.0 `Char` production.
pub fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One image attached to a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Required. Missing in input deserializes to empty and is caught by validation.
    #[serde(default)]
    pub loc: LocationUrl,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, alias = "license_url", skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

impl ImageRecord {
    /// Image with only its location set.
    pub fn new(loc: impl Into<LocationUrl>) -> Self {
        Self {
            loc: loc.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    /// Title to emit, if any. An empty string counts as absent.
    pub fn title_text(&self) -> Option<&str> {
        present(&self.title)
    }

    /// Caption to emit, if any. An empty string counts as absent.
    pub fn caption_text(&self) -> Option<&str> {
        present(&self.caption)
    }

    /// License URL to emit, if any. An empty string counts as absent.
    pub fn license_text(&self) -> Option<&str> {
        present(&self.license)
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// One page listed in the sitemap together with its images.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(default)]
    pub loc: LocationUrl,
    #[serde(default)]
    pub images: Vec<ImageRecord>,
}

impl NodeRecord {
    pub fn new(loc: impl Into<LocationUrl>) -> Self {
        Self {
            loc: loc.into(),
            images: Vec::new(),
        }
    }

    pub fn with_image(mut self, image: ImageRecord) -> Self {
        self.images.push(image);
        self
    }
}

/// A complete render request: the XML declaration plus the ordered nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitemapDocument {
    #[serde(default = "default_xml_header")]
    pub xml_header: String,
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
}

fn default_xml_header() -> String {
    DEFAULT_XML_HEADER.to_string()
}

impl Default for SitemapDocument {
    fn default() -> Self {
        Self {
            xml_header: default_xml_header(),
            nodes: Vec::new(),
        }
    }
}

impl SitemapDocument {
    /// Total number of image records across all nodes.
    pub fn image_count(&self) -> usize {
        self.nodes.iter().map(|n| n.images.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_display() {
        assert_eq!(LocationUrl::from("https://x.com/a").to_string(), "https://x.com/a");
    }

    #[test]
    fn blank_locations() {
        assert!(LocationUrl::from("").is_blank());
        assert!(LocationUrl::from("  \t").is_blank());
        assert!(!LocationUrl::from("https://x.com").is_blank());
    }

    #[test]
    fn locations_with_non_xml_characters_are_unusable() {
        assert!(LocationUrl::from("https://x.com/a").is_usable());
        assert!(!LocationUrl::from("").is_usable());
        assert!(!LocationUrl::from("\u{1}").is_usable());
        assert!(!LocationUrl::from("\u{FFFE}").is_usable());
        assert!(!LocationUrl::from("https://x.com/\u{0}a").is_usable());
        assert!(!LocationUrl::from("\u{1}").is_blank());
    }

    #[test]
    fn empty_optional_fields_count_as_absent() {
        let img = ImageRecord::new("https://x.com/a.jpg")
            .with_title("")
            .with_caption("A cat");
        assert_eq!(img.title_text(), None);
        assert_eq!(img.caption_text(), Some("A cat"));
        assert_eq!(img.license_text(), None);
    }

    #[test]
    fn license_url_alias_is_accepted() {
        let yaml = "loc: https://x.com/a.jpg\nlicense_url: https://x.com/license\n";
        let img: ImageRecord = serde_yaml::from_str(yaml).expect("deserialize");
        assert_eq!(img.license_text(), Some("https://x.com/license"));
    }

    #[test]
    fn missing_loc_deserializes_to_blank() {
        let img: ImageRecord = serde_yaml::from_str("title: Cat\n").expect("deserialize");
        assert!(img.loc.is_blank());
    }

    #[test]
    fn document_defaults_header() {
        let doc: SitemapDocument = serde_yaml::from_str("nodes: []\n").expect("deserialize");
        assert_eq!(doc.xml_header, DEFAULT_XML_HEADER);
        assert!(doc.nodes.is_empty());
    }

    #[test]
    fn document_serde_roundtrip() {
        let doc = SitemapDocument {
            xml_header: r#"<?xml version="1.0"?>"#.to_string(),
            nodes: vec![NodeRecord::new("https://x.com/a")
                .with_image(ImageRecord::new("https://x.com/a.jpg").with_title("Cat"))],
        };
        let yaml = serde_yaml::to_string(&doc).expect("serialize");
        let back: SitemapDocument = serde_yaml::from_str(&yaml).expect("deserialize");
        assert_eq!(doc, back);
        assert_eq!(back.image_count(), 1);
    }
}
