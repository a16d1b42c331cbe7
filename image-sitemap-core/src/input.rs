//! Record files handed over by the host.
//!
//! The host system collects pages and images, resolves their URLs, and dumps
//! the result as a [`SitemapDocument`] in YAML or JSON:
//!
//! ```yaml
//! xml_header: '<?xml version="1.0" encoding="UTF-8"?>'   # optional
//! nodes:
//!   - loc: https://example.com/gallery
//!     images:
//!       - loc: https://example.com/cat.jpg
//!         title: Cat
//!         license_url: https://example.com/license
//! ```
//!
//! `.json` files go through serde_json; everything else through serde_yaml.

use std::path::Path;

use crate::error::SitemapError;
use crate::types::SitemapDocument;

/// Load a record file from disk, picking the parser from the file extension.
pub fn load(path: &Path) -> Result<SitemapDocument, SitemapError> {
    let contents = std::fs::read_to_string(path).map_err(|source| SitemapError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let doc = if is_json(path) {
        serde_json::from_str(&contents).map_err(|source| SitemapError::Json {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_yaml::from_str(&contents).map_err(|source| SitemapError::Yaml {
            path: path.to_path_buf(),
            source,
        })?
    };

    tracing::debug!(path = %path.display(), "loaded sitemap records");
    Ok(doc)
}

/// Parse an in-memory YAML document.
pub fn parse_yaml(contents: &str) -> Result<SitemapDocument, serde_yaml::Error> {
    serde_yaml::from_str(contents)
}

/// Parse an in-memory JSON document.
pub fn parse_json(contents: &str) -> Result<SitemapDocument, serde_json::Error> {
    serde_json::from_str(contents)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn json_detection_is_case_insensitive() {
        assert!(is_json(&PathBuf::from("records.JSON")));
        assert!(is_json(&PathBuf::from("records.json")));
        assert!(!is_json(&PathBuf::from("records.yaml")));
        assert!(!is_json(&PathBuf::from("records")));
    }

    #[test]
    fn parse_yaml_keeps_node_and_image_order() {
        let doc = parse_yaml(
            "nodes:\n  - loc: https://x.com/b\n    images:\n      - loc: https://x.com/2.jpg\n      - loc: https://x.com/1.jpg\n  - loc: https://x.com/a\n",
        )
        .expect("parse");
        assert_eq!(doc.nodes[0].loc.as_str(), "https://x.com/b");
        assert_eq!(doc.nodes[0].images[0].loc.as_str(), "https://x.com/2.jpg");
        assert_eq!(doc.nodes[1].loc.as_str(), "https://x.com/a");
        assert!(doc.nodes[1].images.is_empty());
    }

    #[test]
    fn parse_json_document() {
        let doc = parse_json(
            r#"{"xml_header":"<?xml version=\"1.0\"?>","nodes":[{"loc":"https://x.com/a","images":[{"loc":"https://x.com/a.jpg","caption":"c"}]}]}"#,
        )
        .expect("parse");
        assert_eq!(doc.xml_header, r#"<?xml version="1.0"?>"#);
        assert_eq!(doc.nodes[0].images[0].caption_text(), Some("c"));
    }
}
