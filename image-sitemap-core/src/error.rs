//! Error types for image-sitemap-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::validate::InvalidRecord;

/// All errors that can arise from loading and checking sitemap records.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// Record file could not be read.
    #[error("failed to read records at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load; includes file path and line context from serde_yaml.
    #[error("failed to parse records at {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// JSON parse error on load.
    #[error("failed to parse records at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A node or image record is missing its required location URL.
    #[error(transparent)]
    InvalidRecord(#[from] InvalidRecord),
}
