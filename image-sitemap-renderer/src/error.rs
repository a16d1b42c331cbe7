//! Error types for image-sitemap-renderer.

use std::path::PathBuf;

use thiserror::Error;

use image_sitemap_core::InvalidRecord;

/// All errors that can arise from rendering a sitemap.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera template engine error.
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// JSON serialization error (building tera context).
    #[error("context serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error while loading user templates.
    #[error("template io error at {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    /// A record was rejected before rendering.
    #[error(transparent)]
    InvalidRecord(#[from] InvalidRecord),

    /// Streaming output to a writer failed.
    #[error("failed to write sitemap output: {0}")]
    Write(#[source] std::io::Error),
}
