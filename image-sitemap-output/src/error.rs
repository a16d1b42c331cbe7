//! Error types for image-sitemap-output.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while delivering a rendered sitemap.
#[derive(Debug, Error)]
pub enum OutputError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`OutputError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> OutputError {
    OutputError::Io {
        path: path.into(),
        source,
    }
}
