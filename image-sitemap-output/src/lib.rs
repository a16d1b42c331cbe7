//! # image-sitemap-output
//!
//! Delivery of rendered sitemaps to disk: atomic writes that skip unchanged
//! files, and unified diffs against the file currently on disk.

pub mod diff;
pub mod error;
pub mod writer;

pub use diff::diff_sitemap;
pub use error::OutputError;
pub use writer::{write_sitemap, WriteResult};
