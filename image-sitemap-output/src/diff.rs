//! Unified diff of a rendered sitemap against the file on disk.

use std::path::Path;

use similar::TextDiff;

use crate::error::OutputError;
use crate::writer::{normalize_line_endings, read_existing};

/// Diff what writing `rendered` to `path` would change.
///
/// A missing file diffs as empty. Returns `None` when nothing would change.
/// No files are written.
pub fn diff_sitemap(path: &Path, rendered: &str) -> Result<Option<String>, OutputError> {
    let rendered = normalize_line_endings(rendered);
    let existing = read_existing(path)?.unwrap_or_default();
    if existing == rendered {
        return Ok(None);
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let old_header = format!("a/{name}");
    let new_header = format!("b/{name}");
    let unified = TextDiff::from_lines(&existing, &rendered)
        .unified_diff()
        .header(&old_header, &new_header)
        .context_radius(3)
        .to_string();
    Ok(Some(unified))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    const OLD: &str = "<urlset>\n  <url>\n    <loc>https://x.com/a</loc>\n  </url>\n</urlset>\n";
    const NEW: &str = "<urlset>\n  <url>\n    <loc>https://x.com/b</loc>\n  </url>\n</urlset>\n";

    #[test]
    fn identical_file_has_no_diff() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sitemap.xml");
        fs::write(&path, OLD).unwrap();
        assert!(diff_sitemap(&path, OLD).unwrap().is_none());
    }

    #[test]
    fn changed_loc_produces_unified_diff() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sitemap.xml");
        fs::write(&path, OLD).unwrap();

        let diff = diff_sitemap(&path, NEW).unwrap().expect("diff");
        assert!(diff.contains("--- a/sitemap.xml"));
        assert!(diff.contains("+++ b/sitemap.xml"));
        assert!(diff.contains("@@"));
        assert!(diff.contains("-    <loc>https://x.com/a</loc>"));
        assert!(diff.contains("+    <loc>https://x.com/b</loc>"));
    }

    #[test]
    fn missing_file_diffs_as_all_added() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sitemap.xml");
        let diff = diff_sitemap(&path, NEW).unwrap().expect("diff");
        assert!(diff.contains("+<urlset>"));
        assert!(!path.exists());
    }
}
