//! Atomic sitemap writer.
//!
//! 1. Normalise line endings to LF.
//! 2. Compare with the file on disk; skip if identical.
//! 3. Write to `<path>.image-sitemap.tmp`.
//! 4. Rename to the final path (atomic on POSIX).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{io_err, OutputError};

/// Outcome of writing a sitemap file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File was skipped: on-disk content already matches.
    Unchanged { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }
}

/// Atomically write a rendered sitemap to `path`.
pub fn write_sitemap(path: &Path, content: &str, dry_run: bool) -> Result<WriteResult, OutputError> {
    let tmp = PathBuf::from(format!("{}.image-sitemap.tmp", path.display()));
    write_with_tmp(path, content, dry_run, &tmp)
}

fn write_with_tmp(
    path: &Path,
    content: &str,
    dry_run: bool,
    tmp: &Path,
) -> Result<WriteResult, OutputError> {
    let normalized = normalize_line_endings(content);
    let content = normalized.as_str();

    if read_existing(path)?.as_deref() == Some(content) {
        tracing::debug!("unchanged: {}", path.display());
        return Ok(WriteResult::Unchanged {
            path: path.to_path_buf(),
        });
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

/// Current on-disk content with normalised line endings, `None` if missing.
pub(crate) fn read_existing(path: &Path) -> Result<Option<String>, OutputError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(normalize_line_endings(&content))),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_err(path, err)),
    }
}

pub(crate) fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const XML: &str = "<?xml version=\"1.0\"?>\n<urlset>\n</urlset>\n";

    #[test]
    fn writes_new_file_and_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("public").join("sitemap-images.xml");
        let result = write_sitemap(&path, XML, false).unwrap();
        assert_eq!(result, WriteResult::Written { path: path.clone() });
        assert_eq!(std::fs::read_to_string(&path).unwrap(), XML);
    }

    #[test]
    fn identical_content_is_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sitemap.xml");
        write_sitemap(&path, XML, false).unwrap();
        let result = write_sitemap(&path, XML, false).unwrap();
        assert!(matches!(result, WriteResult::Unchanged { .. }));
    }

    #[test]
    fn crlf_content_matches_lf_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sitemap.xml");
        write_sitemap(&path, XML, false).unwrap();
        let result = write_sitemap(&path, &XML.replace('\n', "\r\n"), false).unwrap();
        assert!(matches!(result, WriteResult::Unchanged { .. }));
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sitemap.xml");
        let result = write_sitemap(&path, XML, true).unwrap();
        assert!(matches!(result, WriteResult::WouldWrite { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn tmp_file_is_removed_after_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sitemap.xml");
        write_sitemap(&path, XML, false).unwrap();
        assert!(!dir.path().join("sitemap.xml.image-sitemap.tmp").exists());
    }

    #[test]
    fn failed_rename_cleans_up_tmp() {
        let dir = TempDir::new().unwrap();
        // A non-empty directory at the target path makes the write fail.
        let path = dir.path().join("sitemap.xml");
        std::fs::create_dir_all(path.join("occupied")).unwrap();
        let tmp = dir.path().join("custom.tmp");

        let err = write_with_tmp(&path, XML, false, &tmp).unwrap_err();
        assert!(matches!(err, OutputError::Io { .. }));
        assert!(!tmp.exists());
    }
}
