//! Upload intake: land the document's bytes on local storage.
//!
//! ## Why a temp directory per upload?
//!
//! The extractors need a file-system path, and extension dispatch needs the
//! claimed filename to survive the trip to disk. Spooling into a fresh
//! `TempDir` keeps both: the transient file is named after the upload (so
//! `essay.docx` still dispatches as `.docx`) and is cleaned up automatically
//! when [`SpooledUpload`] is dropped — concurrent requests never share a
//! path.
//!
//! No validation happens here beyond the write itself: content is not
//! sniffed, size is not limited, and a mislabeled file is spooled as-is.
//! Whatever the extractor makes of it is the caller's answer.

use crate::error::AnalysisError;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

/// An uploaded document written to a transient file.
///
/// The `TempDir` is kept alive to prevent cleanup until the request that
/// owns the upload completes.
pub struct SpooledUpload {
    path: PathBuf,
    _temp_dir: TempDir,
}

impl SpooledUpload {
    /// Path of the transient file, extension intact.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Write `bytes` to a transient file named after `filename`.
///
/// Only the final path component of `filename` is used, so a hostile or
/// confused client cannot steer the write outside the temp directory.
/// A failed write is not a recoverable condition — it propagates as
/// [`AnalysisError::IntakeFailed`].
pub fn spool_upload(bytes: &[u8], filename: &str) -> Result<SpooledUpload, AnalysisError> {
    let name = Path::new(filename)
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "upload".into());

    let temp_dir = TempDir::new().map_err(|e| AnalysisError::Internal(e.to_string()))?;
    let path = temp_dir.path().join(&name);

    std::fs::write(&path, bytes).map_err(|e| AnalysisError::IntakeFailed {
        path: path.clone(),
        source: e,
    })?;

    debug!("spooled {} bytes to {}", bytes.len(), path.display());

    Ok(SpooledUpload {
        path,
        _temp_dir: temp_dir,
    })
}

/// Validate that a caller-supplied path exists and is readable.
///
/// Deliberately does **not** inspect the file's content: dispatch is by
/// extension only, and a corrupt or mislabeled file is the extractor's
/// problem to report.
pub fn resolve_local(path: &Path) -> Result<PathBuf, AnalysisError> {
    if !path.exists() {
        return Err(AnalysisError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    match std::fs::File::open(path) {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(AnalysisError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(AnalysisError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
    }

    debug!("resolved local document: {}", path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spool_preserves_extension_and_bytes() {
        let upload = spool_upload(b"PK\x03\x04fake", "essay.docx").expect("spool");
        assert_eq!(
            upload.path().extension().and_then(|e| e.to_str()),
            Some("docx")
        );
        let bytes = std::fs::read(upload.path()).expect("read back");
        assert_eq!(bytes, b"PK\x03\x04fake");
    }

    #[test]
    fn spool_strips_directory_components() {
        let upload = spool_upload(b"x", "../../etc/essay.pdf").expect("spool");
        assert_eq!(
            upload.path().file_name().and_then(|n| n.to_str()),
            Some("essay.pdf")
        );
    }

    #[test]
    fn spooled_file_is_removed_on_drop() {
        let path = {
            let upload = spool_upload(b"gone", "note.docx").expect("spool");
            upload.path().to_path_buf()
        };
        assert!(!path.exists(), "transient file should not outlive the request");
    }

    #[test]
    fn resolve_local_missing_file() {
        let err = resolve_local(Path::new("/definitely/not/a/real/file.pdf")).unwrap_err();
        assert!(matches!(err, AnalysisError::FileNotFound { .. }));
    }

    #[test]
    fn resolve_local_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("doc.pdf");
        std::fs::write(&file, b"%PDF-1.4").expect("write");
        let resolved = resolve_local(&file).expect("resolve");
        assert_eq!(resolved, file);
    }
}
