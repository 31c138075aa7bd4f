//! Error types for the aicheck library.
//!
//! One error enum covers the whole pipeline. There is no non-fatal tier:
//! every request is a single linear pass over one document, so any failure —
//! intake write, extraction, model call — aborts the request and surfaces to
//! the caller. The one non-error in the taxonomy is an *unsupported file
//! extension*, which yields empty text rather than an [`AnalysisError`]; the
//! model calls still run on the empty input.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the aicheck library.
#[derive(Debug, Error)]
pub enum AnalysisError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Document not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// Writing the uploaded bytes to the transient file failed.
    #[error("Failed to spool upload to '{path}': {source}")]
    IntakeFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Extraction errors ─────────────────────────────────────────────────
    /// The PDF collaborator could not extract text from the file.
    ///
    /// No attempt is made to distinguish "corrupt PDF" from "mislabeled
    /// file": whatever the extractor reports is passed through.
    #[error("PDF text extraction failed for '{path}': {detail}")]
    PdfExtraction { path: PathBuf, detail: String },

    /// The DOCX collaborator could not open or read the document.
    #[error("DOCX text extraction failed for '{path}': {detail}")]
    DocxExtraction { path: PathBuf, detail: String },

    // ── Model errors ──────────────────────────────────────────────────────
    /// No chat model could be resolved (missing API key etc.).
    #[error("LLM provider '{provider}' is not configured.\n{hint}")]
    ModelNotConfigured { provider: String, hint: String },

    /// The model API returned an error. Calls are not retried: the first
    /// failure surfaces here.
    #[error("LLM API error: {message}")]
    ModelApiError { message: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_not_found_display() {
        let e = AnalysisError::FileNotFound {
            path: PathBuf::from("/tmp/essay.docx"),
        };
        let msg = e.to_string();
        assert!(msg.contains("/tmp/essay.docx"), "got: {msg}");
        assert!(msg.contains("readable"));
    }

    #[test]
    fn model_not_configured_display() {
        let e = AnalysisError::ModelNotConfigured {
            provider: "gemini".into(),
            hint: "Set GEMINI_API_KEY".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("gemini"));
        assert!(msg.contains("GEMINI_API_KEY"));
    }

    #[test]
    fn pdf_extraction_display() {
        let e = AnalysisError::PdfExtraction {
            path: PathBuf::from("paper.pdf"),
            detail: "unexpected end of stream".into(),
        };
        assert!(e.to_string().contains("paper.pdf"));
        assert!(e.to_string().contains("unexpected end of stream"));
    }

    #[test]
    fn model_api_error_display() {
        let e = AnalysisError::ModelApiError {
            message: "HTTP 429".into(),
        };
        assert!(e.to_string().contains("HTTP 429"));
    }
}
