//! Text extraction: turn a document file into plain text.
//!
//! Dispatch is a capability lookup keyed by file extension: the
//! [`ExtractorRegistry`] maps a lowercase extension to an [`ExtractText`]
//! strategy, and new formats can be registered without modifying the
//! dispatcher. Two strategies ship by default:
//!
//! * `.pdf`  — the `pdf-extract` collaborator's whole-document text
//!   extraction, returned unmodified;
//! * `.docx` — the `docx-rs` collaborator's document model, reading the
//!   ordered paragraph sequence and joining paragraph texts with `\n`.
//!
//! An extension with no registered strategy yields an **empty string, not an
//! error** — the rest of the pipeline runs on the empty text. There is no
//! content sniffing: a mislabeled file produces whatever error the chosen
//! collaborator raises, passed through unchanged in meaning.
//!
//! The extractors are synchronous; callers run them under `spawn_blocking`.

use crate::error::AnalysisError;
use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// A format-specific extraction strategy: one operation, extract the plain
/// text of the document at `path`.
pub trait ExtractText: Send + Sync {
    fn extract(&self, path: &Path) -> Result<String, AnalysisError>;
}

// ── PDF ──────────────────────────────────────────────────────────────────

/// Whole-document PDF text extraction via `pdf-extract`.
pub struct PdfText;

impl ExtractText for PdfText {
    fn extract(&self, path: &Path) -> Result<String, AnalysisError> {
        pdf_extract::extract_text(path).map_err(|e| AnalysisError::PdfExtraction {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })
    }
}

// ── DOCX ─────────────────────────────────────────────────────────────────

/// DOCX extraction via `docx-rs`: paragraphs in document order, joined with
/// newline separators.
pub struct DocxText;

impl ExtractText for DocxText {
    fn extract(&self, path: &Path) -> Result<String, AnalysisError> {
        let bytes = std::fs::read(path).map_err(|e| AnalysisError::DocxExtraction {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

        let docx = docx_rs::read_docx(&bytes).map_err(|e| AnalysisError::DocxExtraction {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(p) => Some(paragraph_text(p)),
                _ => None,
            })
            .collect();

        Ok(paragraphs.join("\n"))
    }
}

/// Concatenate the text runs of one paragraph.
fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut out = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let RunChild::Text(t) = run_child {
                    out.push_str(&t.text);
                }
            }
        }
    }
    out
}

// ── Registry ─────────────────────────────────────────────────────────────

/// Extension → extraction strategy lookup.
///
/// Extensions are matched case-insensitively (`Essay.DOCX` dispatches the
/// same as `essay.docx`). A path with no extension, or an extension with no
/// registered strategy, extracts to the empty string.
pub struct ExtractorRegistry {
    extractors: HashMap<String, Box<dyn ExtractText>>,
}

impl ExtractorRegistry {
    /// An empty registry. Every extraction returns `""` until strategies
    /// are registered.
    pub fn new() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// The standard registry: `.pdf` and `.docx`.
    pub fn with_standard_formats() -> Self {
        let mut registry = Self::new();
        registry.register("pdf", PdfText);
        registry.register("docx", DocxText);
        registry
    }

    /// Register a strategy for `extension` (without the leading dot),
    /// replacing any existing strategy for that extension.
    pub fn register(&mut self, extension: impl Into<String>, extractor: impl ExtractText + 'static) {
        self.extractors
            .insert(extension.into().to_ascii_lowercase(), Box::new(extractor));
    }

    /// Extract the text of the document at `path`, dispatching on its
    /// extension. Unrecognized extensions yield `Ok("")`.
    pub fn extract(&self, path: &Path) -> Result<String, AnalysisError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref().and_then(|e| self.extractors.get(e)) {
            Some(extractor) => {
                let text = extractor.extract(path)?;
                debug!(
                    "extracted {} chars from {}",
                    text.chars().count(),
                    path.display()
                );
                Ok(text)
            }
            None => {
                debug!(
                    "no extractor registered for {}; yielding empty text",
                    path.display()
                );
                Ok(String::new())
            }
        }
    }

    /// Registered extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.extractors.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        extensions
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_standard_formats()
    }
}

impl fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractorRegistry")
            .field("extensions", &self.supported_extensions())
            .finish()
    }
}
