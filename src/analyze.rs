//! Analysis entry points.
//!
//! One request is one linear pass: land the document on disk, extract its
//! text, then issue the detection and humanize calls concurrently. Nothing
//! is cached or shared across requests — each call is fully determined by
//! its input document and configuration.

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::model;
use crate::output::{AnalysisReport, AnalysisStats};
use crate::pipeline::{intake, llm};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Analyze a document on the local file system.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `input`  — Path to a `.pdf` or `.docx` document. Any other extension
///   extracts to empty text (the model calls still run).
/// * `config` — Analysis configuration.
///
/// # Errors
/// * File not found / permission denied
/// * Extraction failure from the format collaborator
/// * Model resolution or API failure — calls are not retried
pub async fn analyze(
    input: impl AsRef<Path>,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, AnalysisError> {
    let total_start = Instant::now();
    let path = intake::resolve_local(input.as_ref())?;
    info!("Starting analysis: {}", path.display());

    analyze_resolved(&path, config, total_start).await
}

/// Analyze an uploaded document held in memory.
///
/// The bytes are spooled to a transient file named after `filename` (the
/// extension drives extractor dispatch) and cleaned up when the request
/// completes. This is the intake path for upload-style callers that never
/// have a durable file on disk.
pub async fn analyze_bytes(
    bytes: &[u8],
    filename: &str,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, AnalysisError> {
    let total_start = Instant::now();
    let upload = intake::spool_upload(bytes, filename)?;
    info!(
        "Starting analysis of uploaded '{}' ({} bytes)",
        filename,
        bytes.len()
    );

    // `upload` stays alive across the whole pipeline; the transient file is
    // deleted when it drops.
    analyze_resolved(upload.path(), config, total_start).await
}

/// Analyze raw text directly, bypassing intake and extraction.
pub async fn analyze_text(
    text: &str,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, AnalysisError> {
    let total_start = Instant::now();
    info!("Starting analysis of raw text ({} chars)", text.chars().count());

    let chat_model = model::resolve_model(config)?;
    run_model_calls(&chat_model, text, total_start, 0).await
}

/// Synchronous wrapper around [`analyze`].
///
/// Creates a temporary tokio runtime internally.
pub fn analyze_sync(
    input: impl AsRef<Path>,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, AnalysisError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| AnalysisError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(analyze(input, config))
}

/// Extract a document's text without calling the model.
///
/// Dispatches on the file extension exactly as [`analyze`] does; unsupported
/// extensions yield `Ok("")`. Useful for callers that want to run only one
/// of the two model operations on the extracted text.
pub async fn extract_text(
    input: impl AsRef<Path>,
    config: &AnalysisConfig,
) -> Result<String, AnalysisError> {
    let path = intake::resolve_local(input.as_ref())?;
    extract_at(&path, Arc::clone(&config.extractors)).await
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Run the registry's blocking extractors off the async executor.
async fn extract_at(
    path: &Path,
    registry: Arc<crate::pipeline::extract::ExtractorRegistry>,
) -> Result<String, AnalysisError> {
    let path_buf = path.to_path_buf();
    tokio::task::spawn_blocking(move || registry.extract(&path_buf))
        .await
        .map_err(|e| AnalysisError::Internal(format!("extraction task panicked: {e}")))?
}

/// The shared tail of the pipeline once a readable path exists.
async fn analyze_resolved(
    path: &Path,
    config: &AnalysisConfig,
    total_start: Instant,
) -> Result<AnalysisReport, AnalysisError> {
    // ── Step 1: Resolve the chat model ───────────────────────────────────
    let chat_model = model::resolve_model(config)?;

    // ── Step 2: Extract text (blocking parsers, off the async executor) ──
    let extract_start = Instant::now();
    let text = extract_at(path, Arc::clone(&config.extractors)).await?;
    let extract_duration_ms = extract_start.elapsed().as_millis() as u64;
    info!(
        "Extracted {} chars in {}ms",
        text.chars().count(),
        extract_duration_ms
    );

    // ── Step 3: Both model calls, concurrently ───────────────────────────
    run_model_calls(&chat_model, &text, total_start, extract_duration_ms).await
}

/// Issue the detection and humanize calls concurrently and assemble the
/// report. Either failure fails the request — there is no partial result.
async fn run_model_calls(
    chat_model: &Arc<dyn model::ChatModel>,
    text: &str,
    total_start: Instant,
    extract_duration_ms: u64,
) -> Result<AnalysisReport, AnalysisError> {
    let llm_start = Instant::now();
    let (detection, humanized) = futures::try_join!(
        llm::score_ai_likelihood(chat_model, text),
        llm::humanize(chat_model, text),
    )?;
    let llm_duration_ms = llm_start.elapsed().as_millis() as u64;
    debug!(
        "model calls done: {} + {} completion tokens in {}ms",
        detection.completion_tokens, humanized.completion_tokens, llm_duration_ms
    );

    let stats = AnalysisStats {
        extract_duration_ms,
        llm_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
        prompt_tokens: detection.prompt_tokens + humanized.prompt_tokens,
        completion_tokens: detection.completion_tokens + humanized.completion_tokens,
    };

    info!(
        "Analysis complete: {} extracted chars, {}ms total",
        text.chars().count(),
        stats.total_duration_ms
    );

    Ok(AnalysisReport {
        detection: detection.content,
        humanized: humanized.content,
        extracted_chars: text.chars().count(),
        stats,
    })
}
