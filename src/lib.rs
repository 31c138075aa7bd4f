//! # aicheck
//!
//! Estimate how much of a document reads as AI-generated, and rewrite it so
//! it reads human — using any chat-completion LLM provider.
//!
//! ## Pipeline Overview
//!
//! ```text
//! document (.pdf / .docx)
//!  │
//!  ├─ 1. Intake    spool uploaded bytes to a transient file, or resolve a path
//!  ├─ 2. Extract   dispatch on extension to a text extractor (spawn_blocking)
//!  ├─ 3. Detect    "Estimate AI content 0-100%:" prompt   ──┐ concurrent
//!  ├─ 4. Humanize  "Rewrite this text …" prompt            ──┘ LLM calls
//!  └─ 5. Report    both replies verbatim + timings and token usage
//! ```
//!
//! The two model calls are independent once extraction has produced text, so
//! they run concurrently. Replies are returned exactly as the model produced
//! them: the detection reply is *not* parsed into a number and the rewrite is
//! *not* post-processed.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aicheck::{analyze, AnalysisConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Provider auto-detected from GEMINI_API_KEY / OPENAI_API_KEY / …
//!     let config = AnalysisConfig::default();
//!     let report = analyze("essay.docx", &config).await?;
//!     println!("AI Detection: {}", report.detection);
//!     println!("{}", report.humanized);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `aicheck` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! aicheck = { version = "0.2", default-features = false }
//! ```
//!
//! ## Supported inputs
//!
//! | Extension | Extractor |
//! |-----------|-----------|
//! | `.pdf`    | `pdf-extract`, full text stream |
//! | `.docx`   | `docx-rs`, paragraphs joined with `\n` |
//! | anything else | empty text (the model calls still run) |
//!
//! Raw text can be analyzed directly with [`analyze_text`], bypassing
//! extraction entirely.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod analyze;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod prompts;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use analyze::{analyze, analyze_bytes, analyze_sync, analyze_text, extract_text};
pub use config::{AnalysisConfig, AnalysisConfigBuilder};
pub use error::AnalysisError;
pub use model::{ChatModel, ModelReply};
pub use output::{AnalysisReport, AnalysisStats};
pub use pipeline::extract::{ExtractText, ExtractorRegistry};
