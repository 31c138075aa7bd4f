//! CLI binary for aicheck.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `AnalysisConfig` and renders the two result regions.

use aicheck::{
    analyze, analyze_text, extract_text, model::resolve_model, pipeline::llm, AnalysisConfig,
};
use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Analyze a document (detection + humanized rewrite)
  aicheck essay.docx

  # PDF input, humanized text written to a file
  aicheck paper.pdf -o humanized.txt

  # Only the AI-likelihood estimate
  aicheck --detect-only essay.docx

  # Raw text from stdin
  cat draft.txt | aicheck -

  # Use a specific model
  aicheck --provider gemini --model gemini-1.5-flash essay.docx

  # JSON output
  aicheck --json essay.docx > report.json

SUPPORTED FORMATS:
  .pdf    full text stream via pdf-extract
  .docx   paragraphs joined with newlines via docx-rs
  other   extracted as empty text (the model is still asked)

ENVIRONMENT VARIABLES:
  GEMINI_API_KEY        Google Gemini API key (preferred when set)
  OPENAI_API_KEY        OpenAI API key
  ANTHROPIC_API_KEY     Anthropic API key
  AICHECK_PROVIDER      Override provider (gemini, openai, anthropic, ollama)
  AICHECK_MODEL         Override model id

SETUP:
  1. Set an API key:  export GEMINI_API_KEY=...
  2. Analyze:         aicheck essay.docx
"#;

/// Estimate AI-generated content in a document and rewrite it to read human.
#[derive(Parser, Debug)]
#[command(
    name = "aicheck",
    version,
    about = "Estimate AI-generated content in a document and rewrite it to read human",
    long_about = "Extracts the text of a PDF or DOCX document, asks a chat-completion LLM \
what fraction of it reads as machine-generated, and asks the same model for a rewrite that \
reads as human-authored. Both replies are shown verbatim.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Document path (.pdf or .docx), or '-' to read raw text from stdin.
    #[arg(required_unless_present = "text")]
    input: Option<String>,

    /// Analyze raw text given on the command line instead of a file.
    #[arg(long, conflicts_with = "input")]
    text: Option<String>,

    /// LLM model id (e.g. gemini-1.5-flash, gpt-4.1-nano).
    #[arg(long, env = "AICHECK_MODEL")]
    model: Option<String>,

    /// LLM provider: gemini, openai, anthropic, ollama.
    #[arg(
        long,
        env = "AICHECK_PROVIDER",
        long_help = "LLM provider. Auto-detected from API-key env vars if not set \
          (GEMINI_API_KEY is preferred when present)."
    )]
    provider: Option<String>,

    /// Sampling temperature (0.0–2.0).
    #[arg(long, env = "AICHECK_TEMPERATURE", default_value_t = 0.7)]
    temperature: f32,

    /// Max LLM output tokens per reply.
    #[arg(long, env = "AICHECK_MAX_TOKENS", default_value_t = 4096)]
    max_tokens: usize,

    /// Run only the AI-likelihood estimate.
    #[arg(long, conflicts_with_all = ["humanize_only", "json"])]
    detect_only: bool,

    /// Run only the humanized rewrite.
    #[arg(long, conflicts_with = "json")]
    humanize_only: bool,

    /// Write the humanized text to this file instead of stdout.
    #[arg(short, long, env = "AICHECK_OUTPUT")]
    output: Option<PathBuf>,

    /// Output the full report as JSON instead of the two text regions.
    #[arg(long, env = "AICHECK_JSON")]
    json: bool,

    /// Disable the progress spinner.
    #[arg(long, env = "AICHECK_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "AICHECK_VERBOSE")]
    verbose: bool,

    /// Suppress all output except results and errors.
    #[arg(short, long, env = "AICHECK_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the spinner is active; the
    // spinner provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let mut config = AnalysisConfig::builder()
        .temperature(cli.temperature)
        .max_tokens(cli.max_tokens)
        .build()
        .context("Invalid configuration")?;
    config.model = cli.model.clone();
    config.provider_name = cli.provider.clone();

    // ── Resolve the input text source ────────────────────────────────────
    let raw_text = match (&cli.text, cli.input.as_deref()) {
        (Some(text), _) => Some(text.clone()),
        (None, Some("-")) => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read text from stdin")?;
            Some(buf)
        }
        _ => None,
    };

    // ── Spinner: the calls block on a remote model, show a loading state ─
    let spinner = if show_progress {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_message("Asking the model…");
        bar.enable_steady_tick(Duration::from_millis(80));
        Some(bar)
    } else {
        None
    };

    let result = run(&cli, &config, raw_text).await;

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }

    let outcome = result?;
    render(&cli, &outcome)?;
    Ok(())
}

/// What one invocation produced; single-operation modes leave a side empty.
struct Outcome {
    detection: Option<String>,
    humanized: Option<String>,
    json: Option<String>,
    stats_line: Option<String>,
}

/// Execute the requested operations.
async fn run(cli: &Cli, config: &AnalysisConfig, raw_text: Option<String>) -> Result<Outcome> {
    // Single-operation modes extract once, then make exactly one call.
    if cli.detect_only || cli.humanize_only {
        let text = match raw_text {
            Some(text) => text,
            None => extract_text(cli.input.as_deref().unwrap_or_default(), config)
                .await
                .context("Text extraction failed")?,
        };
        let chat_model = resolve_model(config).context("No usable LLM provider")?;

        let (detection, humanized) = if cli.detect_only {
            let reply = llm::score_ai_likelihood(&chat_model, &text)
                .await
                .context("Detection call failed")?;
            (Some(reply.content), None)
        } else {
            let reply = llm::humanize(&chat_model, &text)
                .await
                .context("Humanize call failed")?;
            (None, Some(reply.content))
        };

        return Ok(Outcome {
            detection,
            humanized,
            json: None,
            stats_line: None,
        });
    }

    // Full pipeline: both calls, concurrently.
    let report = match raw_text {
        Some(text) => analyze_text(&text, config).await,
        None => analyze(cli.input.as_deref().unwrap_or_default(), config).await,
    }
    .context("Analysis failed")?;

    let json = if cli.json {
        Some(serde_json::to_string_pretty(&report).context("Failed to serialise report")?)
    } else {
        None
    };

    let stats_line = format!(
        "{} chars extracted  ·  {} tokens in / {} out  ·  {}ms total",
        report.extracted_chars,
        report.stats.prompt_tokens,
        report.stats.completion_tokens,
        report.stats.total_duration_ms,
    );

    Ok(Outcome {
        detection: Some(report.detection),
        humanized: Some(report.humanized),
        json,
        stats_line: Some(stats_line),
    })
}

/// Render results: JSON, or the two labelled regions the page showed.
fn render(cli: &Cli, outcome: &Outcome) -> Result<()> {
    if let Some(ref json) = outcome.json {
        println!("{json}");
        return Ok(());
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if let Some(ref detection) = outcome.detection {
        writeln!(handle, "{} {}", cyan("◆"), bold("AI Detection"))?;
        writeln!(handle, "{detection}")?;
    }

    if let Some(ref humanized) = outcome.humanized {
        if let Some(ref path) = cli.output {
            std::fs::write(path, humanized)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if !cli.quiet {
                eprintln!("{} humanized text → {}", cyan("◆"), bold(&path.display().to_string()));
            }
        } else {
            if outcome.detection.is_some() {
                writeln!(handle)?;
            }
            writeln!(handle, "{} {}", cyan("◆"), bold("Human-like Version"))?;
            writeln!(handle, "{humanized}")?;
        }
    }

    if !cli.quiet {
        if let Some(ref stats) = outcome.stats_line {
            eprintln!("   {}", dim(stats));
        }
    }

    Ok(())
}
