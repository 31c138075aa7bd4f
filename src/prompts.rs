//! Prompt templates for the two model calls.
//!
//! Centralising both prompts here serves two purposes:
//!
//! 1. **Single source of truth** — the detection and humanize behaviour is
//!    entirely defined by these templates; changing either means editing
//!    exactly one place.
//!
//! 2. **Testability** — unit tests can assert the exact prompt a given input
//!    produces without spinning up a real model.
//!
//! The templates are deliberately fixed: callers cannot override them. The
//! extracted text is embedded in full — no truncation, no escaping — so the
//! reply corresponds to exactly one document and exactly one prompt.

/// Prefix of the AI-likelihood prompt. The extracted text follows the
/// trailing newline.
pub const DETECTION_PROMPT_PREFIX: &str = "Estimate AI content 0-100%:\n";

/// Prefix of the humanize prompt. The extracted text follows the trailing
/// newline.
pub const HUMANIZE_PROMPT_PREFIX: &str =
    "Rewrite this text to look like a real student wrote it:\n";

/// Build the prompt asking the model to score how much of `text` is
/// machine-generated.
pub fn detection_prompt(text: &str) -> String {
    format!("{DETECTION_PROMPT_PREFIX}{text}")
}

/// Build the prompt asking the model to rewrite `text` so it reads as
/// human-authored.
pub fn humanize_prompt(text: &str) -> String {
    format!("{HUMANIZE_PROMPT_PREFIX}{text}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_prompt_shape() {
        assert_eq!(detection_prompt("abc"), "Estimate AI content 0-100%:\nabc");
    }

    #[test]
    fn humanize_prompt_shape() {
        assert_eq!(
            humanize_prompt("abc"),
            "Rewrite this text to look like a real student wrote it:\nabc"
        );
    }

    #[test]
    fn empty_text_keeps_prefix_intact() {
        // Unsupported extensions yield empty text; the prompts still go out.
        assert_eq!(detection_prompt(""), DETECTION_PROMPT_PREFIX);
        assert_eq!(humanize_prompt(""), HUMANIZE_PROMPT_PREFIX);
    }

    #[test]
    fn text_is_embedded_verbatim() {
        let text = "line one\nline two\n  indented";
        let p = humanize_prompt(text);
        assert!(p.ends_with(text));
        assert!(p.starts_with(HUMANIZE_PROMPT_PREFIX));
    }
}
