//! The two model-facing operations: score AI likelihood and humanize.
//!
//! This module is intentionally thin — the prompt templates live in
//! [`crate::prompts`] so they can be changed (and unit-tested) without
//! touching transport concerns, and the transport lives behind
//! [`ChatModel`] so tests can substitute a stub.
//!
//! There is no retry logic here on purpose: a failed call propagates to the
//! caller on the first attempt, and the reply is never parsed or validated —
//! whatever the model says is the result.

use crate::error::AnalysisError;
use crate::model::{ChatModel, ModelReply};
use crate::prompts;
use std::sync::Arc;
use tracing::debug;

/// Ask the model what fraction of `text` appears machine-generated.
///
/// The reply is free text; it is returned verbatim, not parsed into a
/// number and not clamped into any range.
pub async fn score_ai_likelihood(
    model: &Arc<dyn ChatModel>,
    text: &str,
) -> Result<ModelReply, AnalysisError> {
    let prompt = prompts::detection_prompt(text);
    debug!("detection prompt: {} chars", prompt.chars().count());
    model.reply(&prompt).await
}

/// Ask the model to rewrite `text` so it reads as human-authored.
///
/// The full text is embedded in the prompt — no length limiting beyond what
/// the remote API itself enforces.
pub async fn humanize(
    model: &Arc<dyn ChatModel>,
    text: &str,
) -> Result<ModelReply, AnalysisError> {
    let prompt = prompts::humanize_prompt(text);
    debug!("humanize prompt: {} chars", prompt.chars().count());
    model.reply(&prompt).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Echoes the prompt back so tests can assert exactly what went out.
    struct Echo {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChatModel for Echo {
        async fn reply(&self, prompt: &str) -> Result<ModelReply, AnalysisError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(ModelReply {
                content: prompt.to_string(),
                prompt_tokens: 1,
                completion_tokens: 1,
            })
        }
    }

    #[tokio::test]
    async fn detection_sends_the_exact_prompt() {
        let model: Arc<dyn ChatModel> = Arc::new(Echo {
            prompts: Mutex::new(vec![]),
        });
        let reply = score_ai_likelihood(&model, "abc").await.expect("reply");
        assert_eq!(reply.content, "Estimate AI content 0-100%:\nabc");
    }

    #[tokio::test]
    async fn humanize_sends_the_exact_prompt() {
        let model: Arc<dyn ChatModel> = Arc::new(Echo {
            prompts: Mutex::new(vec![]),
        });
        let reply = humanize(&model, "abc").await.expect("reply");
        assert_eq!(
            reply.content,
            "Rewrite this text to look like a real student wrote it:\nabc"
        );
    }

    #[tokio::test]
    async fn model_failure_is_not_swallowed() {
        struct Failing;

        #[async_trait]
        impl ChatModel for Failing {
            async fn reply(&self, _prompt: &str) -> Result<ModelReply, AnalysisError> {
                Err(AnalysisError::ModelApiError {
                    message: "HTTP 503".into(),
                })
            }
        }

        let model: Arc<dyn ChatModel> = Arc::new(Failing);
        let err = score_ai_likelihood(&model, "abc").await.unwrap_err();
        assert!(err.to_string().contains("HTTP 503"));
    }
}
