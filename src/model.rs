//! The chat-model seam: one operation, *send a prompt, get the reply back*.
//!
//! The pipeline never talks to a provider SDK directly. It goes through
//! [`ChatModel`], a narrow trait with a single operation, so that:
//!
//! * the credential is injected where the calls are made — tests substitute a
//!   deterministic stub instead of exporting a fake API key;
//! * the provider stack ([`edgequake_llm`]) stays behind one seam and can be
//!   swapped without touching extraction or orchestration.
//!
//! Calls are **not retried**. A transient API failure surfaces to the caller
//! on the first attempt; there is no backoff loop and no silent fallback to
//! an empty reply.

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use async_trait::async_trait;
use edgequake_llm::{ChatMessage, CompletionOptions, LLMProvider, ProviderFactory};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Default model id when the Gemini provider is selected. The service this
/// tool was built against runs on Gemini, so this is also the overall
/// default when `GEMINI_API_KEY` is present.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Default model id for any other named provider.
pub const DEFAULT_MODEL: &str = "gpt-4.1-nano";

/// One model reply: the verbatim text plus token usage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelReply {
    /// The textual content of the model's final message, unparsed.
    pub content: String,
    /// Tokens consumed by the prompt.
    pub prompt_tokens: u64,
    /// Tokens generated in the reply.
    pub completion_tokens: u64,
}

/// A chat model that answers a single user-role prompt.
///
/// Implementations must be `Send + Sync`: the pipeline issues the detection
/// and humanize calls concurrently against one shared model handle.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Submit `prompt` as a single user-role message and return the reply.
    async fn reply(&self, prompt: &str) -> Result<ModelReply, AnalysisError>;
}

/// Production [`ChatModel`] backed by an [`edgequake_llm`] provider.
pub struct ProviderChatModel {
    provider: Arc<dyn LLMProvider>,
    temperature: f32,
    max_tokens: usize,
}

impl ProviderChatModel {
    pub fn new(provider: Arc<dyn LLMProvider>, temperature: f32, max_tokens: usize) -> Self {
        Self {
            provider,
            temperature,
            max_tokens,
        }
    }
}

#[async_trait]
impl ChatModel for ProviderChatModel {
    async fn reply(&self, prompt: &str) -> Result<ModelReply, AnalysisError> {
        let messages = vec![ChatMessage::user(prompt)];
        let options = CompletionOptions {
            temperature: Some(self.temperature),
            max_tokens: Some(self.max_tokens),
            ..Default::default()
        };

        let start = Instant::now();
        let response = self
            .provider
            .chat(&messages, Some(&options))
            .await
            .map_err(|e| AnalysisError::ModelApiError {
                message: e.to_string(),
            })?;

        debug!(
            "model reply: {} input tokens, {} output tokens, {:?}",
            response.prompt_tokens,
            response.completion_tokens,
            start.elapsed()
        );

        Ok(ModelReply {
            content: response.content,
            prompt_tokens: response.prompt_tokens as u64,
            completion_tokens: response.completion_tokens as u64,
        })
    }
}

/// Resolve the chat model, from most-specific to least-specific.
///
/// 1. **Pre-built model** (`config.chat_model`) — the caller constructed the
///    model entirely; used as-is. This is how tests inject a stub and how
///    embedders add middleware.
///
/// 2. **Named provider** (`config.provider_name`) — e.g. `"gemini"`,
///    `"openai"`. [`ProviderFactory::create_llm_provider`] reads the
///    corresponding API key from the environment.
///
/// 3. **`GEMINI_API_KEY` present** — the original service ran on Gemini, so
///    a Gemini key selects Gemini with [`DEFAULT_GEMINI_MODEL`] unless a
///    model id was configured.
///
/// 4. **Full auto-detection** ([`ProviderFactory::from_env`]) — the factory
///    scans all known API-key variables and picks the first available
///    provider.
pub fn resolve_model(config: &AnalysisConfig) -> Result<Arc<dyn ChatModel>, AnalysisError> {
    // 1) User-provided model takes priority
    if let Some(ref model) = config.chat_model {
        return Ok(Arc::clone(model));
    }

    // 2) Named provider + model
    if let Some(ref name) = config.provider_name {
        let model_id = config.model.as_deref().unwrap_or(default_model_for(name));
        let provider = create_provider(name, model_id)?;
        return Ok(wrap(config, provider));
    }

    // 3) Prefer Gemini when its key is present
    if let Ok(key) = std::env::var("GEMINI_API_KEY") {
        if !key.is_empty() {
            let model_id = config.model.as_deref().unwrap_or(DEFAULT_GEMINI_MODEL);
            let provider = create_provider("gemini", model_id)?;
            return Ok(wrap(config, provider));
        }
    }

    // 4) Auto-detect from environment
    let (provider, _embedding) =
        ProviderFactory::from_env().map_err(|e| AnalysisError::ModelNotConfigured {
            provider: "auto".to_string(),
            hint: format!(
                "No LLM provider could be auto-detected from environment.\n\
                Set GEMINI_API_KEY, OPENAI_API_KEY, or configure a provider.\n\
                Error: {}",
                e
            ),
        })?;

    Ok(wrap(config, provider))
}

/// Instantiate a named provider with the given model id.
fn create_provider(
    provider_name: &str,
    model_id: &str,
) -> Result<Arc<dyn LLMProvider>, AnalysisError> {
    ProviderFactory::create_llm_provider(provider_name, model_id).map_err(|e| {
        AnalysisError::ModelNotConfigured {
            provider: provider_name.to_string(),
            hint: format!("{e}"),
        }
    })
}

fn wrap(config: &AnalysisConfig, provider: Arc<dyn LLMProvider>) -> Arc<dyn ChatModel> {
    Arc::new(ProviderChatModel::new(
        provider,
        config.temperature,
        config.max_tokens,
    ))
}

/// Default model id for a named provider.
fn default_model_for(provider_name: &str) -> &'static str {
    match provider_name {
        "gemini" => DEFAULT_GEMINI_MODEL,
        _ => DEFAULT_MODEL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gemini_gets_gemini_default_model() {
        assert_eq!(default_model_for("gemini"), "gemini-1.5-flash");
    }

    #[test]
    fn other_providers_get_generic_default() {
        assert_eq!(default_model_for("openai"), DEFAULT_MODEL);
        assert_eq!(default_model_for("ollama"), DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn injected_model_wins_over_everything() {
        struct Canned;

        #[async_trait]
        impl ChatModel for Canned {
            async fn reply(&self, _prompt: &str) -> Result<ModelReply, AnalysisError> {
                Ok(ModelReply {
                    content: "canned".into(),
                    prompt_tokens: 0,
                    completion_tokens: 0,
                })
            }
        }

        let config = AnalysisConfig {
            chat_model: Some(Arc::new(Canned) as Arc<dyn ChatModel>),
            // A provider name that would fail to resolve if consulted.
            provider_name: Some("no-such-provider".into()),
            ..AnalysisConfig::default()
        };

        let model = resolve_model(&config).expect("injected model must resolve");
        let reply = model.reply("hi").await.expect("stub must answer");
        assert_eq!(reply.content, "canned");
    }
}
