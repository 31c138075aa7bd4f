//! Configuration for a document analysis.
//!
//! All behaviour is controlled through [`AnalysisConfig`], built via its
//! [`AnalysisConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share a config across requests and to inject test doubles:
//! both collaborators the pipeline talks to — the chat model and the
//! extractor registry — are injectable fields rather than ambient state.

use crate::error::AnalysisError;
use crate::model::ChatModel;
use crate::pipeline::extract::ExtractorRegistry;
use std::fmt;
use std::sync::Arc;

/// Configuration for [`crate::analyze`].
///
/// Built via [`AnalysisConfig::builder()`] or [`AnalysisConfig::default()`].
///
/// # Example
/// ```rust
/// use aicheck::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .provider_name("gemini")
///     .model("gemini-1.5-flash")
///     .temperature(0.9)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct AnalysisConfig {
    /// LLM model identifier, e.g. "gemini-1.5-flash", "gpt-4.1-nano".
    /// If None, uses the provider's default.
    pub model: Option<String>,

    /// LLM provider name (e.g. "gemini", "openai", "ollama").
    /// If None along with `chat_model`, the provider is auto-detected from
    /// API-key environment variables.
    pub provider_name: Option<String>,

    /// Pre-constructed chat model. Takes precedence over `provider_name`.
    ///
    /// This is the injection point for tests (deterministic stubs) and for
    /// embedders that need middleware around the provider.
    pub chat_model: Option<Arc<dyn ChatModel>>,

    /// Extractor registry mapping file extension → extraction strategy.
    /// Defaults to the standard `.pdf`/`.docx` set; additional formats can
    /// be registered without touching the dispatcher.
    pub extractors: Arc<ExtractorRegistry>,

    /// Sampling temperature for both model calls. Default: 0.7.
    ///
    /// The humanize call benefits from some variation; anything much above
    /// 1.0 starts to hurt the detection reply's coherence.
    pub temperature: f32,

    /// Maximum tokens the model may generate per reply. Default: 4096.
    ///
    /// The humanized rewrite is roughly as long as the input document.
    /// Setting this too low silently truncates the rewrite mid-sentence.
    pub max_tokens: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            model: None,
            provider_name: None,
            chat_model: None,
            extractors: Arc::new(ExtractorRegistry::with_standard_formats()),
            temperature: 0.7,
            max_tokens: 4096,
        }
    }
}

impl fmt::Debug for AnalysisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisConfig")
            .field("model", &self.model)
            .field("provider_name", &self.provider_name)
            .field("chat_model", &self.chat_model.as_ref().map(|_| "<dyn ChatModel>"))
            .field("extractors", &self.extractors)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl AnalysisConfig {
    /// Create a new builder for `AnalysisConfig`.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`AnalysisConfig`].
#[derive(Debug)]
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.config.provider_name = Some(name.into());
        self
    }

    pub fn chat_model(mut self, model: Arc<dyn ChatModel>) -> Self {
        self.config.chat_model = Some(model);
        self
    }

    pub fn extractors(mut self, registry: Arc<ExtractorRegistry>) -> Self {
        self.config.extractors = registry;
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.config.max_tokens = n;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<AnalysisConfig, AnalysisError> {
        let c = &self.config;
        if c.max_tokens == 0 {
            return Err(AnalysisError::InvalidConfig(
                "max_tokens must be ≥ 1".into(),
            ));
        }
        if !(0.0..=2.0).contains(&c.temperature) {
            return Err(AnalysisError::InvalidConfig(format!(
                "temperature must be 0.0–2.0, got {}",
                c.temperature
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AnalysisConfig::builder().build().expect("default config");
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.max_tokens, 4096);
        assert!(config.model.is_none());
        assert!(config.chat_model.is_none());
    }

    #[test]
    fn temperature_is_clamped() {
        let config = AnalysisConfig::builder()
            .temperature(5.0)
            .build()
            .expect("clamped config");
        assert_eq!(config.temperature, 2.0);
    }

    #[test]
    fn zero_max_tokens_is_rejected() {
        let err = AnalysisConfig::builder().max_tokens(0).build().unwrap_err();
        assert!(err.to_string().contains("max_tokens"));
    }

    #[test]
    fn debug_does_not_require_model_debug_impl() {
        let config = AnalysisConfig::default();
        let s = format!("{config:?}");
        assert!(s.contains("AnalysisConfig"));
    }
}
