//! Language model configuration.

use serde::{Deserialize, Serialize};

use crate::{Result, SungbatError};

/// Default chat model.
pub const DEFAULT_LLM_MODEL: &str = "gpt-4.1";

/// Settings for the chat model used by both translation and answering.
///
/// The decoding parameters default to deterministic output: temperature 0,
/// nucleus sampling at 0.9 and a 1000-token reply cap.
///
/// ```rust
/// use sungbat_core::config::LlmConfig;
///
/// let config = LlmConfig::default().with_api_key("sk-test");
/// assert_eq!(config.model, "gpt-4.1");
/// assert_eq!(config.max_tokens, 1000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name; only `openai` is wired up.
    pub provider: String,

    /// Model name.
    pub model: String,

    /// API key, normally taken from `OPENAI_API_KEY`.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Alternative endpoint for OpenAI-compatible servers.
    pub base_url: Option<String>,

    /// Sampling temperature.
    pub temperature: f32,

    /// Nucleus sampling mass.
    pub top_p: f32,

    /// Reply token cap.
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: DEFAULT_LLM_MODEL.to_string(),
            api_key: None,
            base_url: None,
            temperature: 0.0,
            top_p: 0.9,
            max_tokens: 1000,
        }
    }
}

impl LlmConfig {
    /// Create a configuration for `provider`/`model` with default decoding.
    pub fn new<S1: Into<String>, S2: Into<String>>(provider: S1, model: S2) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            ..Self::default()
        }
    }

    /// Set the API key.
    pub fn with_api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the base URL.
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set top-p.
    #[must_use]
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    /// Set the reply token cap.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.provider.is_empty() {
            return Err(SungbatError::configuration("LLM provider cannot be empty"));
        }
        if self.model.is_empty() {
            return Err(SungbatError::configuration("LLM model cannot be empty"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(SungbatError::configuration(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }
        if !(0.0..=1.0).contains(&self.top_p) || self.top_p == 0.0 {
            return Err(SungbatError::configuration(format!(
                "top_p must be in (0.0, 1.0], got {}",
                self.top_p
            )));
        }
        if self.max_tokens == 0 {
            return Err(SungbatError::configuration("max_tokens must be positive"));
        }
        Ok(())
    }
}
