//! Language model completion.

use async_trait::async_trait;

use crate::Result;

/// A text-in, text-out language model.
///
/// Implementations carry their decoding parameters; callers only hand over
/// the rendered prompt. Both the translation and the answer stages go
/// through this trait, so a stub implementation is enough to drive the
/// whole query pipeline in tests.
#[async_trait]
pub trait LanguageModel: Send + Sync + std::fmt::Debug {
    /// Send `prompt` as a single user message and return the reply text.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Human readable component name for logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Describe the backing model.
    fn model_info(&self) -> ModelInfo {
        ModelInfo::default()
    }
}

/// Identification of the model behind a [`LanguageModel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    /// Model name, e.g. `gpt-4.1`.
    pub name: String,

    /// Provider name, e.g. `openai`.
    pub provider: String,

    /// Output token cap, if any.
    pub max_output_tokens: Option<u32>,
}

impl Default for ModelInfo {
    fn default() -> Self {
        Self {
            name: "unknown".to_string(),
            provider: "unknown".to_string(),
            max_output_tokens: None,
        }
    }
}
