//! Chat model backed by siumai.

use async_trait::async_trait;
use siumai::prelude::*;
use sungbat_core::{
    Result, SungbatError,
    config::LlmConfig,
    traits::{LanguageModel, ModelInfo},
};
use tracing::{debug, instrument};

/// [`LanguageModel`] that sends each prompt as a single user message.
///
/// Decoding parameters (temperature, top-p, max tokens) are fixed on the
/// client when it is built, so every call uses the same settings.
///
/// ```rust,no_run
/// use sungbat_core::config::LlmConfig;
/// use sungbat_core::traits::LanguageModel;
/// use sungbat_query::SiumaiGenerator;
///
/// # async fn example() -> sungbat_core::Result<()> {
/// let llm = SiumaiGenerator::from_config(&LlmConfig::default().with_api_key("sk-...")).await?;
/// let reply = llm.complete("Ania ti Konstitusion?").await?;
/// # Ok(())
/// # }
/// ```
pub struct SiumaiGenerator {
    client: Siumai,
    info: ModelInfo,
}

impl std::fmt::Debug for SiumaiGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiumaiGenerator")
            .field("model", &self.info.name)
            .field("provider", &self.info.provider)
            .finish_non_exhaustive()
    }
}

impl SiumaiGenerator {
    /// Wrap an already configured client.
    pub fn new(client: Siumai, info: ModelInfo) -> Self {
        Self { client, info }
    }

    /// Build an OpenAI client from `config`.
    pub async fn from_config(config: &LlmConfig) -> Result<Self> {
        config.validate()?;
        if config.provider != "openai" {
            return Err(SungbatError::configuration(format!(
                "Unsupported LLM provider: {}",
                config.provider
            )));
        }
        let api_key = config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| SungbatError::configuration("LLM API key is required"))?;

        let mut builder = Siumai::builder().openai().api_key(api_key);
        if let Some(base_url) = &config.base_url {
            builder = builder.base_url(base_url);
        }
        let client = builder
            .model(&config.model)
            .temperature(config.temperature)
            .top_p(config.top_p)
            .max_tokens(config.max_tokens)
            .build()
            .await
            .map_err(|e| {
                SungbatError::configuration(format!("Failed to create siumai client: {e}"))
            })?;

        Ok(Self::new(
            client,
            ModelInfo {
                name: config.model.clone(),
                provider: config.provider.clone(),
                max_output_tokens: Some(config.max_tokens),
            },
        ))
    }
}

#[async_trait]
impl LanguageModel for SiumaiGenerator {
    #[instrument(skip(self, prompt), fields(model = %self.info.name, prompt_len = prompt.len()))]
    async fn complete(&self, prompt: &str) -> Result<String> {
        let messages = vec![ChatMessage::user(prompt).build()];
        let response = self
            .client
            .chat(messages)
            .await
            .map_err(|e| SungbatError::llm(format!("Siumai generation failed: {e}")))?;

        match &response.content {
            siumai::MessageContent::Text(text) => {
                debug!("Received {} characters", text.len());
                Ok(text.clone())
            }
            _ => Err(SungbatError::llm("Unsupported content type in LLM response")),
        }
    }

    fn name(&self) -> &'static str {
        "SiumaiGenerator"
    }

    fn model_info(&self) -> ModelInfo {
        self.info.clone()
    }
}
