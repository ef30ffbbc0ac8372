//! Configuration for API-based embedders.

use std::time::Duration;
use sungbat_core::config::EmbedderConfig;

use super::error::{ApiEmbedderError, Result};

/// Settings for [`super::ApiEmbedder`].
#[derive(Debug, Clone)]
pub struct ApiEmbedderConfig {
    /// Embedding model name.
    pub model: String,

    /// Provider credential.
    pub api_key: String,

    /// Alternative OpenAI-compatible endpoint.
    pub base_url: Option<String>,

    /// Texts per request.
    pub batch_size: usize,

    /// Retries after the first failed attempt.
    pub max_retries: usize,

    /// Per-request timeout.
    pub timeout: Duration,

    /// First retry delay; doubles on every further attempt.
    pub retry_base_delay: Duration,
}

impl ApiEmbedderConfig {
    /// OpenAI settings with default batching and retries.
    pub fn openai<S1: Into<String>, S2: Into<String>>(api_key: S1, model: S2) -> Self {
        Self {
            model: model.into(),
            api_key: api_key.into(),
            base_url: None,
            batch_size: 100,
            max_retries: 3,
            timeout: Duration::from_secs(30),
            retry_base_delay: Duration::from_secs(1),
        }
    }

    /// Build from the application embedder section and a resolved key.
    pub fn from_embedder_config<S: Into<String>>(config: &EmbedderConfig, api_key: S) -> Self {
        Self {
            model: config.model.clone(),
            api_key: api_key.into(),
            base_url: config.base_url.clone(),
            batch_size: config.batch_size,
            max_retries: config.max_retries,
            timeout: Duration::from_secs(config.timeout_seconds),
            retry_base_delay: Duration::from_secs(1),
        }
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the batch size.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the retry count.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Vector length of the known OpenAI models, 1536 for anything else.
    ///
    /// New indexes take their size from the embeddings themselves, so this
    /// only serves the load-time consistency check.
    pub fn dimension(&self) -> usize {
        match self.model.as_str() {
            "text-embedding-3-large" => 3072,
            _ => 1536,
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ApiEmbedderError::configuration("API key cannot be empty"));
        }
        if self.model.trim().is_empty() {
            return Err(ApiEmbedderError::configuration("Model cannot be empty"));
        }
        if self.batch_size == 0 {
            return Err(ApiEmbedderError::configuration(
                "Batch size must be greater than 0",
            ));
        }
        if self.timeout.is_zero() {
            return Err(ApiEmbedderError::configuration(
                "Timeout must be greater than 0",
            ));
        }
        Ok(())
    }
}
