//! Embedding provider configuration.

use serde::{Deserialize, Serialize};

use crate::{Result, SungbatError};

/// Default embedding model.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";

/// Settings for the embedding provider used by ingestion and retrieval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EmbedderConfig {
    /// Model name.
    pub model: String,

    /// API key; falls back to the LLM key when unset.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Alternative endpoint.
    pub base_url: Option<String>,

    /// Texts sent per request during ingestion.
    pub batch_size: usize,

    /// Retries for a failed request.
    pub max_retries: usize,

    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            api_key: None,
            base_url: None,
            batch_size: 100,
            max_retries: 3,
            timeout_seconds: 30,
        }
    }
}

impl EmbedderConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.model.is_empty() {
            return Err(SungbatError::configuration("Embedding model cannot be empty"));
        }
        if self.batch_size == 0 {
            return Err(SungbatError::configuration(
                "Embedding batch size must be positive",
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SungbatError::configuration(
                "Embedding timeout must be positive",
            ));
        }
        Ok(())
    }
}
