//! OpenAI embeddings through siumai.

use async_trait::async_trait;
use siumai::{
    providers::openai::{OpenAiConfig, OpenAiEmbeddings},
    traits::EmbeddingCapability,
};
use std::time::Duration;
use sungbat_core::{Result as CoreResult, traits::Embedder};
use tracing::{debug, instrument, warn};

use super::{
    config::ApiEmbedderConfig,
    error::{ApiEmbedderError, Result},
};

/// Hosted embedding model with batching and exponential-backoff retries.
pub struct ApiEmbedder {
    config: ApiEmbedderConfig,
    client: Box<dyn EmbeddingCapability + Send + Sync>,
}

impl std::fmt::Debug for ApiEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiEmbedder")
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .field("batch_size", &self.config.batch_size)
            .finish_non_exhaustive()
    }
}

impl ApiEmbedder {
    /// Create an embedder; no request is sent until the first embed call.
    pub fn new(config: ApiEmbedderConfig) -> Result<Self> {
        config.validate()?;

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiEmbedderError::network(format!("Failed to create HTTP client: {e}")))?;

        let mut openai_config = OpenAiConfig::new(&config.api_key).with_model(&config.model);
        if let Some(base_url) = &config.base_url {
            openai_config = openai_config.with_base_url(base_url);
        }
        let client = Box::new(OpenAiEmbeddings::new(openai_config, http_client));

        Ok(Self { config, client })
    }

    /// Active configuration.
    pub fn config(&self) -> &ApiEmbedderConfig {
        &self.config
    }

    fn retry_delay(&self, attempt: usize) -> Duration {
        let factor = 2u32.saturating_pow(u32::try_from(attempt).unwrap_or(u32::MAX));
        self.config
            .retry_base_delay
            .checked_mul(factor)
            .unwrap_or(Duration::from_secs(60))
    }

    async fn request_with_retry(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        let expected = texts.len();
        let mut attempt = 0;

        loop {
            match self.client.embed(texts.clone()).await {
                Ok(response) if response.embeddings.len() == expected => {
                    debug!(
                        "Embedded {} texts on attempt {}",
                        expected,
                        attempt + 1
                    );
                    return Ok(response.embeddings);
                }
                Ok(response) => {
                    return Err(ApiEmbedderError::invalid_response(format!(
                        "expected {expected} embeddings, got {}",
                        response.embeddings.len()
                    )));
                }
                Err(e) if attempt < self.config.max_retries => {
                    let delay = self.retry_delay(attempt);
                    warn!(
                        "Embedding request failed on attempt {}, retrying in {:?}: {}",
                        attempt + 1,
                        delay,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(ApiEmbedderError::Siumai(e.to_string())),
            }
        }
    }

    async fn embed_texts(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for batch in texts.chunks(self.config.batch_size) {
            embeddings.extend(self.request_with_retry(batch.to_vec()).await?);
        }
        Ok(embeddings)
    }
}

#[async_trait]
impl Embedder for ApiEmbedder {
    #[instrument(skip(self, text), fields(model = %self.config.model))]
    async fn embed(&self, text: &str) -> CoreResult<Vec<f32>> {
        let embeddings = self.embed_texts(vec![text.to_string()]).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| ApiEmbedderError::invalid_response("empty embedding response").into())
    }

    #[instrument(skip(self, texts), fields(model = %self.config.model, count = texts.len()))]
    async fn embed_batch(&self, texts: Vec<&str>) -> CoreResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let texts = texts.into_iter().map(ToString::to_string).collect();
        Ok(self.embed_texts(texts).await?)
    }

    fn dimension(&self) -> usize {
        self.config.dimension()
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }

    fn name(&self) -> &'static str {
        "ApiEmbedder"
    }
}
