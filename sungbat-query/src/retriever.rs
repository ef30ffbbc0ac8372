//! Embedding-based chunk retrieval.

use std::sync::Arc;
use sungbat_core::{
    Result, ScoredNode, SungbatError,
    traits::{Embedder, VectorStore},
};
use tracing::{debug, instrument};

/// Default number of chunks retrieved per question.
pub const DEFAULT_TOP_K: usize = 5;

/// Embeds a question and looks up its nearest chunks.
#[derive(Debug, Clone)]
pub struct VectorRetriever {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
    top_k: usize,
}

impl VectorRetriever {
    /// Retriever returning [`DEFAULT_TOP_K`] chunks.
    pub fn new(embedder: Arc<dyn Embedder>, store: Arc<dyn VectorStore>) -> Self {
        Self {
            embedder,
            store,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Change how many chunks are returned.
    #[must_use]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Chunks returned per question.
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Backing index.
    pub fn store(&self) -> &Arc<dyn VectorStore> {
        &self.store
    }

    /// Up to `top_k` chunks, most similar first.
    #[instrument(skip(self), fields(top_k = self.top_k))]
    pub async fn retrieve(&self, query: &str) -> Result<Vec<ScoredNode>> {
        if self.top_k == 0 {
            return Err(SungbatError::validation("top_k must be positive"));
        }
        let embedding = self.embedder.embed(query).await?;
        let hits = self.store.search(&embedding, self.top_k).await?;
        debug!("Retrieved {} chunks", hits.len());
        Ok(hits)
    }
}
