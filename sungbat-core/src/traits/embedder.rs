//! Text embedding.

use async_trait::async_trait;

use crate::Result;

/// Turns text into fixed-length vectors.
///
/// The same embedder (same model, same dimension) must be used at ingestion
/// and at query time, otherwise similarity scores are meaningless.
#[async_trait]
pub trait Embedder: Send + Sync + std::fmt::Debug {
    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed several texts, returning vectors in input order.
    async fn embed_batch(&self, texts: Vec<&str>) -> Result<Vec<Vec<f32>>>;

    /// Length of the produced vectors.
    fn dimension(&self) -> usize;

    /// Provider-side model name.
    fn model_name(&self) -> &str;

    /// Human readable component name for logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
