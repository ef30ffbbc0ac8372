//! Vector index abstraction.

use async_trait::async_trait;
use std::path::Path;
use uuid::Uuid;

use crate::{Node, Result, ScoredNode, SungbatError};

/// Stores chunk embeddings and answers nearest-neighbour queries.
///
/// Chunks keep the order in which they were added; a chunk's position is its
/// identity inside a persisted index.
#[async_trait]
pub trait VectorStore: Send + Sync + std::fmt::Debug {
    /// Add chunks; every chunk must carry an embedding.
    async fn add(&self, nodes: Vec<Node>) -> Result<Vec<Uuid>>;

    /// Return up to `top_k` chunks ordered by descending similarity to
    /// `embedding`. Ties keep insertion order.
    async fn search(&self, embedding: &[f32], top_k: usize) -> Result<Vec<ScoredNode>>;

    /// Number of stored chunks.
    async fn count(&self) -> Result<usize>;

    /// Write the index to `dir`, replacing whatever is there.
    async fn persist(&self, dir: &Path) -> Result<()> {
        Err(SungbatError::vector_store(format!(
            "{} cannot persist to {}",
            self.name(),
            dir.display()
        )))
    }

    /// Human readable component name for logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Similarity function used by a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Cosine similarity.
    #[default]
    Cosine,

    /// Raw dot product.
    DotProduct,
}
