//! In-memory vector index with directory persistence.
//!
//! The whole index lives in memory and is searched exhaustively, which is
//! plenty for a few thousand constitution chunks. On disk it is two files:
//! `index.bin` (bincode vectors) and `docstore.json` (chunk text and
//! metadata), kept in the same order.

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use sungbat_core::{
    Result, SungbatError,
    traits::{DistanceMetric, VectorStore},
    types::{Node, ScoredNode},
};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// File holding the embedding vectors.
pub const INDEX_FILE: &str = "index.bin";
/// File holding chunk text and metadata.
pub const DOCSTORE_FILE: &str = "docstore.json";

#[derive(Debug, Default)]
struct Entries {
    nodes: Vec<Node>,
    vectors: Vec<Vec<f32>>,
}

#[derive(Serialize, Deserialize)]
struct PersistedIndex {
    dimension: usize,
    metric: DistanceMetric,
    vectors: Vec<Vec<f32>>,
}

/// Exhaustive-search vector store.
///
/// The vector length is either fixed up front or taken from the first
/// vector added, after which every vector must match it.
#[derive(Debug)]
pub struct InMemoryVectorStore {
    dimension: OnceCell<usize>,
    distance_metric: DistanceMetric,
    entries: RwLock<Entries>,
}

impl InMemoryVectorStore {
    /// Create an empty store for vectors of length `dimension`.
    pub fn new(dimension: usize, distance_metric: DistanceMetric) -> Self {
        debug!(
            "Creating InMemoryVectorStore with dimension {} and metric {:?}",
            dimension, distance_metric
        );
        Self {
            dimension: OnceCell::with_value(dimension),
            distance_metric,
            entries: RwLock::new(Entries::default()),
        }
    }

    /// Create an empty store whose dimension is set by the first vector
    /// added.
    pub fn with_inferred_dimension(distance_metric: DistanceMetric) -> Self {
        debug!(
            "Creating InMemoryVectorStore with inferred dimension and metric {:?}",
            distance_metric
        );
        Self {
            dimension: OnceCell::new(),
            distance_metric,
            entries: RwLock::new(Entries::default()),
        }
    }

    /// Vector length accepted by the store; 0 until it is known.
    pub fn dimension(&self) -> usize {
        self.dimension.get().copied().unwrap_or(0)
    }

    /// Similarity function.
    pub fn distance_metric(&self) -> DistanceMetric {
        self.distance_metric
    }

    /// Paths of the two index files inside `dir`.
    pub fn index_files(dir: &Path) -> (PathBuf, PathBuf) {
        (dir.join(INDEX_FILE), dir.join(DOCSTORE_FILE))
    }

    /// Whether `dir` holds a persisted index.
    pub fn exists(dir: &Path) -> bool {
        let (index, docstore) = Self::index_files(dir);
        index.is_file() && docstore.is_file()
    }

    /// Load a store persisted with [`VectorStore::persist`].
    pub async fn load(dir: &Path) -> Result<Self> {
        let (index_path, docstore_path) = Self::index_files(dir);
        if !Self::exists(dir) {
            return Err(SungbatError::not_found(format!(
                "vector index in {}",
                dir.display()
            )));
        }

        let index_bytes = tokio::fs::read(&index_path).await?;
        let index: PersistedIndex = bincode::deserialize(&index_bytes).map_err(|e| {
            SungbatError::vector_store(format!("Corrupt {}: {e}", index_path.display()))
        })?;
        let docstore = tokio::fs::read(&docstore_path).await?;
        let nodes: Vec<Node> = serde_json::from_slice(&docstore).map_err(|e| {
            SungbatError::vector_store(format!("Corrupt {}: {e}", docstore_path.display()))
        })?;

        if nodes.len() != index.vectors.len() {
            return Err(SungbatError::vector_store(format!(
                "Index holds {} vectors but docstore holds {} chunks",
                index.vectors.len(),
                nodes.len()
            )));
        }
        if let Some(bad) = index.vectors.iter().position(|v| v.len() != index.dimension) {
            return Err(SungbatError::vector_store(format!(
                "Vector {bad} does not have dimension {}",
                index.dimension
            )));
        }

        info!(
            "Loaded vector index with {} chunks from {}",
            nodes.len(),
            dir.display()
        );
        Ok(Self {
            dimension: OnceCell::with_value(index.dimension),
            distance_metric: index.metric,
            entries: RwLock::new(Entries {
                nodes,
                vectors: index.vectors,
            }),
        })
    }

    fn similarity(&self, a: &[f32], b: &[f32]) -> f32 {
        match self.distance_metric {
            DistanceMetric::Cosine => cosine_similarity(a, b),
            DistanceMetric::DotProduct => dot_product(a, b),
        }
    }

    fn validate_vector(&self, vector: &[f32]) -> Result<()> {
        if vector.is_empty() {
            return Err(SungbatError::validation("Vector cannot be empty"));
        }
        let expected = *self.dimension.get_or_init(|| vector.len());
        if vector.len() != expected {
            return Err(SungbatError::validation(format!(
                "Vector dimension {} does not match store dimension {}",
                vector.len(),
                expected
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn add(&self, nodes: Vec<Node>) -> Result<Vec<Uuid>> {
        let mut prepared = Vec::with_capacity(nodes.len());
        for mut node in nodes {
            let vector = node.embedding.take().ok_or_else(|| {
                SungbatError::validation("Node must have an embedding to be stored")
            })?;
            self.validate_vector(&vector)?;
            prepared.push((node, vector));
        }

        let mut entries = self.entries.write().await;
        let ids = prepared.iter().map(|(node, _)| node.id).collect::<Vec<_>>();
        for (node, vector) in prepared {
            entries.nodes.push(node);
            entries.vectors.push(vector);
        }

        debug!("Added {} chunks, store now holds {}", ids.len(), entries.nodes.len());
        Ok(ids)
    }

    async fn search(&self, embedding: &[f32], top_k: usize) -> Result<Vec<ScoredNode>> {
        if self.dimension.get().is_none() {
            return Ok(Vec::new());
        }
        self.validate_vector(embedding)?;
        let entries = self.entries.read().await;

        let mut scored: Vec<(usize, f32)> = entries
            .vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (i, self.similarity(embedding, v)))
            .collect();
        // Stable sort keeps insertion order for equal scores.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(top_k);

        debug!("Search returned {} of {} chunks", scored.len(), entries.nodes.len());
        Ok(scored
            .into_iter()
            .map(|(i, score)| ScoredNode::new(entries.nodes[i].clone(), score))
            .collect())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.entries.read().await.nodes.len())
    }

    async fn persist(&self, dir: &Path) -> Result<()> {
        let entries = self.entries.read().await;
        tokio::fs::create_dir_all(dir).await?;

        let index = PersistedIndex {
            dimension: self.dimension(),
            metric: self.distance_metric,
            vectors: entries.vectors.clone(),
        };
        let index_bytes = bincode::serialize(&index)
            .map_err(|e| SungbatError::vector_store(format!("Failed to encode index: {e}")))?;
        let docstore = serde_json::to_vec(&entries.nodes)?;

        let (index_path, docstore_path) = Self::index_files(dir);
        tokio::fs::write(&index_path, index_bytes).await?;
        tokio::fs::write(&docstore_path, docstore).await?;

        info!(
            "Persisted {} chunks to {}",
            entries.nodes.len(),
            dir.display()
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "InMemoryVectorStore"
    }
}

/// Cosine similarity; zero vectors score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot = dot_product(a, b);
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
