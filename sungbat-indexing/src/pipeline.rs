//! Load → split → embed → store → persist.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use sungbat_core::traits::{Embedder, Loader, VectorStore};
use sungbat_core::Node;
use tracing::{info, instrument};

use crate::error::{IndexingError, Result};
use crate::loaders::DirectoryLoader;
use crate::splitter::ChunkSplitter;

/// Outcome of an ingestion run.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestionReport {
    /// Documents produced by the loader (PDF pages count separately).
    pub documents_loaded: usize,
    /// Chunks embedded and stored.
    pub chunks_indexed: usize,
    /// Where the index was written, if persistence was requested.
    pub index_path: Option<PathBuf>,
    /// Wall-clock time of the run.
    pub duration: Duration,
}

/// Builds a vector index from a data folder.
///
/// ```rust,no_run
/// # use std::sync::Arc;
/// # use sungbat_core::{Embedder, VectorStore};
/// # async fn demo(embedder: Arc<dyn Embedder>, store: Arc<dyn VectorStore>) -> sungbat_indexing::Result<()> {
/// use sungbat_indexing::{ChunkSplitter, DirectoryLoader, IngestionPipeline};
///
/// let report = IngestionPipeline::builder()
///     .directory(DirectoryLoader::new("data")?)
///     .splitter(ChunkSplitter::new(1000, 200)?)
///     .embedder(embedder)
///     .vector_store(store)
///     .persist_to("vectorstore")
///     .build()?
///     .run()
///     .await?;
/// println!("indexed {} chunks", report.chunks_indexed);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct IngestionPipeline {
    loader: Arc<dyn Loader>,
    splitter: ChunkSplitter,
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
    batch_size: usize,
    persist_dir: Option<PathBuf>,
    source_label: String,
}

impl IngestionPipeline {
    /// Start a builder.
    pub fn builder() -> IngestionPipelineBuilder {
        IngestionPipelineBuilder::default()
    }

    /// Run the whole ingestion.
    ///
    /// Fails if the loader produces no documents or any embedding/storage
    /// step fails; nothing is persisted in that case.
    #[instrument(skip(self), fields(source = %self.source_label))]
    pub async fn run(&self) -> Result<IngestionReport> {
        let started = Instant::now();

        let documents = self.loader.load().await?;
        if documents.is_empty() {
            return Err(IndexingError::NoDocuments {
                path: self.source_label.clone(),
            });
        }
        info!("Loaded {} documents", documents.len());

        let nodes = self.splitter.split_documents(&documents);
        info!("Created {} chunks", nodes.len());

        let nodes = self.embed_nodes(nodes).await?;
        self.store.add(nodes).await?;
        let chunks_indexed = self.store.count().await?;

        if let Some(dir) = &self.persist_dir {
            self.store.persist(dir).await?;
            info!("Vector store saved to {}", dir.display());
        }

        Ok(IngestionReport {
            documents_loaded: documents.len(),
            chunks_indexed,
            index_path: self.persist_dir.clone(),
            duration: started.elapsed(),
        })
    }

    async fn embed_nodes(&self, nodes: Vec<Node>) -> Result<Vec<Node>> {
        let mut embedded = Vec::with_capacity(nodes.len());
        let total = nodes.len();

        for batch in nodes.chunks(self.batch_size) {
            let texts: Vec<&str> = batch.iter().map(|n| n.content.as_str()).collect();
            let vectors = self.embedder.embed_batch(texts).await?;
            if vectors.len() != batch.len() {
                return Err(sungbat_core::SungbatError::embedding(format!(
                    "expected {} embeddings, got {}",
                    batch.len(),
                    vectors.len()
                ))
                .into());
            }
            embedded.extend(
                batch
                    .iter()
                    .cloned()
                    .zip(vectors)
                    .map(|(node, vector)| node.with_embedding(vector)),
            );
            info!("Embedded {}/{} chunks", embedded.len(), total);
        }

        Ok(embedded)
    }
}

/// Builder for [`IngestionPipeline`].
#[derive(Debug, Default)]
pub struct IngestionPipelineBuilder {
    loader: Option<Arc<dyn Loader>>,
    splitter: Option<ChunkSplitter>,
    embedder: Option<Arc<dyn Embedder>>,
    store: Option<Arc<dyn VectorStore>>,
    batch_size: Option<usize>,
    persist_dir: Option<PathBuf>,
    source_label: Option<String>,
}

impl IngestionPipelineBuilder {
    /// Set the document loader.
    pub fn loader(mut self, loader: Arc<dyn Loader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Load from a data folder.
    pub fn directory(mut self, loader: DirectoryLoader) -> Self {
        self.source_label = Some(loader.path().display().to_string());
        self.loader(Arc::new(loader))
    }

    /// Set the chunk splitter.
    pub fn splitter(mut self, splitter: ChunkSplitter) -> Self {
        self.splitter = Some(splitter);
        self
    }

    /// Set the embedder.
    pub fn embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the vector store that receives the chunks.
    pub fn vector_store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Chunks per embedding request.
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    /// Persist the store into `dir` after indexing.
    pub fn persist_to<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.persist_dir = Some(dir.into());
        self
    }

    /// Build the pipeline.
    pub fn build(self) -> Result<IngestionPipeline> {
        let loader = self
            .loader
            .ok_or_else(|| IndexingError::configuration("Loader is required"))?;
        let embedder = self
            .embedder
            .ok_or_else(|| IndexingError::configuration("Embedder is required"))?;
        let store = self
            .store
            .ok_or_else(|| IndexingError::configuration("Vector store is required"))?;
        let splitter = match self.splitter {
            Some(splitter) => splitter,
            None => ChunkSplitter::new(1000, 200)?,
        };
        let batch_size = self.batch_size.unwrap_or(100);
        if batch_size == 0 {
            return Err(IndexingError::configuration("batch_size must be positive"));
        }

        Ok(IngestionPipeline {
            source_label: self
                .source_label
                .unwrap_or_else(|| loader.name().to_string()),
            loader,
            splitter,
            embedder,
            store,
            batch_size,
            persist_dir: self.persist_dir,
        })
    }
}
