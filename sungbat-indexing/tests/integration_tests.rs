//! End-to-end ingestion tests: folder → chunks → embedded → persisted index.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use sungbat_core::traits::{DistanceMetric, Embedder, VectorStore};
use sungbat_core::types::metadata_keys;
use sungbat_core::{Result as CoreResult, SungbatError};
use sungbat_indexing::{ChunkSplitter, DirectoryLoader, IndexingError, IngestionPipeline};
use sungbat_integrations::InMemoryVectorStore;
use tempfile::TempDir;

const DIM: usize = 8;

/// Deterministic bag-of-bytes embedder.
#[derive(Debug, Default)]
struct ByteEmbedder {
    calls: AtomicUsize,
}

fn byte_vector(text: &str) -> Vec<f32> {
    let mut v = vec![0.0; DIM];
    for b in text.bytes() {
        v[usize::from(b) % DIM] += 1.0;
    }
    v
}

#[async_trait]
impl Embedder for ByteEmbedder {
    async fn embed(&self, text: &str) -> CoreResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(byte_vector(text))
    }

    async fn embed_batch(&self, texts: Vec<&str>) -> CoreResult<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.into_iter().map(byte_vector).collect())
    }

    fn dimension(&self) -> usize {
        DIM
    }

    fn model_name(&self) -> &str {
        "byte-embedder"
    }
}

#[derive(Debug)]
struct BrokenEmbedder;

#[async_trait]
impl Embedder for BrokenEmbedder {
    async fn embed(&self, _text: &str) -> CoreResult<Vec<f32>> {
        Err(SungbatError::embedding("provider down"))
    }

    async fn embed_batch(&self, _texts: Vec<&str>) -> CoreResult<Vec<Vec<f32>>> {
        Err(SungbatError::embedding("provider down"))
    }

    fn dimension(&self) -> usize {
        DIM
    }

    fn model_name(&self) -> &str {
        "broken"
    }
}

fn data_folder() -> TempDir {
    let dir = TempDir::new().unwrap();
    let article = (1..=30)
        .map(|n| format!("Seksion {n}. Amin a tattao ket addaan iti kalintegan a maipapan iti biag, wayawaya ken sanikua."))
        .collect::<Vec<_>>()
        .join("\n\n");
    std::fs::write(dir.path().join("artikulo-iii.txt"), article).unwrap();
    std::fs::write(dir.path().join("preamble.txt"), "We, the sovereign Filipino people...").unwrap();
    std::fs::write(dir.path().join("image.png"), [0u8; 16]).unwrap();
    dir
}

#[tokio::test]
async fn test_ingest_and_reload() {
    let data = data_folder();
    let index_dir = TempDir::new().unwrap();
    let embedder = Arc::new(ByteEmbedder::default());
    let store = Arc::new(InMemoryVectorStore::new(DIM, DistanceMetric::Cosine));

    let report = IngestionPipeline::builder()
        .directory(DirectoryLoader::new(data.path()).unwrap())
        .splitter(ChunkSplitter::new(300, 60).unwrap())
        .embedder(embedder.clone())
        .vector_store(store.clone())
        .batch_size(4)
        .persist_to(index_dir.path())
        .build()
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(report.documents_loaded, 2);
    assert!(report.chunks_indexed > 2);
    assert_eq!(report.index_path.as_deref(), Some(index_dir.path()));
    assert_eq!(
        embedder.calls.load(Ordering::SeqCst),
        report.chunks_indexed.div_ceil(4)
    );

    let loaded = InMemoryVectorStore::load(index_dir.path()).await.unwrap();
    assert_eq!(loaded.count().await.unwrap(), report.chunks_indexed);

    let hits = loaded
        .search(&byte_vector("We, the sovereign Filipino people..."), 1)
        .await
        .unwrap();
    assert_eq!(
        hits[0].node.get_metadata_string(metadata_keys::FILENAME).as_deref(),
        Some("preamble.txt")
    );
    assert_eq!(
        hits[0].node.get_metadata_string(metadata_keys::FILE_TYPE).as_deref(),
        Some(".txt")
    );
}

#[tokio::test]
async fn test_folder_without_supported_files_fails() {
    let data = TempDir::new().unwrap();
    std::fs::write(data.path().join("notes.md"), "# notes").unwrap();
    let index_dir = TempDir::new().unwrap();

    let err = IngestionPipeline::builder()
        .directory(DirectoryLoader::new(data.path()).unwrap())
        .embedder(Arc::new(ByteEmbedder::default()))
        .vector_store(Arc::new(InMemoryVectorStore::new(DIM, DistanceMetric::Cosine)))
        .persist_to(index_dir.path())
        .build()
        .unwrap()
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, IndexingError::NoDocuments { .. }));
    assert!(!InMemoryVectorStore::exists(index_dir.path()));
}

#[tokio::test]
async fn test_embedding_failure_persists_nothing() {
    let data = data_folder();
    let index_dir = TempDir::new().unwrap();

    let result = IngestionPipeline::builder()
        .directory(DirectoryLoader::new(data.path()).unwrap())
        .embedder(Arc::new(BrokenEmbedder))
        .vector_store(Arc::new(InMemoryVectorStore::new(DIM, DistanceMetric::Cosine)))
        .persist_to(index_dir.path())
        .build()
        .unwrap()
        .run()
        .await;

    assert!(matches!(result, Err(IndexingError::Core(SungbatError::Embedding { .. }))));
    assert!(!InMemoryVectorStore::exists(index_dir.path()));
}

#[test]
fn test_builder_requires_components() {
    let err = IngestionPipeline::builder()
        .embedder(Arc::new(ByteEmbedder::default()))
        .build()
        .unwrap_err();
    assert!(matches!(err, IndexingError::Configuration { .. }));
}
