//! Wiring from [`AppConfig`] to a ready pipeline, and the ingestion entry
//! point.

use anyhow::Context;
use std::path::Path;
use std::sync::Arc;
use sungbat_core::{
    config::AppConfig,
    traits::{Embedder, LanguageModel, VectorStore},
};
use sungbat_indexing::{
    ChunkSplitter, DirectoryLoader, FolderInfo, IndexingError, IngestionPipeline, IngestionReport,
};
use sungbat_integrations::{ApiEmbedder, ApiEmbedderConfig, InMemoryVectorStore};
use sungbat_query::{BilingualQueryPipeline, LanguageDetector, SiumaiGenerator, VectorRetriever};
use tokio::sync::OnceCell;
use tracing::{error, info, warn};

static SHARED_PIPELINE: OnceCell<Arc<BilingualQueryPipeline>> = OnceCell::const_new();

/// Build the OpenAI embedder described by `config`.
pub fn build_embedder(config: &AppConfig) -> anyhow::Result<Arc<dyn Embedder>> {
    let embedder_config =
        ApiEmbedderConfig::from_embedder_config(&config.embedder, config.embedder_api_key()?);
    Ok(Arc::new(ApiEmbedder::new(embedder_config)?))
}

/// Build the production pipeline.
///
/// A missing credential is an error. A missing or unreadable index is not:
/// the pipeline is returned without one and answers every question with
/// an instruction to run ingestion.
pub async fn build_pipeline(config: &AppConfig) -> anyhow::Result<BilingualQueryPipeline> {
    config.validate()?;
    config.require_api_key()?;

    let llm = SiumaiGenerator::from_config(&config.llm)
        .await
        .context("Error initializing the language model")?;
    let embedder = build_embedder(config)?;

    Ok(assemble_pipeline(config, Arc::new(llm), embedder).await)
}

/// The process-wide pipeline, built from `config` on first use.
///
/// Later calls return the same instance whatever `config` they pass.
pub async fn shared_pipeline(config: &AppConfig) -> anyhow::Result<Arc<BilingualQueryPipeline>> {
    SHARED_PIPELINE
        .get_or_try_init(|| async { build_pipeline(config).await.map(Arc::new) })
        .await
        .cloned()
}

/// Put a pipeline together from already built providers, loading the index
/// from `config.vectorstore_path`.
pub async fn assemble_pipeline(
    config: &AppConfig,
    llm: Arc<dyn LanguageModel>,
    embedder: Arc<dyn Embedder>,
) -> BilingualQueryPipeline {
    let retriever = load_index(&config.vectorstore_path, embedder.dimension())
        .await
        .map(|store| VectorRetriever::new(embedder, store).with_top_k(config.top_k));

    let mut pipeline = BilingualQueryPipeline::new(llm, retriever);
    if let Some(markers) = &config.marker_tokens {
        pipeline = pipeline.with_detector(LanguageDetector::with_markers(markers.iter().cloned()));
    }
    pipeline
}

/// Load the persisted index in `dir`, or `None` if there is none or it
/// cannot be read.
pub async fn load_index(dir: &Path, expected_dimension: usize) -> Option<Arc<dyn VectorStore>> {
    if !InMemoryVectorStore::exists(dir) {
        warn!(
            "No vector index found in {}. Run `sungbat ingest` first.",
            dir.display()
        );
        return None;
    }

    match InMemoryVectorStore::load(dir).await {
        Ok(store) => {
            if store.dimension() != expected_dimension {
                warn!(
                    "Index dimension {} differs from embedder dimension {}",
                    store.dimension(),
                    expected_dimension
                );
            }
            Some(Arc::new(store))
        }
        Err(e) => {
            error!("Error loading vector store: {}", e);
            None
        }
    }
}

/// What an ingestion run found and produced.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    /// Supported files in the data folder.
    pub files_found: usize,
    /// Pipeline report.
    pub report: IngestionReport,
}

/// Index `config.data_folder` into `config.vectorstore_path` with the
/// OpenAI embedder.
///
/// The data folder is checked before the credential.
pub async fn ingest(config: &AppConfig) -> anyhow::Result<IngestOutcome> {
    config.validate()?;
    DirectoryLoader::new(&config.data_folder)?;
    config.require_api_key()?;
    let embedder = build_embedder(config)?;
    ingest_with(config, embedder).await
}

/// Index `config.data_folder` with the given embedder.
///
/// The new index takes its dimension from the first embedded batch.
pub async fn ingest_with(
    config: &AppConfig,
    embedder: Arc<dyn Embedder>,
) -> anyhow::Result<IngestOutcome> {
    let loader = DirectoryLoader::new(&config.data_folder)?;
    let files_found = loader.supported_files().await?.len();
    info!(
        "Ingesting {} file(s) from {}",
        files_found,
        config.data_folder.display()
    );

    let store = Arc::new(InMemoryVectorStore::with_inferred_dimension(
        config.distance_metric,
    ));
    let report = IngestionPipeline::builder()
        .directory(loader)
        .splitter(ChunkSplitter::new(config.chunk_size, config.chunk_overlap)?)
        .embedder(embedder)
        .vector_store(store)
        .batch_size(config.embedder.batch_size)
        .persist_to(&config.vectorstore_path)
        .build()?
        .run()
        .await?;

    Ok(IngestOutcome {
        files_found,
        report,
    })
}

/// How serious an [`Issue`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The chatbot cannot work until this is fixed.
    Blocking,
    /// The chatbot starts but will not answer from documents.
    Warning,
}

/// A problem found by [`check_environment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// How serious it is.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
}

impl Issue {
    fn blocking<S: Into<String>>(message: S) -> Self {
        Self {
            severity: Severity::Blocking,
            message: message.into(),
        }
    }

    fn warning<S: Into<String>>(message: S) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let icon = match self.severity {
            Severity::Blocking => "❌",
            Severity::Warning => "⚠️ ",
        };
        write!(f, "{icon} {}", self.message)
    }
}

/// Result of [`check_environment`].
#[derive(Debug, Clone, Default)]
pub struct EnvironmentReport {
    /// Problems found, in check order.
    pub issues: Vec<Issue>,
    /// Contents of the data folder, if it could be read.
    pub folder: Option<FolderInfo>,
    /// Whether a persisted index exists.
    pub index_present: bool,
}

impl EnvironmentReport {
    /// `true` when no blocking issue was found.
    pub fn is_ready(&self) -> bool {
        !self
            .issues
            .iter()
            .any(|issue| issue.severity == Severity::Blocking)
    }
}

/// Check the credential, the data folder and the index without contacting
/// any provider.
pub async fn check_environment(config: &AppConfig) -> EnvironmentReport {
    let mut report = EnvironmentReport::default();

    if config.require_api_key().is_err() {
        report.issues.push(Issue::blocking(format!(
            "{} environment variable not set",
            sungbat_core::config::API_KEY_ENV
        )));
    }
    if let Err(e) = config.validate() {
        report.issues.push(Issue::blocking(e.to_string()));
    }

    let data = config.data_folder.display();
    match DirectoryLoader::new(&config.data_folder) {
        Ok(loader) => match loader.folder_info().await {
            Ok(info) => {
                if loader.supported_files().await.map_or(true, |f| f.is_empty()) {
                    report.issues.push(Issue::warning(format!(
                        "'{data}' folder has no PDF, TXT or DOCX files"
                    )));
                }
                report.folder = Some(info);
            }
            Err(e) => report.issues.push(Issue::blocking(e.to_string())),
        },
        Err(IndexingError::DirectoryNotFound { .. }) => {
            report
                .issues
                .push(Issue::blocking(format!("'{data}' folder not found")));
        }
        Err(IndexingError::EmptyDirectory { .. }) => {
            report.issues.push(Issue::warning(format!(
                "'{data}' folder is empty - add some documents"
            )));
            report.folder = Some(FolderInfo::default());
        }
        Err(e) => report.issues.push(Issue::blocking(e.to_string())),
    }

    report.index_present = InMemoryVectorStore::exists(&config.vectorstore_path);
    if !report.index_present {
        report.issues.push(Issue::warning(format!(
            "No vector index in '{}' - run `sungbat ingest`",
            config.vectorstore_path.display()
        )));
    }

    report
}
