//! Application-level configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! environment variables. Command line flags are applied on top by the
//! binary.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{EmbedderConfig, LlmConfig};
use crate::{Result, SungbatError, traits::DistanceMetric};

/// Environment variable holding the provider credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Environment variable overriding the provider endpoint.
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
/// Environment variable overriding the chat model.
pub const MODEL_ENV: &str = "SUNGBAT_MODEL";
/// Environment variable overriding the embedding model.
pub const EMBEDDING_MODEL_ENV: &str = "SUNGBAT_EMBEDDING_MODEL";
/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "sungbat.toml";

/// Everything needed to ingest documents and answer questions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Folder holding the source PDF/TXT/DOCX files.
    pub data_folder: PathBuf,

    /// Directory of the persisted vector index.
    pub vectorstore_path: PathBuf,

    /// Directory for daily log files.
    pub log_dir: PathBuf,

    /// Chunk length in characters.
    pub chunk_size: usize,

    /// Characters shared by consecutive chunks.
    pub chunk_overlap: usize,

    /// Chunks retrieved per question.
    pub top_k: usize,

    /// Similarity used by a newly built index (`cosine` or `dot_product`).
    /// A loaded index keeps the metric it was built with.
    pub distance_metric: DistanceMetric,

    /// Replacement marker tokens for language detection.
    pub marker_tokens: Option<Vec<String>>,

    /// Chat model settings.
    pub llm: LlmConfig,

    /// Embedding model settings.
    pub embedder: EmbedderConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_folder: PathBuf::from("data"),
            vectorstore_path: PathBuf::from("vectorstore"),
            log_dir: PathBuf::from("logs"),
            chunk_size: 1000,
            chunk_overlap: 200,
            top_k: 5,
            distance_metric: DistanceMetric::Cosine,
            marker_tokens: None,
            llm: LlmConfig::default(),
            embedder: EmbedderConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load defaults, the TOML file at `path` (or `sungbat.toml` if present),
    /// then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SungbatError::configuration(format!("Cannot read {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply environment overrides through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(API_KEY_ENV) {
            self.llm.api_key = Some(key.clone());
            if self.embedder.api_key.is_none() {
                self.embedder.api_key = Some(key);
            }
        }
        if let Some(url) = non_empty(BASE_URL_ENV) {
            self.llm.base_url = Some(url.clone());
            if self.embedder.base_url.is_none() {
                self.embedder.base_url = Some(url);
            }
        }
        if let Some(model) = non_empty(MODEL_ENV) {
            self.llm.model = model;
        }
        if let Some(model) = non_empty(EMBEDDING_MODEL_ENV) {
            self.embedder.model = model;
        }
    }

    /// The provider credential, or a configuration error naming the
    /// variable to set.
    pub fn require_api_key(&self) -> Result<&str> {
        self.llm
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                SungbatError::configuration(format!(
                    "{API_KEY_ENV} is not set; add it to the environment or a .env file"
                ))
            })
    }

    /// The embedding credential, falling back to the chat credential.
    pub fn embedder_api_key(&self) -> Result<&str> {
        match self.embedder.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => self.require_api_key(),
        }
    }

    /// Create the data and index folders if they are missing.
    pub fn ensure_directories(&self) -> Result<()> {
        for dir in [&self.data_folder, &self.vectorstore_path] {
            if !dir.exists() {
                std::fs::create_dir_all(dir)?;
                debug!("Created directory {}", dir.display());
            }
        }
        Ok(())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(SungbatError::configuration("chunk_size must be positive"));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(SungbatError::configuration(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        if self.top_k == 0 {
            return Err(SungbatError::configuration("top_k must be positive"));
        }
        if let Some(markers) = &self.marker_tokens {
            if markers.iter().all(|m| m.trim().is_empty()) {
                return Err(SungbatError::configuration(
                    "marker_tokens must contain at least one token",
                ));
            }
        }
        self.llm.validate()?;
        self.embedder.validate()
    }
}
