//! Documents produced by loaders, before splitting.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use uuid::Uuid;

/// Metadata keys written by the loaders and read by the chat front end.
pub mod metadata_keys {
    /// Full path of the source file.
    pub const SOURCE: &str = "source";
    /// File name without directories.
    pub const FILENAME: &str = "filename";
    /// Extension as written, including the leading dot, e.g. `.PDF`.
    pub const FILE_TYPE: &str = "file_type";
    /// 1-based page number, PDFs only.
    pub const PAGE: &str = "page";
    /// Position of a chunk within its document.
    pub const CHUNK_INDEX: &str = "chunk_index";
}

/// Raw text loaded from one source file (or one PDF page).
///
/// ```rust
/// use sungbat_core::types::Document;
///
/// let doc = Document::builder()
///     .content("Article II, Section 1. The Philippines is a democratic and republican State.")
///     .metadata("filename", "constitution.txt")
///     .build();
/// assert_eq!(doc.get_metadata_string("filename").as_deref(), Some("constitution.txt"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier for the document.
    pub id: Uuid,

    /// Extracted text.
    pub content: String,

    /// Source metadata, see [`metadata_keys`].
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Document {
    /// Create a document with fresh id and no metadata.
    pub fn new<S: Into<String>>(content: S) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            metadata: HashMap::new(),
        }
    }

    /// Start a [`DocumentBuilder`].
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::new()
    }

    /// Create a document carrying the standard file metadata for `path`.
    pub fn from_file<S: Into<String>>(path: &Path, content: S) -> Self {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_type = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        Self::new(content)
            .with_metadata(metadata_keys::SOURCE, path.to_string_lossy().into_owned())
            .with_metadata(metadata_keys::FILENAME, filename)
            .with_metadata(metadata_keys::FILE_TYPE, file_type)
    }

    /// Add or replace a metadata entry.
    pub fn with_metadata<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Get metadata value by key.
    pub fn get_metadata(&self, key: &str) -> Option<&serde_json::Value> {
        self.metadata.get(key)
    }

    /// Get a metadata value as a string.
    pub fn get_metadata_string(&self, key: &str) -> Option<String> {
        self.metadata.get(key)?.as_str().map(String::from)
    }

    /// Whether the extracted text is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Fluent builder for [`Document`].
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    id: Option<Uuid>,
    content: Option<String>,
    metadata: HashMap<String, serde_json::Value>,
}

impl DocumentBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document id.
    pub fn id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the document text.
    pub fn content<S: Into<String>>(mut self, content: S) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Add a metadata entry.
    pub fn metadata<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Build the document; missing content becomes an empty string.
    pub fn build(self) -> Document {
        Document {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            content: self.content.unwrap_or_default(),
            metadata: self.metadata,
        }
    }
}
