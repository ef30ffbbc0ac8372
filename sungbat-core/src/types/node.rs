//! Indexed chunks and scored search hits.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::document::{Document, metadata_keys};

/// A chunk of a [`Document`], the unit stored in the vector index.
///
/// Chunks are created in bulk during ingestion, persisted alongside their
/// embedding and never mutated at query time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    /// Unique identifier for the chunk.
    pub id: Uuid,

    /// Chunk text, handed verbatim to the answer prompt.
    pub content: String,

    /// Metadata inherited from the source document plus `chunk_index`.
    pub metadata: HashMap<String, serde_json::Value>,

    /// Embedding vector; filled in during ingestion, not persisted in the
    /// docstore (the vectors live in the index file).
    #[serde(skip)]
    pub embedding: Option<Vec<f32>>,

    /// Document this chunk was cut from.
    pub source_document_id: Uuid,

    /// Position of the chunk inside the source document.
    pub chunk_info: ChunkInfo,
}

/// Where a chunk sits in its source document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkInfo {
    /// Byte offset of the first character.
    pub start_offset: usize,

    /// Byte offset one past the last character.
    pub end_offset: usize,

    /// 0-based chunk number within the document.
    pub chunk_index: usize,
}

/// A chunk returned by a similarity search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredNode {
    /// The matched chunk.
    pub node: Node,

    /// Cosine similarity, higher is closer.
    pub score: f32,
}

impl Node {
    /// Create a chunk of `document`, inheriting its metadata.
    pub fn from_document<S: Into<String>>(
        document: &Document,
        content: S,
        chunk_info: ChunkInfo,
    ) -> Self {
        let mut metadata = document.metadata.clone();
        metadata.insert(
            metadata_keys::CHUNK_INDEX.to_string(),
            serde_json::Value::from(chunk_info.chunk_index),
        );

        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            metadata,
            embedding: None,
            source_document_id: document.id,
            chunk_info,
        }
    }

    /// Create a bare chunk with no metadata.
    pub fn new<S: Into<String>>(content: S, source_document_id: Uuid, chunk_info: ChunkInfo) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            metadata: HashMap::new(),
            embedding: None,
            source_document_id,
            chunk_info,
        }
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

    /// Attach an embedding vector.
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Get a metadata value as a string.
    pub fn get_metadata_string(&self, key: &str) -> Option<String> {
        self.metadata.get(key)?.as_str().map(String::from)
    }

    /// File name of the source document, if recorded.
    pub fn filename(&self) -> Option<String> {
        self.get_metadata_string(metadata_keys::FILENAME)
    }
}

impl ChunkInfo {
    /// Create chunk position information.
    pub fn new(start_offset: usize, end_offset: usize, chunk_index: usize) -> Self {
        Self {
            start_offset,
            end_offset,
            chunk_index,
        }
    }

    /// Length of the chunk in bytes.
    pub fn len(&self) -> usize {
        self.end_offset.saturating_sub(self.start_offset)
    }

    /// Whether the chunk spans zero bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ScoredNode {
    /// Pair a chunk with its similarity score.
    pub fn new(node: Node, score: f32) -> Self {
        Self { node, score }
    }

    /// Chunk text.
    pub fn content(&self) -> &str {
        &self.node.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_inherits_document_metadata() {
        let doc = Document::new("Seksion 1. Ti Filipinas ket maysa a demokratiko a pagilian.")
            .with_metadata(metadata_keys::FILENAME, "konstitusion.txt");
        let node = Node::from_document(&doc, "Seksion 1.", ChunkInfo::new(0, 10, 2));

        assert_eq!(node.source_document_id, doc.id);
        assert_eq!(node.filename().as_deref(), Some("konstitusion.txt"));
        assert_eq!(node.metadata.get(metadata_keys::CHUNK_INDEX), Some(&serde_json::json!(2)));
        assert_eq!(node.chunk_info.len(), 10);
    }

    #[test]
    fn test_embedding_not_serialized() {
        let node = Node::new("text", Uuid::new_v4(), ChunkInfo::new(0, 4, 0))
            .with_embedding(vec![0.1, 0.2]);
        let json = serde_json::to_string(&node).unwrap();
        assert!(!json.contains("embedding"));

        let back: Node = serde_json::from_str(&json).unwrap();
        assert!(back.embedding.is_none());
        assert_eq!(back.content, "text");
    }
}
