//! Overlapping chunking of documents.

use sungbat_core::{ChunkInfo, Document, Node};
use text_splitter::{ChunkConfig, TextSplitter};
use tracing::debug;

use crate::error::{IndexingError, Result};

/// Splits documents into chunks of at most `chunk_size` characters, with
/// `chunk_overlap` characters shared between neighbours.
///
/// Splits prefer paragraph, then sentence, then word boundaries, the same
/// way a recursive character splitter does.
#[derive(Debug)]
pub struct ChunkSplitter {
    splitter: TextSplitter<text_splitter::Characters>,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl ChunkSplitter {
    /// Create a splitter; `chunk_overlap` must be smaller than `chunk_size`.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(IndexingError::configuration("chunk_size must be positive"));
        }
        let config = ChunkConfig::new(chunk_size)
            .with_overlap(chunk_overlap)
            .map_err(|e| IndexingError::text_splitting(e.to_string()))?;

        Ok(Self {
            splitter: TextSplitter::new(config),
            chunk_size,
            chunk_overlap,
        })
    }

    /// Maximum chunk length in characters.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Characters shared by consecutive chunks.
    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Split one document into chunks carrying its metadata.
    pub fn split_document(&self, document: &Document) -> Vec<Node> {
        self.splitter
            .chunk_indices(&document.content)
            .enumerate()
            .map(|(chunk_index, (offset, chunk))| {
                let info = ChunkInfo::new(offset, offset + chunk.len(), chunk_index);
                Node::from_document(document, chunk, info)
            })
            .collect()
    }

    /// Split every document, preserving document order.
    pub fn split_documents(&self, documents: &[Document]) -> Vec<Node> {
        let nodes: Vec<Node> = documents
            .iter()
            .flat_map(|doc| self.split_document(doc))
            .collect();
        debug!(
            "Split {} document(s) into {} chunk(s)",
            documents.len(),
            nodes.len()
        );
        nodes
    }
}
