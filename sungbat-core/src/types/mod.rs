//! Data types flowing through ingestion and querying.

pub mod document;
pub mod node;

pub use document::{Document, DocumentBuilder, metadata_keys};
pub use node::{ChunkInfo, Node, ScoredNode};
