//! # Sungbat Indexing
//!
//! Turns a folder of constitutional documents (PDF, TXT, DOCX) into a
//! searchable vector index:
//!
//! - [`DirectoryLoader`] / [`FileLoader`] extract text with file metadata
//! - [`ChunkSplitter`] cuts overlapping character chunks
//! - [`IngestionPipeline`] embeds the chunks, stores and persists them

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod loaders;
pub mod pipeline;
pub mod splitter;

pub use error::{IndexingError, Result};
pub use loaders::{DirectoryLoader, FileLoader, FolderInfo, SUPPORTED_EXTENSIONS, SourceFormat};
pub use pipeline::{IngestionPipeline, IngestionPipelineBuilder, IngestionReport};
pub use splitter::ChunkSplitter;

/// Common imports for ingestion code.
pub mod prelude {
    pub use crate::error::{IndexingError, Result};
    pub use crate::loaders::{DirectoryLoader, FileLoader, FolderInfo};
    pub use crate::pipeline::{IngestionPipeline, IngestionReport};
    pub use crate::splitter::ChunkSplitter;
    pub use sungbat_core::prelude::*;
}
