//! Common imports.
//!
//! ```rust
//! use sungbat_core::prelude::*;
//!
//! let doc = Document::new("Ti Konstitusion ti kangatuan a linteg.");
//! assert!(!doc.is_blank());
//! ```

pub use crate::config::{AppConfig, EmbedderConfig, LlmConfig};
pub use crate::error::{Result, SungbatError};
pub use crate::traits::{DistanceMetric, Embedder, LanguageModel, Loader, ModelInfo, VectorStore};
pub use crate::types::{ChunkInfo, Document, DocumentBuilder, Node, ScoredNode, metadata_keys};
