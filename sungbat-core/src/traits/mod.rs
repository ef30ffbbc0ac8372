//! Seams between the pipeline and its providers.

pub mod embedder;
pub mod llm;
pub mod loader;
pub mod storage;

pub use embedder::Embedder;
pub use llm::{LanguageModel, ModelInfo};
pub use loader::Loader;
pub use storage::{DistanceMetric, VectorStore};
