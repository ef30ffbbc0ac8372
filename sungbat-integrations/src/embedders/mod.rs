//! Embedder implementations.

pub mod api;

pub use api::{ApiEmbedder, ApiEmbedderConfig};
