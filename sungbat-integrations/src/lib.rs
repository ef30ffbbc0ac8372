//! # Sungbat Integrations
//!
//! Concrete providers behind the core traits:
//!
//! - [`ApiEmbedder`]: OpenAI embeddings via `siumai`, batched and retried
//! - [`InMemoryVectorStore`]: exhaustive cosine search, persisted as
//!   `index.bin` + `docstore.json`

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod embedders;
pub mod vector_stores;

pub use embedders::{ApiEmbedder, ApiEmbedderConfig};
pub use vector_stores::InMemoryVectorStore;
