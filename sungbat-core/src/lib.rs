//! # Sungbat Core
//!
//! Shared building blocks for the Sungbat bilingual (Ilocano/English)
//! constitution question-answering service:
//!
//! - **Data structures**: [`Document`], [`Node`], [`ScoredNode`]
//! - **Provider seams**: [`Embedder`], [`LanguageModel`], [`VectorStore`], [`Loader`]
//! - **Configuration**: [`config::AppConfig`] and its LLM/embedder sections
//! - **Error handling**: [`SungbatError`] and the [`Result`] alias

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod prelude;

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use error::{Result, SungbatError};
pub use types::{ChunkInfo, Document, Node, ScoredNode};

pub use traits::*;

/// Version of the core library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
