//! # Sungbat
//!
//! Bilingual Ilocano/English question answering over the Philippine
//! Constitution. Questions in Ilocano are translated for retrieval, the
//! closest passages are looked up in a local vector index, and the answer
//! comes back in Ilocano with an English translation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sungbat::prelude::*;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = AppConfig::load(None)?;
//! let pipeline = sungbat::app::build_pipeline(&config).await?;
//! let mut session = ChatSession::new(Arc::new(pipeline));
//! println!("{}", session.send("Ania dagiti kalintegan ti tao?").await);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **sungbat-core**: errors, document types, provider traits, configuration
//! - **sungbat-indexing**: loaders, chunking, index building
//! - **sungbat-query**: language detection, prompts, the query pipeline
//! - **sungbat-integrations**: OpenAI embeddings, in-memory vector index

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export all public APIs from sub-crates
pub use sungbat_core as core;
pub use sungbat_indexing as indexing;
pub use sungbat_integrations as integrations;
pub use sungbat_query as query;

pub mod app;
pub mod logging;
pub mod session;

/// Common imports for applications built on Sungbat.
pub mod prelude {
    pub use crate::session::{ChatSession, ChatTurn, Role, format_sources};
    pub use sungbat_core::prelude::*;
    pub use sungbat_query::{BilingualQueryPipeline, Reply};
}

/// Version of the Sungbat crates.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
