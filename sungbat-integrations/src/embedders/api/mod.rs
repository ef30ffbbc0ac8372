//! Hosted embedding APIs.
//!
//! ```rust,no_run
//! use sungbat_integrations::embedders::api::{ApiEmbedder, ApiEmbedderConfig};
//! use sungbat_core::traits::Embedder;
//!
//! # async fn example() -> sungbat_core::Result<()> {
//! let embedder = ApiEmbedder::new(ApiEmbedderConfig::openai(
//!     "your-api-key",
//!     "text-embedding-ada-002",
//! ))?;
//! let vector = embedder.embed("Ania ti Artikulo III?").await?;
//! assert_eq!(vector.len(), embedder.dimension());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod embedder;
pub mod error;

pub use config::ApiEmbedderConfig;
pub use embedder::ApiEmbedder;
pub use error::{ApiEmbedderError, Result};
