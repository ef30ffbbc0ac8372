//! Document loading.

use async_trait::async_trait;

use crate::{Document, Result};

/// Produces documents from some source.
#[async_trait]
pub trait Loader: Send + Sync + std::fmt::Debug {
    /// Load every document the source provides.
    async fn load(&self) -> Result<Vec<Document>>;

    /// Human readable component name for logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
