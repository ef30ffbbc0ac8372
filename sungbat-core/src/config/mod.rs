//! Configuration types.
//!
//! All structs deserialize with `#[serde(default)]`, so a config file only
//! needs the keys it changes.

pub mod app;
pub mod embedder;
pub mod llm;

pub use app::*;
pub use embedder::*;
pub use llm::*;
