//! Vector store implementations.

pub mod memory;

pub use memory::InMemoryVectorStore;
