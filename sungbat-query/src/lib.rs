//! # Sungbat Query
//!
//! Answers questions about the constitution in Ilocano and English through
//! a fixed three-stage pipeline over a per-question [`RequestState`]:
//!
//! 1. **Translate**: Ilocano questions (detected by [`LanguageDetector`])
//!    are translated to English for retrieval.
//! 2. **Retrieve**: [`VectorRetriever`] finds the closest chunks.
//! 3. **Generate**: the language model writes an Ilocano answer followed by
//!    an English translation.

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod generator;
pub mod language;
pub mod pipeline;
pub mod prompts;
pub mod retriever;
pub mod state;

pub use generator::SiumaiGenerator;
pub use language::{LanguageDetector, MARKER_TOKENS};
pub use pipeline::{
    BilingualQueryPipeline, NO_DOCUMENTS_CONTEXT, NO_INDEX_MESSAGE, RETRIEVAL_ERROR_CONTEXT, Reply,
};
pub use prompts::PromptTemplate;
pub use retriever::VectorRetriever;
pub use state::{PipelineStage, RequestState};

/// Common imports for query code.
pub mod prelude {
    pub use crate::{
        BilingualQueryPipeline, LanguageDetector, PipelineStage, Reply, RequestState,
        SiumaiGenerator, VectorRetriever,
    };
    pub use sungbat_core::prelude::*;
}
