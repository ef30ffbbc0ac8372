//! Per-question pipeline state.

use serde::Serialize;
use sungbat_core::ScoredNode;

/// Stage a [`RequestState`] has reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum PipelineStage {
    /// Only the question is set.
    Created,
    /// `translated_query` is set.
    Translated,
    /// `context` and `source_docs` are set.
    Retrieved,
    /// `answer` is set.
    Answered,
}

/// Everything one question accumulates on its way through the pipeline.
///
/// Each field is written by exactly one stage, in stage order, and the
/// state is dropped once the answer has been handed back.
#[derive(Debug, Clone, Serialize)]
pub struct RequestState {
    /// The user's question, as typed.
    pub query: String,
    /// English form of `query`, used for retrieval.
    pub translated_query: String,
    /// Retrieved chunk texts joined by a blank line, or a placeholder.
    pub context: String,
    /// Final bilingual answer or error text.
    pub answer: String,
    /// Retrieved chunks, most similar first.
    pub source_docs: Vec<ScoredNode>,
    /// Last completed stage.
    pub stage: PipelineStage,
}

impl RequestState {
    /// Fresh state for `query`.
    pub fn new<S: Into<String>>(query: S) -> Self {
        Self {
            query: query.into(),
            translated_query: String::new(),
            context: String::new(),
            answer: String::new(),
            source_docs: Vec::new(),
            stage: PipelineStage::Created,
        }
    }
}
