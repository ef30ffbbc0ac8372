//! Translate → Retrieve → Generate.
//!
//! Provider failures inside a stage are absorbed by that stage and replaced
//! with a fallback value, so later stages always run. Anything else that
//! goes wrong, panics included, is caught by [`BilingualQueryPipeline::query`]
//! and returned as text.

use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use sungbat_core::{Result, ScoredNode, traits::LanguageModel};
use tracing::{error, info, instrument, warn};

use crate::language::LanguageDetector;
use crate::prompts;
use crate::retriever::VectorRetriever;
use crate::state::{PipelineStage, RequestState};

/// Returned by [`BilingualQueryPipeline::query`] when no index was loaded.
pub const NO_INDEX_MESSAGE: &str = "Vector store not loaded. Please run `sungbat ingest` first.";
/// Context used when the pipeline has no index.
pub const NO_DOCUMENTS_CONTEXT: &str = "No documents available. Please run `sungbat ingest` first.";
/// Context used when retrieval fails.
pub const RETRIEVAL_ERROR_CONTEXT: &str = "Error retrieving documents.";
/// Separator between retrieved chunks in the context.
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// The bilingual question-answering pipeline.
///
/// ```rust,no_run
/// # use std::sync::Arc;
/// # use sungbat_core::traits::LanguageModel;
/// # use sungbat_query::{BilingualQueryPipeline, VectorRetriever};
/// # async fn example(llm: Arc<dyn LanguageModel>, retriever: VectorRetriever) {
/// let pipeline = BilingualQueryPipeline::new(llm, Some(retriever));
/// let answer = pipeline.query("Ania dagiti kalintegan ti tao?").await;
/// println!("{answer}");
/// # }
/// ```
#[derive(Debug)]
pub struct BilingualQueryPipeline {
    llm: Arc<dyn LanguageModel>,
    retriever: Option<VectorRetriever>,
    detector: LanguageDetector,
}

impl BilingualQueryPipeline {
    /// Create a pipeline; `retriever` is `None` when no index could be
    /// loaded.
    pub fn new(llm: Arc<dyn LanguageModel>, retriever: Option<VectorRetriever>) -> Self {
        Self {
            llm,
            retriever,
            detector: LanguageDetector::default(),
        }
    }

    /// Replace the language detector.
    #[must_use]
    pub fn with_detector(mut self, detector: LanguageDetector) -> Self {
        self.detector = detector;
        self
    }

    /// Whether an index is available.
    pub fn has_index(&self) -> bool {
        self.retriever.is_some()
    }

    /// Language model used by the translate and generate stages.
    pub fn llm(&self) -> &Arc<dyn LanguageModel> {
        &self.llm
    }

    /// Fill `translated_query`.
    ///
    /// English input is copied through without a model call. On a provider
    /// error the original question is used.
    #[instrument(skip(self, state))]
    pub async fn translate(&self, state: &mut RequestState) -> Result<()> {
        if self.detector.requires_translation(&state.query) {
            let prompt = prompts::translation_prompt(&state.query)?;
            state.translated_query = match self.llm.complete(&prompt).await {
                Ok(reply) if !reply.trim().is_empty() => reply.trim().to_string(),
                Ok(_) => {
                    warn!("Empty translation, using the original query");
                    state.query.clone()
                }
                Err(e) => {
                    error!("Translation failed: {}", e);
                    state.query.clone()
                }
            };
            info!("Translated: '{}' -> '{}'", state.query, state.translated_query);
        } else {
            state.translated_query = state.query.clone();
        }
        state.stage = PipelineStage::Translated;
        Ok(())
    }

    /// Fill `context` and `source_docs` from the index.
    #[instrument(skip(self, state))]
    pub async fn retrieve(&self, state: &mut RequestState) -> Result<()> {
        match &self.retriever {
            None => {
                state.context = NO_DOCUMENTS_CONTEXT.to_string();
                state.source_docs.clear();
            }
            Some(retriever) => match retriever.retrieve(&state.translated_query).await {
                Ok(hits) => {
                    state.context = hits
                        .iter()
                        .map(|hit| hit.content())
                        .collect::<Vec<_>>()
                        .join(CONTEXT_SEPARATOR);
                    info!("Retrieved {} relevant documents", hits.len());
                    state.source_docs = hits;
                }
                Err(e) => {
                    error!("Retrieval failed: {}", e);
                    state.context = RETRIEVAL_ERROR_CONTEXT.to_string();
                    state.source_docs.clear();
                }
            },
        }
        state.stage = PipelineStage::Retrieved;
        Ok(())
    }

    /// Fill `answer`.
    ///
    /// The prompt uses the original question, not the translation, so the
    /// model sees the user's own wording.
    #[instrument(skip(self, state))]
    pub async fn generate(&self, state: &mut RequestState) -> Result<()> {
        let prompt = prompts::answer_prompt(&state.context, &state.query)?;
        state.answer = match self.llm.complete(&prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Generation failed: {}", e);
                format!("Error generating response: {e}")
            }
        };
        state.stage = PipelineStage::Answered;
        Ok(())
    }

    /// Run all three stages and return the final state.
    pub async fn run(&self, question: &str) -> Result<RequestState> {
        let mut state = RequestState::new(question);
        self.translate(&mut state).await?;
        self.retrieve(&mut state).await?;
        self.generate(&mut state).await?;
        Ok(state)
    }

    /// Answer `question`. Never fails: every problem comes back as text.
    pub async fn query(&self, question: &str) -> String {
        self.respond(question).await.answer
    }

    /// Like [`query`](Self::query), but also returns the chunks the answer
    /// was grounded on.
    pub async fn respond(&self, question: &str) -> Reply {
        if !self.has_index() {
            warn!("Query received without a loaded vector index");
            return Reply::text(NO_INDEX_MESSAGE);
        }

        match AssertUnwindSafe(self.run(question)).catch_unwind().await {
            Ok(Ok(state)) => Reply {
                answer: state.answer,
                sources: state.source_docs,
            },
            Ok(Err(e)) => {
                error!("Error processing query: {}", e);
                Reply::text(format!("Error processing query: {e}"))
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!("Error processing query: {}", message);
                Reply::text(format!("Error processing query: {message}"))
            }
        }
    }
}

/// Answer text plus the chunks it was grounded on.
#[derive(Debug, Clone, Default)]
pub struct Reply {
    /// Text to show the user.
    pub answer: String,
    /// Retrieved chunks, most similar first; empty if the pipeline did not
    /// run to completion.
    pub sources: Vec<ScoredNode>,
}

impl Reply {
    fn text<S: Into<String>>(answer: S) -> Self {
        Self {
            answer: answer.into(),
            sources: Vec::new(),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
