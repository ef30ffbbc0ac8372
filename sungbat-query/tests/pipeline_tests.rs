//! Behaviour of the translate → retrieve → generate pipeline with stub
//! providers.

use async_trait::async_trait;
use mockall::mock;
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use sungbat_core::traits::{DistanceMetric, Embedder, LanguageModel, VectorStore};
use sungbat_core::{ChunkInfo, Node, Result, SungbatError};
use sungbat_integrations::InMemoryVectorStore;
use sungbat_query::prompts::{ENGLISH_HEADER, ILOCANO_HEADER};
use sungbat_query::{
    BilingualQueryPipeline, NO_DOCUMENTS_CONTEXT, NO_INDEX_MESSAGE, PipelineStage,
    RETRIEVAL_ERROR_CONTEXT, RequestState, VectorRetriever,
};
use uuid::Uuid;

const DIM: usize = 16;

mock! {
    pub Llm {}

    #[async_trait]
    impl LanguageModel for Llm {
        async fn complete(&self, prompt: &str) -> Result<String>;
    }
}

fn is_translation_prompt(prompt: &str) -> bool {
    prompt.starts_with("You are an expert translator")
}

/// Returns the prompt it was given.
#[derive(Debug, Default)]
struct EchoModel {
    calls: AtomicUsize,
}

#[async_trait]
impl LanguageModel for EchoModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(prompt.to_string())
    }
}

/// Behaves like a well-mannered bilingual model and records every prompt.
#[derive(Debug, Default)]
struct BilingualModel {
    prompts: Mutex<Vec<String>>,
}

impl BilingualModel {
    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for BilingualModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if is_translation_prompt(prompt) {
            Ok("  What are the rights of a person?\n".to_string())
        } else {
            Ok(format!(
                "{ILOCANO_HEADER}\nAdda kalintegan ti tunggal tao iti biag.\n\n{ENGLISH_HEADER}\nEvery person has the right to life."
            ))
        }
    }
}

/// Fails the translation call and echoes everything else.
#[derive(Debug)]
struct TranslationOutage;

#[async_trait]
impl LanguageModel for TranslationOutage {
    async fn complete(&self, prompt: &str) -> Result<String> {
        if is_translation_prompt(prompt) {
            Err(SungbatError::llm("503 Service Unavailable"))
        } else {
            Ok(prompt.to_string())
        }
    }
}

#[derive(Debug)]
struct FailingModel;

#[async_trait]
impl LanguageModel for FailingModel {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Err(SungbatError::llm("quota exhausted"))
    }
}

#[derive(Debug)]
struct PanickingModel;

#[async_trait]
impl LanguageModel for PanickingModel {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        panic!("model exploded")
    }
}

/// Deterministic bag-of-bytes embedder.
#[derive(Debug, Default)]
struct ByteEmbedder {
    calls: AtomicUsize,
}

fn byte_vector(text: &str) -> Vec<f32> {
    let mut v = vec![0.0; DIM];
    for b in text.to_lowercase().bytes() {
        v[usize::from(b) % DIM] += 1.0;
    }
    v
}

#[async_trait]
impl Embedder for ByteEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(byte_vector(text))
    }

    async fn embed_batch(&self, texts: Vec<&str>) -> Result<Vec<Vec<f32>>> {
        Ok(texts.into_iter().map(byte_vector).collect())
    }

    fn dimension(&self) -> usize {
        DIM
    }

    fn model_name(&self) -> &str {
        "byte-embedder"
    }
}

#[derive(Debug)]
struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(SungbatError::embedding("connection reset"))
    }

    async fn embed_batch(&self, _texts: Vec<&str>) -> Result<Vec<Vec<f32>>> {
        Err(SungbatError::embedding("connection reset"))
    }

    fn dimension(&self) -> usize {
        DIM
    }

    fn model_name(&self) -> &str {
        "failing"
    }
}

async fn store_with(texts: &[&str]) -> Arc<InMemoryVectorStore> {
    let store = Arc::new(InMemoryVectorStore::new(DIM, DistanceMetric::Cosine));
    let nodes = texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            Node::new(*text, Uuid::new_v4(), ChunkInfo::new(0, text.len(), i))
                .with_metadata("filename", "konstitusion.pdf")
                .with_embedding(byte_vector(text))
        })
        .collect();
    store.add(nodes).await.unwrap();
    store
}

fn constitution_chunks() -> Vec<&'static str> {
    vec![
        "Article III, Section 1. No person shall be deprived of life, liberty, or property without due process of law.",
        "Article III, Section 4. No law shall be passed abridging the freedom of speech.",
        "Article II, Section 1. The Philippines is a democratic and republican State.",
        "Article VI, Section 1. The legislative power shall be vested in the Congress.",
        "Article VII, Section 1. The executive power shall be vested in the President.",
        "Article VIII, Section 1. The judicial power shall be vested in one Supreme Court.",
        "Article XIV, Section 1. The State shall protect the right of all citizens to quality education.",
        "Article V, Section 1. Suffrage may be exercised by all citizens of the Philippines.",
    ]
}

#[tokio::test]
async fn test_echo_model_round_trip() {
    let text = "Article II, Section 1. The Philippines is a democratic and republican State.";
    let store = store_with(&[text]).await;
    let llm = Arc::new(EchoModel::default());
    let retriever = VectorRetriever::new(Arc::new(ByteEmbedder::default()), store);
    let pipeline = BilingualQueryPipeline::new(llm.clone(), Some(retriever));

    let state = pipeline.run("Explain the preamble").await.unwrap();

    assert_eq!(state.translated_query, "Explain the preamble");
    assert_eq!(state.context, text);
    assert_eq!(state.source_docs.len(), 1);
    assert!(state.answer.contains(text));
    assert_eq!(state.stage, PipelineStage::Answered);
    assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_echo_model_round_trip_with_translation() {
    let text = "Article V, Section 1. Suffrage may be exercised by all citizens of the Philippines.";
    let store = store_with(&[text]).await;
    let llm = Arc::new(EchoModel::default());
    let retriever = VectorRetriever::new(Arc::new(ByteEmbedder::default()), store);
    let pipeline = BilingualQueryPipeline::new(llm.clone(), Some(retriever));

    let state = pipeline.run("ania").await.unwrap();

    assert_eq!(state.context, text);
    assert!(state.answer.contains(text));
    assert_eq!(llm.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_ilocano_question_scenario() {
    let store = store_with(&constitution_chunks()).await;
    let llm = Arc::new(BilingualModel::default());
    let retriever = VectorRetriever::new(Arc::new(ByteEmbedder::default()), store);
    let pipeline = BilingualQueryPipeline::new(llm.clone(), Some(retriever));

    let question = "Ania dagiti kalintegan ti tao?";
    let state = pipeline.run(question).await.unwrap();

    assert_eq!(state.query, question);
    assert_eq!(state.translated_query, "What are the rights of a person?");
    assert_ne!(state.translated_query, state.query);
    assert_eq!(state.source_docs.len(), 5);
    for pair in state.source_docs.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    let expected_context = state
        .source_docs
        .iter()
        .map(|d| d.content())
        .collect::<Vec<_>>()
        .join("\n\n");
    assert_eq!(state.context, expected_context);
    assert!(state.answer.contains(ILOCANO_HEADER));
    assert!(state.answer.contains(ENGLISH_HEADER));

    let prompts = llm.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(is_translation_prompt(&prompts[0]));
    // The answer prompt carries the original wording, not the translation.
    assert!(prompts[1].contains(&format!("Question: {question}")));
    assert!(!prompts[1].contains("What are the rights of a person?"));
}

#[tokio::test]
async fn test_english_question_skips_translation() {
    let store = store_with(&constitution_chunks()).await;
    let llm = Arc::new(BilingualModel::default());
    let retriever = VectorRetriever::new(Arc::new(ByteEmbedder::default()), store);
    let pipeline = BilingualQueryPipeline::new(llm.clone(), Some(retriever));

    let answer = pipeline.query("How are laws made?").await;

    assert!(answer.contains(ENGLISH_HEADER));
    let prompts = llm.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(!is_translation_prompt(&prompts[0]));
}

#[tokio::test]
async fn test_no_index_returns_instruction_without_provider_calls() {
    let mut llm = MockLlm::new();
    llm.expect_complete().never();
    let pipeline = BilingualQueryPipeline::new(Arc::new(llm), None);

    for question in ["", "Ania ti Konstitusion?", "What is Article III?"] {
        assert_eq!(pipeline.query(question).await, NO_INDEX_MESSAGE);
    }
}

#[tokio::test]
async fn test_stages_without_index_use_placeholder_context() {
    let pipeline = BilingualQueryPipeline::new(Arc::new(EchoModel::default()), None);

    let state = pipeline.run("How are laws made?").await.unwrap();
    assert_eq!(state.context, NO_DOCUMENTS_CONTEXT);
    assert!(state.source_docs.is_empty());
}

#[tokio::test]
async fn test_empty_question_gets_an_answer() {
    let store = store_with(&constitution_chunks()).await;
    let retriever = VectorRetriever::new(Arc::new(ByteEmbedder::default()), store);
    let pipeline = BilingualQueryPipeline::new(Arc::new(BilingualModel::default()), Some(retriever));

    let answer = pipeline.query("").await;
    assert!(!answer.is_empty());
}

#[tokio::test]
async fn test_translation_failure_falls_back_to_query() {
    let store = store_with(&constitution_chunks()).await;
    let embedder = Arc::new(ByteEmbedder::default());
    let retriever = VectorRetriever::new(embedder.clone(), store);
    let pipeline = BilingualQueryPipeline::new(Arc::new(TranslationOutage), Some(retriever));

    let question = "Kasano ti panagbotos?";
    let state = pipeline.run(question).await.unwrap();

    assert_eq!(state.translated_query, question);
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 1);
    assert!(!state.source_docs.is_empty());
    assert!(state.answer.contains(&format!("Question: {question}")));
    assert_eq!(state.stage, PipelineStage::Answered);
}

#[tokio::test]
async fn test_retrieval_failure_uses_placeholder_and_still_generates() {
    let store = store_with(&constitution_chunks()).await;
    let retriever = VectorRetriever::new(Arc::new(FailingEmbedder), store);
    let llm = Arc::new(EchoModel::default());
    let pipeline = BilingualQueryPipeline::new(llm.clone(), Some(retriever));

    let state = pipeline.run("How are laws made?").await.unwrap();

    assert_eq!(state.context, RETRIEVAL_ERROR_CONTEXT);
    assert!(state.source_docs.is_empty());
    assert!(state.answer.contains(RETRIEVAL_ERROR_CONTEXT));
    assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_generation_failure_becomes_answer_text() {
    let store = store_with(&constitution_chunks()).await;
    let retriever = VectorRetriever::new(Arc::new(ByteEmbedder::default()), store);
    let pipeline = BilingualQueryPipeline::new(Arc::new(FailingModel), Some(retriever));

    let answer = pipeline.query("Ania ti Artikulo III?").await;
    assert!(answer.starts_with("Error generating response:"));
    assert!(answer.contains("quota exhausted"));
}

#[tokio::test]
async fn test_panic_is_caught_at_query_boundary() {
    let store = store_with(&constitution_chunks()).await;
    let retriever = VectorRetriever::new(Arc::new(ByteEmbedder::default()), store);
    let pipeline = BilingualQueryPipeline::new(Arc::new(PanickingModel), Some(retriever));

    let answer = pipeline.query("How are laws made?").await;
    assert_eq!(answer, "Error processing query: model exploded");
}

#[tokio::test]
async fn test_top_k_limits_sources() {
    let store = store_with(&constitution_chunks()).await;
    let retriever = VectorRetriever::new(Arc::new(ByteEmbedder::default()), store).with_top_k(2);
    let pipeline = BilingualQueryPipeline::new(Arc::new(EchoModel::default()), Some(retriever));

    let state = pipeline.run("How are laws made?").await.unwrap();
    assert_eq!(state.source_docs.len(), 2);
    assert_eq!(state.context.matches("\n\n").count(), 1);
}

#[tokio::test]
async fn test_stage_methods_advance_state() {
    let pipeline = BilingualQueryPipeline::new(Arc::new(EchoModel::default()), None);
    let mut state = RequestState::new("How are laws made?");
    assert_eq!(state.stage, PipelineStage::Created);

    pipeline.translate(&mut state).await.unwrap();
    assert_eq!(state.stage, PipelineStage::Translated);
    assert!(state.context.is_empty());

    pipeline.retrieve(&mut state).await.unwrap();
    assert_eq!(state.stage, PipelineStage::Retrieved);
    assert!(state.answer.is_empty());

    pipeline.generate(&mut state).await.unwrap();
    assert_eq!(state.stage, PipelineStage::Answered);
}

#[tokio::test]
async fn test_respond_returns_sources_with_answer() {
    let store = store_with(&constitution_chunks()).await;
    let retriever = VectorRetriever::new(Arc::new(ByteEmbedder::default()), store).with_top_k(3);
    let pipeline = BilingualQueryPipeline::new(Arc::new(BilingualModel::default()), Some(retriever));

    let reply = pipeline.respond("Ania dagiti kalintegan ti tao?").await;
    assert!(reply.answer.contains(ILOCANO_HEADER));
    assert_eq!(reply.sources.len(), 3);

    let panicking = BilingualQueryPipeline::new(
        Arc::new(PanickingModel),
        Some(VectorRetriever::new(
            Arc::new(ByteEmbedder::default()),
            store_with(&constitution_chunks()).await,
        )),
    );
    let reply = panicking.respond("How are laws made?").await;
    assert!(reply.answer.starts_with("Error processing query"));
    assert!(reply.sources.is_empty());
}
