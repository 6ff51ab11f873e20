use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use pgvector::Vector;

use docurepo::application::ports::embedding_provider::{EmbeddingProvider, EmbeddingProviderError};
use docurepo::application::services::SearchService;
use docurepo::application::services::search_service::{SearchError, SearchRequest};
use docurepo::domain::entities::{Chunk, ScoredChunk, SearchMode, SourceMode};
use docurepo::domain::repositories::ChunkRepository;
use docurepo::domain::repositories::chunk_repository::ChunkRepositoryError;

fn scored(document_id: &str, chunk_index: i32, score: f32) -> ScoredChunk {
    ScoredChunk {
        document_id: document_id.to_string(),
        file_name: format!("{}.txt", document_id),
        chunk_index,
        page_start: 1,
        page_end: 1,
        score,
    }
}

struct FakeChunkIndex {
    lexical: Vec<ScoredChunk>,
    semantic: Vec<ScoredChunk>,
    lexical_failing: AtomicBool,
    semantic_failing: AtomicBool,
    semantic_delay: Option<Duration>,
}

impl FakeChunkIndex {
    fn new(lexical: Vec<ScoredChunk>, semantic: Vec<ScoredChunk>) -> Self {
        Self {
            lexical,
            semantic,
            lexical_failing: AtomicBool::new(false),
            semantic_failing: AtomicBool::new(false),
            semantic_delay: None,
        }
    }
}

#[async_trait]
impl ChunkRepository for FakeChunkIndex {
    async fn replace_for_document(
        &self,
        _document_id: &str,
        _chunks: &[Chunk],
    ) -> Result<(), ChunkRepositoryError> {
        Ok(())
    }

    async fn find_by_document_id(
        &self,
        _document_id: &str,
    ) -> Result<Vec<Chunk>, ChunkRepositoryError> {
        Ok(Vec::new())
    }

    async fn lexical_search(
        &self,
        _query: &str,
        limit: i64,
        _file_names: Option<&[String]>,
    ) -> Result<Vec<ScoredChunk>, ChunkRepositoryError> {
        if self.lexical_failing.load(Ordering::SeqCst) {
            return Err(ChunkRepositoryError::DatabaseError(
                "text index down".to_string(),
            ));
        }
        Ok(self.lexical.iter().take(limit as usize).cloned().collect())
    }

    async fn vector_search(
        &self,
        _query_embedding: &Vector,
        limit: i64,
        _file_names: Option<&[String]>,
    ) -> Result<Vec<ScoredChunk>, ChunkRepositoryError> {
        if let Some(delay) = self.semantic_delay {
            tokio::time::sleep(delay).await;
        }
        if self.semantic_failing.load(Ordering::SeqCst) {
            return Err(ChunkRepositoryError::DatabaseError(
                "vector index down".to_string(),
            ));
        }
        Ok(self.semantic.iter().take(limit as usize).cloned().collect())
    }
}

struct FakeEmbedder {
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl FakeEmbedder {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for FakeEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vector, EmbeddingProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(EmbeddingProviderError::ServiceUnavailable);
        }
        Ok(Vector::from(vec![0.5; 4]))
    }

    fn embedding_dimension(&self) -> usize {
        4
    }
}

fn service(index: Arc<FakeChunkIndex>, embedder: Arc<FakeEmbedder>) -> SearchService {
    SearchService::new(index, embedder, Duration::from_millis(100))
}

fn request(mode: SearchMode) -> SearchRequest {
    SearchRequest {
        query: "ingestion pipeline".to_string(),
        mode,
        limit: 10,
        file_names: None,
    }
}

#[tokio::test]
async fn hybrid_prefers_chunks_found_by_both_sources() {
    // "b" appears in both lists, "a" only in one; fusion must rank "b" first
    // even though "a" wins the lexical ranking.
    let index = Arc::new(FakeChunkIndex::new(
        vec![scored("a", 0, 0.9), scored("b", 0, 0.8)],
        vec![scored("b", 0, 0.7), scored("c", 0, 0.6)],
    ));
    let embedder = Arc::new(FakeEmbedder::new());

    let hits = service(index, embedder.clone())
        .search(request(SearchMode::Hybrid))
        .await
        .unwrap();

    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].document_id, "b");
    assert_eq!(hits[0].source_mode, SourceMode::Hybrid);
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 1);

    let a = hits.iter().find(|h| h.document_id == "a").unwrap();
    assert_eq!(a.source_mode, SourceMode::Lexical);
    let c = hits.iter().find(|h| h.document_id == "c").unwrap();
    assert_eq!(c.source_mode, SourceMode::Semantic);
}

#[tokio::test]
async fn hybrid_degrades_to_one_source_when_the_other_fails() {
    let index = Arc::new(FakeChunkIndex::new(
        vec![scored("a", 0, 0.9)],
        vec![scored("b", 0, 0.7)],
    ));
    index.semantic_failing.store(true, Ordering::SeqCst);

    let hits = service(index, Arc::new(FakeEmbedder::new()))
        .search(request(SearchMode::Hybrid))
        .await
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].document_id, "a");
    assert_eq!(hits[0].source_mode, SourceMode::Lexical);
}

#[tokio::test]
async fn hybrid_degrades_when_a_source_times_out() {
    let mut index = FakeChunkIndex::new(vec![scored("a", 0, 0.9)], vec![scored("b", 0, 0.7)]);
    index.semantic_delay = Some(Duration::from_secs(5));

    let hits = service(Arc::new(index), Arc::new(FakeEmbedder::new()))
        .search(request(SearchMode::Hybrid))
        .await
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].document_id, "a");
}

#[tokio::test]
async fn hybrid_fails_only_when_both_sources_fail() {
    let index = Arc::new(FakeChunkIndex::new(
        vec![scored("a", 0, 0.9)],
        vec![scored("b", 0, 0.7)],
    ));
    index.lexical_failing.store(true, Ordering::SeqCst);
    index.semantic_failing.store(true, Ordering::SeqCst);

    let result = service(index, Arc::new(FakeEmbedder::new()))
        .search(request(SearchMode::Hybrid))
        .await;

    assert!(matches!(result, Err(SearchError::AllSourcesFailed { .. })));
}

#[tokio::test]
async fn lexical_mode_never_calls_the_embedder() {
    let index = Arc::new(FakeChunkIndex::new(
        vec![scored("a", 0, 0.9), scored("b", 1, 0.5)],
        Vec::new(),
    ));
    let embedder = Arc::new(FakeEmbedder::new());

    let hits = service(index, embedder.clone())
        .search(request(SearchMode::Lexical))
        .await
        .unwrap();

    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|h| h.source_mode == SourceMode::Lexical));
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn semantic_mode_surfaces_embedding_failures() {
    let index = Arc::new(FakeChunkIndex::new(Vec::new(), vec![scored("a", 0, 0.9)]));
    let embedder = Arc::new(FakeEmbedder::new());
    embedder.failing.store(true, Ordering::SeqCst);

    let result = service(index, embedder)
        .search(request(SearchMode::Semantic))
        .await;

    assert!(matches!(result, Err(SearchError::EmbeddingError(_))));
}

#[tokio::test]
async fn blank_query_is_rejected() {
    let index = Arc::new(FakeChunkIndex::new(Vec::new(), Vec::new()));

    let result = service(index, Arc::new(FakeEmbedder::new()))
        .search(SearchRequest {
            query: "   ".to_string(),
            mode: SearchMode::Hybrid,
            limit: 10,
            file_names: None,
        })
        .await;

    assert!(matches!(result, Err(SearchError::EmptyQuery)));
}

#[tokio::test]
async fn results_are_capped_at_the_requested_limit() {
    let lexical: Vec<ScoredChunk> = (0..20).map(|i| scored("a", i, 1.0 - i as f32 * 0.01)).collect();
    let semantic: Vec<ScoredChunk> = (0..20).map(|i| scored("b", i, 1.0 - i as f32 * 0.01)).collect();
    let index = Arc::new(FakeChunkIndex::new(lexical, semantic));

    let hits = service(index, Arc::new(FakeEmbedder::new()))
        .search(SearchRequest {
            query: "pipeline".to_string(),
            mode: SearchMode::Hybrid,
            limit: 5,
            file_names: None,
        })
        .await
        .unwrap();

    assert_eq!(hits.len(), 5);
}
