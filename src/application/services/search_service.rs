use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::application::ports::EmbeddingProvider;
use crate::application::services::fusion::reciprocal_rank_fusion;
use crate::domain::entities::{ScoredChunk, SearchHit, SearchMode, SourceMode};
use crate::domain::repositories::ChunkRepository;

#[derive(Debug)]
pub enum SearchError {
    EmptyQuery,
    EmbeddingError(String),
    IndexError(String),
    AllSourcesFailed { lexical: String, semantic: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::EmptyQuery => write!(f, "Query cannot be empty"),
            SearchError::EmbeddingError(msg) => write!(f, "Embedding error: {}", msg),
            SearchError::IndexError(msg) => write!(f, "Index error: {}", msg),
            SearchError::AllSourcesFailed { lexical, semantic } => write!(
                f,
                "Both retrieval sources failed: lexical: {}; semantic: {}",
                lexical, semantic
            ),
        }
    }
}

impl std::error::Error for SearchError {}

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub mode: SearchMode,
    pub limit: usize,
    pub file_names: Option<Vec<String>>,
}

/// Answers queries by lexical search, semantic search, or both fused with
/// RRF. In hybrid mode the two sources are queried concurrently; a source
/// that times out or errors degrades to an empty list, and the query only
/// fails when both sources fail.
pub struct SearchService {
    chunk_repository: Arc<dyn ChunkRepository>,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    source_timeout: Duration,
}

impl SearchService {
    pub fn new(
        chunk_repository: Arc<dyn ChunkRepository>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        source_timeout: Duration,
    ) -> Self {
        Self {
            chunk_repository,
            embedding_provider,
            source_timeout,
        }
    }

    pub async fn search(&self, request: SearchRequest) -> Result<Vec<SearchHit>, SearchError> {
        if request.query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        let limit = request.limit.max(1);
        let file_names = request.file_names.as_deref();

        match request.mode {
            SearchMode::Lexical => {
                let results = self
                    .lexical(&request.query, limit as i64, file_names)
                    .await
                    .map_err(SearchError::IndexError)?;
                Ok(tag_hits(results, SourceMode::Lexical))
            }
            SearchMode::Semantic => {
                let embedding = self
                    .embedding_provider
                    .embed(&request.query)
                    .await
                    .map_err(|e| SearchError::EmbeddingError(e.to_string()))?;
                let results = self
                    .chunk_repository
                    .vector_search(&embedding, limit as i64, file_names)
                    .await
                    .map_err(|e| SearchError::IndexError(e.to_string()))?;
                Ok(tag_hits(results, SourceMode::Semantic))
            }
            SearchMode::Hybrid => self.hybrid(&request.query, limit, file_names).await,
        }
    }

    /// Fires both sources concurrently, fetching up to `2 * limit` from each
    /// so the fused ranking has enough candidates, then merges with RRF.
    async fn hybrid(
        &self,
        query: &str,
        limit: usize,
        file_names: Option<&[String]>,
    ) -> Result<Vec<SearchHit>, SearchError> {
        let fetch_limit = (limit * 2) as i64;

        let (lexical, semantic) = tokio::join!(
            tokio::time::timeout(
                self.source_timeout,
                self.lexical(query, fetch_limit, file_names)
            ),
            tokio::time::timeout(
                self.source_timeout,
                self.semantic(query, fetch_limit, file_names)
            ),
        );

        let lexical = flatten_source(lexical);
        let semantic = flatten_source(semantic);

        match (lexical, semantic) {
            (Err(lex_err), Err(sem_err)) => Err(SearchError::AllSourcesFailed {
                lexical: lex_err,
                semantic: sem_err,
            }),
            (lexical, semantic) => {
                // Degraded-result policy: a single failed source contributes
                // an empty list rather than failing the fused query.
                let lexical = lexical.unwrap_or_else(|e| {
                    warn!(error = %e, "lexical source degraded to empty results");
                    Vec::new()
                });
                let semantic = semantic.unwrap_or_else(|e| {
                    warn!(error = %e, "semantic source degraded to empty results");
                    Vec::new()
                });
                Ok(reciprocal_rank_fusion(&lexical, &semantic, limit))
            }
        }
    }

    async fn lexical(
        &self,
        query: &str,
        limit: i64,
        file_names: Option<&[String]>,
    ) -> Result<Vec<ScoredChunk>, String> {
        self.chunk_repository
            .lexical_search(query, limit, file_names)
            .await
            .map_err(|e| e.to_string())
    }

    async fn semantic(
        &self,
        query: &str,
        limit: i64,
        file_names: Option<&[String]>,
    ) -> Result<Vec<ScoredChunk>, String> {
        let embedding = self
            .embedding_provider
            .embed(query)
            .await
            .map_err(|e| e.to_string())?;

        self.chunk_repository
            .vector_search(&embedding, limit, file_names)
            .await
            .map_err(|e| e.to_string())
    }
}

fn flatten_source(
    result: Result<Result<Vec<ScoredChunk>, String>, tokio::time::error::Elapsed>,
) -> Result<Vec<ScoredChunk>, String> {
    match result {
        Ok(inner) => inner,
        Err(_) => Err("source timed out".to_string()),
    }
}

fn tag_hits(results: Vec<ScoredChunk>, source_mode: SourceMode) -> Vec<SearchHit> {
    results
        .into_iter()
        .map(|chunk| SearchHit {
            document_id: chunk.document_id,
            file_name: chunk.file_name,
            chunk_index: chunk.chunk_index,
            page_start: chunk.page_start,
            page_end: chunk.page_end,
            score: chunk.score,
            source_mode,
        })
        .collect()
}
