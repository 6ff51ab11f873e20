use async_trait::async_trait;
use pgvector::Vector;

use crate::domain::entities::{Chunk, ScoredChunk};

#[derive(Debug)]
pub enum ChunkRepositoryError {
    DatabaseError(String),
}

impl std::fmt::Display for ChunkRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChunkRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for ChunkRepositoryError {}

/// Chunk storage plus both index adapters. Lexical and vector search run
/// against the same collection so fused results share a locator identity.
#[async_trait]
pub trait ChunkRepository: Send + Sync {
    /// Same delete-then-insert replacement discipline as pages.
    async fn replace_for_document(
        &self,
        document_id: &str,
        chunks: &[Chunk],
    ) -> Result<(), ChunkRepositoryError>;

    async fn find_by_document_id(
        &self,
        document_id: &str,
    ) -> Result<Vec<Chunk>, ChunkRepositoryError>;

    /// Full-text search over chunk text, ordered by descending rank. The
    /// optional filename allow-list is applied before ranking and limiting.
    async fn lexical_search(
        &self,
        query: &str,
        limit: i64,
        file_names: Option<&[String]>,
    ) -> Result<Vec<ScoredChunk>, ChunkRepositoryError>;

    /// Nearest-neighbor search over chunk embeddings, ordered by descending
    /// similarity. Same filter contract as `lexical_search`.
    async fn vector_search(
        &self,
        query_embedding: &Vector,
        limit: i64,
        file_names: Option<&[String]>,
    ) -> Result<Vec<ScoredChunk>, ChunkRepositoryError>;
}
