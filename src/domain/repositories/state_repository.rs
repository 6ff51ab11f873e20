use async_trait::async_trait;

use crate::domain::entities::DocumentState;

#[derive(Debug)]
pub enum StateRepositoryError {
    DatabaseError(String),
}

impl std::fmt::Display for StateRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for StateRepositoryError {}

/// Persistent record of the last-processed fingerprint per document.
/// `commit` is an upsert keyed by document id, last-write-wins.
#[async_trait]
pub trait StateRepository: Send + Sync {
    async fn find_by_document_id(
        &self,
        document_id: &str,
    ) -> Result<Option<DocumentState>, StateRepositoryError>;

    async fn commit(&self, state: &DocumentState) -> Result<(), StateRepositoryError>;
}
