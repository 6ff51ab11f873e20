use async_trait::async_trait;

use crate::domain::entities::ProcessingRecord;

#[derive(Debug)]
pub enum HistoryRepositoryError {
    DatabaseError(String),
}

impl std::fmt::Display for HistoryRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for HistoryRepositoryError {}

/// Append-only audit trail. Callers treat append failures as best-effort:
/// logged, never retried, never escalated into the run's outcome.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    async fn append(&self, record: &ProcessingRecord) -> Result<(), HistoryRepositoryError>;

    async fn find_by_document_id(
        &self,
        document_id: &str,
    ) -> Result<Vec<ProcessingRecord>, HistoryRepositoryError>;
}
