use std::sync::Arc;

use crate::domain::entities::ProcessingRecord;
use crate::domain::repositories::{HistoryRepository, history_repository::HistoryRepositoryError};

pub struct GetDocumentHistoryUseCase {
    history_repository: Arc<dyn HistoryRepository>,
}

impl GetDocumentHistoryUseCase {
    pub fn new(history_repository: Arc<dyn HistoryRepository>) -> Self {
        Self { history_repository }
    }

    pub async fn execute(
        &self,
        document_id: &str,
    ) -> Result<Vec<ProcessingRecord>, HistoryRepositoryError> {
        self.history_repository.find_by_document_id(document_id).await
    }
}
