use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::services::PipelineCoordinator;
use crate::application::services::pipeline::BatchOutcome;
use crate::domain::entities::DocumentRef;

#[derive(Debug)]
pub enum IngestDocumentsError {
    EmptyBatch,
}

impl std::fmt::Display for IngestDocumentsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestDocumentsError::EmptyBatch => write!(f, "Ingestion batch contains no documents"),
        }
    }
}

impl std::error::Error for IngestDocumentsError {}

#[derive(Debug, Clone)]
pub struct IngestDocumentsRequest {
    pub documents: Vec<DocumentRef>,
    pub triggered_by: String,
    pub timestamp: Option<DateTime<Utc>>,
}

pub struct IngestDocumentsUseCase {
    coordinator: Arc<PipelineCoordinator>,
}

impl IngestDocumentsUseCase {
    pub fn new(coordinator: Arc<PipelineCoordinator>) -> Self {
        Self { coordinator }
    }

    pub async fn execute(
        &self,
        request: IngestDocumentsRequest,
    ) -> Result<BatchOutcome, IngestDocumentsError> {
        if request.documents.is_empty() {
            return Err(IngestDocumentsError::EmptyBatch);
        }

        tracing::info!(
            triggered_by = %request.triggered_by,
            timestamp = ?request.timestamp,
            documents = request.documents.len(),
            "ingestion triggered"
        );

        Ok(self.coordinator.process_batch(request.documents).await)
    }
}
