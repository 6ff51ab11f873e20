use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::services::pipeline::{BatchOutcome, DocumentOutcome, IngestStatus};
use crate::domain::entities::{DocumentOperation, DocumentRef};

/// Trigger payload for an ingestion batch. Field names follow the external
/// trigger's wire format.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestRequestDto {
    pub documents: Vec<DocumentRefDto>,
    pub triggered_by: String,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRefDto {
    pub document_id: String,
    pub file_name: String,
    pub operation: DocumentOperation,
}

impl From<DocumentRefDto> for DocumentRef {
    fn from(dto: DocumentRefDto) -> Self {
        DocumentRef::new(dto.document_id, dto.file_name, dto.operation)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponseDto {
    pub workflow_id: Uuid,
    pub total_documents: usize,
    pub successful: usize,
    pub failed: usize,
    pub skipped: usize,
    pub results: Vec<DocumentOutcomeDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentOutcomeDto {
    pub document_id: String,
    pub file_name: String,
    pub status: IngestStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages_processed: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunks_generated: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<i64>,
}

impl From<DocumentOutcome> for DocumentOutcomeDto {
    fn from(outcome: DocumentOutcome) -> Self {
        Self {
            document_id: outcome.document_id,
            file_name: outcome.file_name,
            status: outcome.status,
            error: outcome.error,
            pages_processed: outcome.stats.map(|s| s.pages_processed),
            chunks_generated: outcome.stats.map(|s| s.chunks_generated),
            duration_ms: outcome.stats.map(|s| s.duration_ms),
        }
    }
}

impl From<BatchOutcome> for IngestResponseDto {
    fn from(outcome: BatchOutcome) -> Self {
        Self {
            workflow_id: outcome.workflow_id,
            total_documents: outcome.total_documents,
            successful: outcome.successful,
            failed: outcome.failed,
            skipped: outcome.skipped,
            results: outcome.results.into_iter().map(Into::into).collect(),
        }
    }
}
