use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::ProcessingRecord;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingRecordDto {
    pub run_id: Uuid,
    pub document_id: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages_processed: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunks_generated: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<ProcessingRecord> for ProcessingRecordDto {
    fn from(record: ProcessingRecord) -> Self {
        Self {
            run_id: record.run_id(),
            document_id: record.document_id().to_string(),
            started_at: record.started_at(),
            completed_at: record.completed_at(),
            status: record.status().as_str().to_string(),
            pages_processed: record.pages_processed(),
            chunks_generated: record.chunks_generated(),
            duration_ms: record.duration_ms(),
            error: record.error().map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentHistoryDto {
    pub document_id: String,
    pub runs: Vec<ProcessingRecordDto>,
}
