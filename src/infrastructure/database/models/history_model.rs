use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::{ProcessingRecord, RunStatus};
use crate::infrastructure::database::schema::processing_history;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = processing_history)]
#[diesel(primary_key(run_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProcessingRecordModel {
    pub run_id: Uuid,
    pub document_id: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub status: String,
    pub pages_processed: Option<i32>,
    pub chunks_generated: Option<i32>,
    pub duration_ms: Option<i64>,
    pub error: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = processing_history)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewProcessingRecordModel {
    pub run_id: Uuid,
    pub document_id: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub status: String,
    pub pages_processed: Option<i32>,
    pub chunks_generated: Option<i32>,
    pub duration_ms: Option<i64>,
    pub error: Option<String>,
}

impl From<&ProcessingRecord> for NewProcessingRecordModel {
    fn from(record: &ProcessingRecord) -> Self {
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

impl From<ProcessingRecordModel> for ProcessingRecord {
    fn from(model: ProcessingRecordModel) -> Self {
        let status = RunStatus::parse(&model.status).unwrap_or(RunStatus::Failed);
        ProcessingRecord::from_parts(
            model.run_id,
            model.document_id,
            model.started_at,
            model.completed_at,
            status,
            model.pages_processed,
            model.chunks_generated,
            model.duration_ms,
            model.error,
        )
    }
}
