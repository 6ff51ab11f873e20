use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Failed,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Success => "success",
            RunStatus::Failed => "failed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "success" => Some(RunStatus::Success),
            "failed" => Some(RunStatus::Failed),
            _ => None,
        }
    }
}

/// Append-only audit record for one pipeline run. Never mutated after insert;
/// writing it is best-effort and must not affect the run's outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingRecord {
    run_id: Uuid,
    document_id: String,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    status: RunStatus,
    pages_processed: Option<i32>,
    chunks_generated: Option<i32>,
    duration_ms: Option<i64>,
    error: Option<String>,
}

impl ProcessingRecord {
    pub fn success(
        run_id: Uuid,
        document_id: String,
        started_at: DateTime<Utc>,
        pages_processed: i32,
        chunks_generated: i32,
        duration_ms: i64,
    ) -> Self {
        Self {
            run_id,
            document_id,
            started_at,
            completed_at: Utc::now(),
            status: RunStatus::Success,
            pages_processed: Some(pages_processed),
            chunks_generated: Some(chunks_generated),
            duration_ms: Some(duration_ms),
            error: None,
        }
    }

    pub fn failed(
        run_id: Uuid,
        document_id: String,
        started_at: DateTime<Utc>,
        duration_ms: i64,
        error: String,
    ) -> Self {
        Self {
            run_id,
            document_id,
            started_at,
            completed_at: Utc::now(),
            status: RunStatus::Failed,
            pages_processed: None,
            chunks_generated: None,
            duration_ms: Some(duration_ms),
            error: Some(error),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        run_id: Uuid,
        document_id: String,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        status: RunStatus,
        pages_processed: Option<i32>,
        chunks_generated: Option<i32>,
        duration_ms: Option<i64>,
        error: Option<String>,
    ) -> Self {
        Self {
            run_id,
            document_id,
            started_at,
            completed_at,
            status,
            pages_processed,
            chunks_generated,
            duration_ms,
            error,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn pages_processed(&self) -> Option<i32> {
        self.pages_processed
    }

    pub fn chunks_generated(&self) -> Option<i32> {
        self.chunks_generated
    }

    pub fn duration_ms(&self) -> Option<i64> {
        self.duration_ms
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_record_carries_stats() {
        let record =
            ProcessingRecord::success(Uuid::new_v4(), "doc-1".to_string(), Utc::now(), 2, 4, 1234);

        assert_eq!(record.status(), RunStatus::Success);
        assert_eq!(record.pages_processed(), Some(2));
        assert_eq!(record.chunks_generated(), Some(4));
        assert!(record.error().is_none());
    }

    #[test]
    fn failed_record_carries_error_and_no_stats() {
        let record = ProcessingRecord::failed(
            Uuid::new_v4(),
            "doc-1".to_string(),
            Utc::now(),
            50,
            "embedding service unavailable".to_string(),
        );

        assert_eq!(record.status(), RunStatus::Failed);
        assert!(record.pages_processed().is_none());
        assert!(record.chunks_generated().is_none());
        assert_eq!(record.error(), Some("embedding service unavailable"));
    }
}
