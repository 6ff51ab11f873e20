use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the external trigger says happened to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentOperation {
    Created,
    Updated,
}

/// Reference to a source document, as delivered by the ingestion trigger.
/// Immutable for the duration of one ingestion attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    document_id: String,
    file_name: String,
    operation: DocumentOperation,
}

impl DocumentRef {
    pub fn new(document_id: String, file_name: String, operation: DocumentOperation) -> Self {
        Self {
            document_id,
            file_name,
            operation,
        }
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn operation(&self) -> DocumentOperation {
        self.operation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Completed,
    Failed,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Completed => "completed",
            DocumentStatus::Failed => "failed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "completed" => Some(DocumentStatus::Completed),
            "failed" => Some(DocumentStatus::Failed),
            _ => None,
        }
    }
}

/// Last-processed record for a document, one per document id.
///
/// The fingerprint drives deduplication: a document is reprocessed only when
/// the freshly observed fingerprint differs from the stored one. A failed run
/// must keep the prior fingerprint so the next trigger retries even if the
/// content is unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentState {
    document_id: String,
    content_fingerprint: Option<String>,
    status: DocumentStatus,
    last_error: Option<String>,
    processed_at: DateTime<Utc>,
}

impl DocumentState {
    pub fn completed(document_id: String, content_fingerprint: String) -> Self {
        Self {
            document_id,
            content_fingerprint: Some(content_fingerprint),
            status: DocumentStatus::Completed,
            last_error: None,
            processed_at: Utc::now(),
        }
    }

    pub fn failed(document_id: String, prior_fingerprint: Option<String>, error: String) -> Self {
        Self {
            document_id,
            content_fingerprint: prior_fingerprint,
            status: DocumentStatus::Failed,
            last_error: Some(error),
            processed_at: Utc::now(),
        }
    }

    pub fn from_parts(
        document_id: String,
        content_fingerprint: Option<String>,
        status: DocumentStatus,
        last_error: Option<String>,
        processed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            document_id,
            content_fingerprint,
            status,
            last_error,
            processed_at,
        }
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    pub fn content_fingerprint(&self) -> Option<&str> {
        self.content_fingerprint.as_deref()
    }

    pub fn status(&self) -> DocumentStatus {
        self.status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn processed_at(&self) -> DateTime<Utc> {
        self.processed_at
    }

    /// Dedup policy: skip reprocessing iff the stored fingerprint matches the
    /// freshly observed one.
    pub fn matches_fingerprint(&self, observed: &str) -> bool {
        self.content_fingerprint.as_deref() == Some(observed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_state_carries_fingerprint() {
        let state = DocumentState::completed("doc-1".to_string(), "etag-a".to_string());

        assert_eq!(state.status(), DocumentStatus::Completed);
        assert!(state.matches_fingerprint("etag-a"));
        assert!(!state.matches_fingerprint("etag-b"));
        assert!(state.last_error().is_none());
    }

    #[test]
    fn failed_state_preserves_prior_fingerprint() {
        let state = DocumentState::failed(
            "doc-1".to_string(),
            Some("etag-a".to_string()),
            "parse exploded".to_string(),
        );

        assert_eq!(state.status(), DocumentStatus::Failed);
        assert_eq!(state.content_fingerprint(), Some("etag-a"));
        assert_eq!(state.last_error(), Some("parse exploded"));
    }

    #[test]
    fn failed_state_without_prior_fingerprint_never_matches() {
        let state = DocumentState::failed("doc-1".to_string(), None, "fetch failed".to_string());

        assert!(!state.matches_fingerprint("etag-a"));
    }

    #[test]
    fn status_round_trips_through_strings() {
        assert_eq!(
            DocumentStatus::parse(DocumentStatus::Completed.as_str()),
            Some(DocumentStatus::Completed)
        );
        assert_eq!(
            DocumentStatus::parse(DocumentStatus::Failed.as_str()),
            Some(DocumentStatus::Failed)
        );
        assert_eq!(DocumentStatus::parse("bogus"), None);
    }
}
