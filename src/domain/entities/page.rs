use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One page of extracted document text. All pages for a document are replaced
/// wholesale (delete-then-insert) on every successful reprocessing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    id: Uuid,
    document_id: String,
    file_name: String,
    page_number: i32,
    text: String,
    total_pages: i32,
    created_at: DateTime<Utc>,
}

impl Page {
    pub fn new(
        document_id: String,
        file_name: String,
        page_number: i32,
        text: String,
        total_pages: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            file_name,
            page_number,
            text,
            total_pages,
            created_at: Utc::now(),
        }
    }

    pub fn from_parts(
        id: Uuid,
        document_id: String,
        file_name: String,
        page_number: i32,
        text: String,
        total_pages: i32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            document_id,
            file_name,
            page_number,
            text,
            total_pages,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn page_number(&self) -> i32 {
        self.page_number
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn total_pages(&self) -> i32 {
        self.total_pages
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
