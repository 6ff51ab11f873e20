use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::entities::{DocumentState, DocumentStatus};
use crate::infrastructure::database::schema::document_state;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = document_state)]
#[diesel(primary_key(document_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentStateModel {
    pub document_id: String,
    pub content_fingerprint: Option<String>,
    pub status: String,
    pub last_error: Option<String>,
    pub processed_at: DateTime<Utc>,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = document_state)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewDocumentStateModel {
    pub document_id: String,
    pub content_fingerprint: Option<String>,
    pub status: String,
    pub last_error: Option<String>,
    pub processed_at: DateTime<Utc>,
}

impl From<&DocumentState> for NewDocumentStateModel {
    fn from(state: &DocumentState) -> Self {
        Self {
            document_id: state.document_id().to_string(),
            content_fingerprint: state.content_fingerprint().map(str::to_string),
            status: state.status().as_str().to_string(),
            last_error: state.last_error().map(str::to_string),
            processed_at: state.processed_at(),
        }
    }
}

impl From<DocumentStateModel> for DocumentState {
    fn from(model: DocumentStateModel) -> Self {
        let status = DocumentStatus::parse(&model.status).unwrap_or(DocumentStatus::Failed);
        DocumentState::from_parts(
            model.document_id,
            model.content_fingerprint,
            status,
            model.last_error,
            model.processed_at,
        )
    }
}
