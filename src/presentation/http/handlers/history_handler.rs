use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::use_cases::GetDocumentHistoryUseCase;
use crate::presentation::http::dto::{ApiResponse, DocumentHistoryDto};

pub struct HistoryHandler {
    history_use_case: Arc<GetDocumentHistoryUseCase>,
}

impl HistoryHandler {
    pub fn new(history_use_case: Arc<GetDocumentHistoryUseCase>) -> Self {
        Self { history_use_case }
    }

    pub async fn get_document_history(
        State(handler): State<Arc<HistoryHandler>>,
        Path(document_id): Path<String>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.history_use_case.execute(&document_id).await {
            Ok(records) => {
                let dto = DocumentHistoryDto {
                    document_id,
                    runs: records.into_iter().map(Into::into).collect(),
                };
                Ok((
                    StatusCode::OK,
                    Json(ApiResponse::<DocumentHistoryDto>::success(dto)),
                ))
            }
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    "HISTORY_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }
}
