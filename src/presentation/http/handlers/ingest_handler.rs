use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::application::use_cases::{
    IngestDocumentsUseCase, ingest_documents::IngestDocumentsRequest,
};
use crate::presentation::http::dto::{ApiResponse, IngestRequestDto, IngestResponseDto};

pub struct IngestHandler {
    ingest_use_case: Arc<IngestDocumentsUseCase>,
}

impl IngestHandler {
    pub fn new(ingest_use_case: Arc<IngestDocumentsUseCase>) -> Self {
        Self { ingest_use_case }
    }

    pub async fn ingest_documents(
        State(handler): State<Arc<IngestHandler>>,
        Json(payload): Json<IngestRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = IngestDocumentsRequest {
            documents: payload.documents.into_iter().map(Into::into).collect(),
            triggered_by: payload.triggered_by,
            timestamp: payload.timestamp,
        };

        match handler.ingest_use_case.execute(request).await {
            Ok(outcome) => {
                let dto = IngestResponseDto::from(outcome);
                Ok((
                    StatusCode::OK,
                    Json(ApiResponse::<IngestResponseDto>::success(dto)),
                ))
            }
            Err(e) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(
                    "EMPTY_BATCH".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }
}
