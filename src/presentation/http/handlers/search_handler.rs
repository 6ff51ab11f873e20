use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::application::services::search_service::SearchError;
use crate::application::use_cases::{SearchContentUseCase, search_content::SearchContentRequest};
use crate::domain::entities::SearchMode;
use crate::presentation::http::dto::{ApiResponse, SearchRequestDto, SearchResponseDto};

pub struct SearchHandler {
    search_use_case: Arc<SearchContentUseCase>,
}

impl SearchHandler {
    pub fn new(search_use_case: Arc<SearchContentUseCase>) -> Self {
        Self { search_use_case }
    }

    pub async fn search_content(
        State(handler): State<Arc<SearchHandler>>,
        Json(payload): Json<SearchRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = SearchContentRequest {
            query: payload.query,
            mode: payload.mode.unwrap_or(SearchMode::Hybrid),
            limit: payload.limit,
            file_names: payload.file_names,
        };

        match handler.search_use_case.execute(request).await {
            Ok(response) => {
                let dto = SearchResponseDto::from(response);
                Ok((
                    StatusCode::OK,
                    Json(ApiResponse::<SearchResponseDto>::success(dto)),
                ))
            }
            Err(SearchError::EmptyQuery) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(
                    "EMPTY_QUERY".to_string(),
                    "Query cannot be empty".to_string(),
                    None,
                )),
            )),
            Err(e @ SearchError::AllSourcesFailed { .. }) => Ok((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::error(
                    "SEARCH_UNAVAILABLE".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    "SEARCH_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }
}
