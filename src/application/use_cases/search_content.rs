use std::sync::Arc;
use std::time::Instant;

use crate::application::services::SearchService;
use crate::application::services::search_service::{SearchError, SearchRequest};
use crate::domain::entities::{SearchHit, SearchMode};

const DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Clone)]
pub struct SearchContentRequest {
    pub query: String,
    pub mode: SearchMode,
    pub limit: Option<usize>,
    pub file_names: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct SearchContentResponse {
    pub query: String,
    pub mode: SearchMode,
    pub hits: Vec<SearchHit>,
    pub search_time_ms: u64,
}

pub struct SearchContentUseCase {
    search_service: Arc<SearchService>,
}

impl SearchContentUseCase {
    pub fn new(search_service: Arc<SearchService>) -> Self {
        Self { search_service }
    }

    pub async fn execute(
        &self,
        request: SearchContentRequest,
    ) -> Result<SearchContentResponse, SearchError> {
        let start = Instant::now();

        let hits = self
            .search_service
            .search(SearchRequest {
                query: request.query.clone(),
                mode: request.mode,
                limit: request.limit.unwrap_or(DEFAULT_LIMIT),
                file_names: request.file_names,
            })
            .await?;

        Ok(SearchContentResponse {
            query: request.query,
            mode: request.mode,
            hits,
            search_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}
