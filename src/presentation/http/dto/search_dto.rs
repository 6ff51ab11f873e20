use serde::{Deserialize, Serialize};

use crate::application::use_cases::search_content::SearchContentResponse;
use crate::domain::entities::{SearchHit, SearchMode, SourceMode};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequestDto {
    pub query: String,
    #[serde(default)]
    pub mode: Option<SearchMode>,
    pub limit: Option<usize>,
    pub file_names: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponseDto {
    pub query: String,
    pub mode: SearchMode,
    pub total_results: usize,
    pub results: Vec<SearchHitDto>,
    pub search_time_ms: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHitDto {
    pub document_id: String,
    pub file_name: String,
    pub chunk_index: i32,
    pub page_start: i32,
    pub page_end: i32,
    pub score: f32,
    pub source: SourceMode,
}

impl From<SearchHit> for SearchHitDto {
    fn from(hit: SearchHit) -> Self {
        Self {
            document_id: hit.document_id,
            file_name: hit.file_name,
            chunk_index: hit.chunk_index,
            page_start: hit.page_start,
            page_end: hit.page_end,
            score: hit.score,
            source: hit.source_mode,
        }
    }
}

impl From<SearchContentResponse> for SearchResponseDto {
    fn from(response: SearchContentResponse) -> Self {
        Self {
            query: response.query,
            mode: response.mode,
            total_results: response.hits.len(),
            results: response.hits.into_iter().map(Into::into).collect(),
            search_time_ms: response.search_time_ms,
        }
    }
}
