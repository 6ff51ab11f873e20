pub mod history_dto;
pub mod ingest_dto;
pub mod response_dto;
pub mod search_dto;

pub use history_dto::{DocumentHistoryDto, ProcessingRecordDto};
pub use ingest_dto::{DocumentRefDto, IngestRequestDto, IngestResponseDto};
pub use response_dto::{ApiError, ApiResponse, HealthResponseDto};
pub use search_dto::{SearchRequestDto, SearchResponseDto};
