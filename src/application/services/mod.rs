pub mod chunker;
pub mod fusion;
pub mod parse_cache;
pub mod parsing_service;
pub mod pipeline;
pub mod retry;
pub mod search_service;

pub use chunker::Chunker;
pub use parse_cache::ParseCache;
pub use parsing_service::ParsingService;
pub use pipeline::PipelineCoordinator;
pub use search_service::SearchService;
