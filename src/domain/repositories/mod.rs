pub mod chunk_repository;
pub mod history_repository;
pub mod page_repository;
pub mod state_repository;

pub use chunk_repository::ChunkRepository;
pub use history_repository::HistoryRepository;
pub use page_repository::PageRepository;
pub use state_repository::StateRepository;
