pub mod postgres_chunk_repository;
pub mod postgres_history_repository;
pub mod postgres_page_repository;
pub mod postgres_state_repository;

pub use postgres_chunk_repository::PostgresChunkRepository;
pub use postgres_history_repository::PostgresHistoryRepository;
pub use postgres_page_repository::PostgresPageRepository;
pub use postgres_state_repository::PostgresStateRepository;
