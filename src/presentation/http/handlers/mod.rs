pub mod history_handler;
pub mod ingest_handler;
pub mod search_handler;

pub use history_handler::HistoryHandler;
pub use ingest_handler::IngestHandler;
pub use search_handler::SearchHandler;
