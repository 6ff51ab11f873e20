pub mod health_routes;
pub mod history_routes;
pub mod ingest_routes;
pub mod search_routes;

pub use health_routes::health_routes;
pub use history_routes::history_routes;
pub use ingest_routes::ingest_routes;
pub use search_routes::search_routes;
