use axum::{Router, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::IngestHandler;

pub fn ingest_routes(ingest_handler: Arc<IngestHandler>) -> Router {
    Router::new()
        .route("/ingest", post(IngestHandler::ingest_documents))
        .with_state(ingest_handler)
}
