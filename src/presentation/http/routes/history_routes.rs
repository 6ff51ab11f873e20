use axum::{Router, routing::get};
use std::sync::Arc;

use crate::presentation::http::handlers::HistoryHandler;

pub fn history_routes(history_handler: Arc<HistoryHandler>) -> Router {
    Router::new()
        .route(
            "/documents/{document_id}/history",
            get(HistoryHandler::get_document_history),
        )
        .with_state(history_handler)
}
