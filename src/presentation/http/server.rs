use axum::Router;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::presentation::http::{
    handlers::{HistoryHandler, IngestHandler, SearchHandler},
    routes::{health_routes, history_routes, ingest_routes, search_routes},
};

pub struct HttpServer {
    ingest_handler: Arc<IngestHandler>,
    search_handler: Arc<SearchHandler>,
    history_handler: Arc<HistoryHandler>,
    port: u16,
}

impl HttpServer {
    pub fn new(
        ingest_handler: Arc<IngestHandler>,
        search_handler: Arc<SearchHandler>,
        history_handler: Arc<HistoryHandler>,
        port: u16,
    ) -> Self {
        Self {
            ingest_handler,
            search_handler,
            history_handler,
            port,
        }
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let app = Router::new()
            .merge(health_routes())
            .merge(ingest_routes(self.ingest_handler))
            .merge(search_routes(self.search_handler))
            .merge(history_routes(self.history_handler))
            .layer(cors)
            .layer(RequestBodyLimitLayer::new(10 * 1024 * 1024))
            .layer(TraceLayer::new_for_http());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        let listener = TcpListener::bind(addr).await?;

        info!(%addr, "http server listening");

        axum::serve(listener, app).await?;

        Ok(())
    }
}
