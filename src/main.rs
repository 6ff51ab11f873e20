use tracing_subscriber::EnvFilter;

use docurepo::config::AppConfig;
use docurepo::infrastructure::AppContainer;
use docurepo::presentation::http::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let container = AppContainer::new(&config).await?;

    let server = HttpServer::new(
        container.ingest_handler.clone(),
        container.search_handler.clone(),
        container.history_handler.clone(),
        config.port,
    );

    server.run().await
}
