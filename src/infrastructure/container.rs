use std::sync::Arc;

use crate::{
    application::{
        ports::{BlobFetcher, DocumentParser, EmbeddingProvider},
        services::{Chunker, ParseCache, ParsingService, PipelineCoordinator, SearchService},
        use_cases::{GetDocumentHistoryUseCase, IngestDocumentsUseCase, SearchContentUseCase},
    },
    config::AppConfig,
    domain::repositories::{ChunkRepository, HistoryRepository, PageRepository, StateRepository},
    infrastructure::{
        database::{
            create_connection_pool,
            repositories::{
                PostgresChunkRepository, PostgresHistoryRepository, PostgresPageRepository,
                PostgresStateRepository,
            },
            run_migrations,
        },
        external_services::{
            EmbeddingsClientConfig, InferenceClient, InferenceEmbeddingProvider,
            document_extractors::CompositeDocumentExtractor,
        },
        file_system::LocalBlobStore,
    },
    presentation::http::handlers::{HistoryHandler, IngestHandler, SearchHandler},
};

pub struct AppContainer {
    pub state_repository: Arc<dyn StateRepository>,
    pub page_repository: Arc<dyn PageRepository>,
    pub chunk_repository: Arc<dyn ChunkRepository>,
    pub history_repository: Arc<dyn HistoryRepository>,

    pub blob_fetcher: Arc<dyn BlobFetcher>,
    pub document_parser: Arc<dyn DocumentParser>,
    pub embedding_provider: Arc<dyn EmbeddingProvider>,

    pub pipeline: Arc<PipelineCoordinator>,
    pub search_service: Arc<SearchService>,

    pub ingest_use_case: Arc<IngestDocumentsUseCase>,
    pub search_use_case: Arc<SearchContentUseCase>,
    pub history_use_case: Arc<GetDocumentHistoryUseCase>,

    pub ingest_handler: Arc<IngestHandler>,
    pub search_handler: Arc<SearchHandler>,
    pub history_handler: Arc<HistoryHandler>,
}

impl AppContainer {
    pub async fn new(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let db_pool = create_connection_pool(&config.database_url)?;
        run_migrations(&db_pool)?;

        let state_repository: Arc<dyn StateRepository> =
            Arc::new(PostgresStateRepository::new(db_pool.clone()));
        let page_repository: Arc<dyn PageRepository> =
            Arc::new(PostgresPageRepository::new(db_pool.clone()));
        let chunk_repository: Arc<dyn ChunkRepository> =
            Arc::new(PostgresChunkRepository::new(db_pool.clone()));
        let history_repository: Arc<dyn HistoryRepository> =
            Arc::new(PostgresHistoryRepository::new(db_pool));

        let blob_fetcher: Arc<dyn BlobFetcher> =
            Arc::new(LocalBlobStore::new(config.blob_store_dir.clone()));
        let document_parser: Arc<dyn DocumentParser> =
            Arc::new(CompositeDocumentExtractor::new());

        let inference_client = InferenceClient::new(EmbeddingsClientConfig::from_env(
            config.embedding_dimension,
        ))?;
        let embedding_provider: Arc<dyn EmbeddingProvider> =
            Arc::new(InferenceEmbeddingProvider::new(inference_client));

        let parsing_service = Arc::new(ParsingService::new(
            document_parser.clone(),
            ParseCache::new(config.parse_cache),
        ));

        let pipeline = Arc::new(PipelineCoordinator::new(
            blob_fetcher.clone(),
            parsing_service,
            Chunker::new(config.chunking),
            embedding_provider.clone(),
            state_repository.clone(),
            page_repository.clone(),
            chunk_repository.clone(),
            history_repository.clone(),
            config.retry,
            config.concurrency,
        ));

        let search_service = Arc::new(SearchService::new(
            chunk_repository.clone(),
            embedding_provider.clone(),
            config.search_timeout,
        ));

        let ingest_use_case = Arc::new(IngestDocumentsUseCase::new(pipeline.clone()));
        let search_use_case = Arc::new(SearchContentUseCase::new(search_service.clone()));
        let history_use_case = Arc::new(GetDocumentHistoryUseCase::new(history_repository.clone()));

        let ingest_handler = Arc::new(IngestHandler::new(ingest_use_case.clone()));
        let search_handler = Arc::new(SearchHandler::new(search_use_case.clone()));
        let history_handler = Arc::new(HistoryHandler::new(history_use_case.clone()));

        Ok(Self {
            state_repository,
            page_repository,
            chunk_repository,
            history_repository,
            blob_fetcher,
            document_parser,
            embedding_provider,
            pipeline,
            search_service,
            ingest_use_case,
            search_use_case,
            history_use_case,
            ingest_handler,
            search_handler,
            history_handler,
        })
    }
}
