pub mod blob_fetcher;
pub mod document_parser;
pub mod embedding_provider;

pub use blob_fetcher::BlobFetcher;
pub use document_parser::DocumentParser;
pub use embedding_provider::EmbeddingProvider;
