pub mod document_extractors;
pub mod inference_client;

pub use document_extractors::CompositeDocumentExtractor;
pub use inference_client::{EmbeddingsClientConfig, InferenceClient, InferenceEmbeddingProvider};
