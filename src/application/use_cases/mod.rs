pub mod get_document_history;
pub mod ingest_documents;
pub mod search_content;

pub use get_document_history::GetDocumentHistoryUseCase;
pub use ingest_documents::IngestDocumentsUseCase;
pub use search_content::SearchContentUseCase;
