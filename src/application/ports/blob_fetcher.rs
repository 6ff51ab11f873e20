use async_trait::async_trait;

use crate::domain::entities::DocumentRef;

#[derive(Debug)]
pub enum BlobFetchError {
    NotFound(String),
    IoError(String),
}

impl std::fmt::Display for BlobFetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlobFetchError::NotFound(name) => write!(f, "Blob not found: {}", name),
            BlobFetchError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for BlobFetchError {}

/// Retrieves raw document bytes given a location reference.
#[async_trait]
pub trait BlobFetcher: Send + Sync {
    /// Cheap revision check: an ETag-like value derived from the blob's
    /// metadata, readable without fetching the content itself.
    async fn fingerprint(&self, document: &DocumentRef) -> Result<String, BlobFetchError>;

    async fn fetch(&self, document: &DocumentRef) -> Result<Vec<u8>, BlobFetchError>;
}
