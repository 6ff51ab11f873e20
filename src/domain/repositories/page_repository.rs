use async_trait::async_trait;

use crate::domain::entities::Page;

#[derive(Debug)]
pub enum PageRepositoryError {
    DatabaseError(String),
}

impl std::fmt::Display for PageRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for PageRepositoryError {}

#[async_trait]
pub trait PageRepository: Send + Sync {
    /// Deletes all pages for the document, then inserts the new set. Not
    /// transactional: a failure between the two leaves the document with no
    /// pages until the next successful run.
    async fn replace_for_document(
        &self,
        document_id: &str,
        pages: &[Page],
    ) -> Result<(), PageRepositoryError>;

    async fn find_by_document_id(&self, document_id: &str)
    -> Result<Vec<Page>, PageRepositoryError>;
}
