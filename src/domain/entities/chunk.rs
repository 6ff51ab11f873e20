use chrono::{DateTime, Utc};
use pgvector::Vector;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bounded text window, the unit of embedding and retrieval granularity.
/// Chunks follow the same delete-then-insert replacement discipline as pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    id: Uuid,
    document_id: String,
    file_name: String,
    chunk_index: i32,
    page_start: i32,
    page_end: i32,
    text: String,
    embedding: Option<Vector>,
    created_at: DateTime<Utc>,
}

impl Chunk {
    pub fn new(
        document_id: String,
        file_name: String,
        chunk_index: i32,
        page_start: i32,
        page_end: i32,
        text: String,
    ) -> Self {
        let id = Self::derive_id(&document_id, chunk_index);
        Self {
            id,
            document_id,
            file_name,
            chunk_index,
            page_start,
            page_end,
            text,
            embedding: None,
            created_at: Utc::now(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: Uuid,
        document_id: String,
        file_name: String,
        chunk_index: i32,
        page_start: i32,
        page_end: i32,
        text: String,
        embedding: Option<Vector>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            document_id,
            file_name,
            chunk_index,
            page_start,
            page_end,
            text,
            embedding,
            created_at,
        }
    }

    /// Chunk ids are derived from (document id, chunk index) so the same
    /// chunk position always maps to the same id across runs.
    pub fn derive_id(document_id: &str, chunk_index: i32) -> Uuid {
        Uuid::new_v5(
            &Uuid::NAMESPACE_OID,
            format!("{}:{}", document_id, chunk_index).as_bytes(),
        )
    }

    pub fn with_embedding(mut self, embedding: Vector) -> Self {
        self.embedding = Some(embedding);
        self
    }

    pub fn set_embedding(&mut self, embedding: Vector) {
        self.embedding = Some(embedding);
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn chunk_index(&self) -> i32 {
        self.chunk_index
    }

    pub fn page_start(&self) -> i32 {
        self.page_start
    }

    pub fn page_end(&self) -> i32 {
        self.page_end
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn embedding(&self) -> Option<&Vector> {
        self.embedding.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_ids_are_stable_per_document_and_index() {
        let a = Chunk::derive_id("doc-1", 0);
        let b = Chunk::derive_id("doc-1", 0);
        let c = Chunk::derive_id("doc-1", 1);
        let d = Chunk::derive_id("doc-2", 0);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn new_chunk_has_no_embedding() {
        let chunk = Chunk::new(
            "doc-1".to_string(),
            "report.pdf".to_string(),
            0,
            1,
            1,
            "some text".to_string(),
        );

        assert!(chunk.embedding().is_none());

        let chunk = chunk.with_embedding(Vector::from(vec![0.1, 0.2, 0.3]));
        assert_eq!(chunk.embedding().map(|e| e.as_slice().len()), Some(3));
    }
}
