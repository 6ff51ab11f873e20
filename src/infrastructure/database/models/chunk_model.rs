use chrono::{DateTime, Utc};
use diesel::prelude::*;
use pgvector::Vector;
use uuid::Uuid;

use crate::domain::entities::Chunk;
use crate::infrastructure::database::schema::chunks;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = chunks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChunkModel {
    pub id: Uuid,
    pub document_id: String,
    pub file_name: String,
    pub chunk_index: i32,
    pub page_start: i32,
    pub page_end: i32,
    pub chunk_text: String,
    pub embedding: Option<Vector>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = chunks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewChunkModel {
    pub id: Uuid,
    pub document_id: String,
    pub file_name: String,
    pub chunk_index: i32,
    pub page_start: i32,
    pub page_end: i32,
    pub chunk_text: String,
    pub embedding: Option<Vector>,
    pub created_at: DateTime<Utc>,
}

impl From<ChunkModel> for Chunk {
    fn from(model: ChunkModel) -> Self {
        Chunk::from_parts(
            model.id,
            model.document_id,
            model.file_name,
            model.chunk_index,
            model.page_start,
            model.page_end,
            model.chunk_text,
            model.embedding,
            model.created_at,
        )
    }
}

impl From<&Chunk> for NewChunkModel {
    fn from(chunk: &Chunk) -> Self {
        Self {
            id: chunk.id(),
            document_id: chunk.document_id().to_string(),
            file_name: chunk.file_name().to_string(),
            chunk_index: chunk.chunk_index(),
            page_start: chunk.page_start(),
            page_end: chunk.page_end(),
            chunk_text: chunk.text().to_string(),
            embedding: chunk.embedding().cloned(),
            created_at: chunk.created_at(),
        }
    }
}
