use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{Array, BigInt, Float, Integer, Text};
use pgvector::{Vector, VectorExpressionMethods};

use crate::domain::entities::{Chunk, ScoredChunk};
use crate::domain::repositories::{ChunkRepository, chunk_repository::ChunkRepositoryError};
use crate::infrastructure::database::models::{ChunkModel, NewChunkModel};
use crate::infrastructure::database::schema::chunks::dsl;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

const LEXICAL_SEARCH_SQL: &str = "\
    SELECT document_id, file_name, chunk_index, page_start, page_end, \
           ts_rank(to_tsvector('english', chunk_text), plainto_tsquery('english', $1)) AS score \
    FROM chunks \
    WHERE to_tsvector('english', chunk_text) @@ plainto_tsquery('english', $1) \
    ORDER BY score DESC \
    LIMIT $2";

const LEXICAL_SEARCH_FILTERED_SQL: &str = "\
    SELECT document_id, file_name, chunk_index, page_start, page_end, \
           ts_rank(to_tsvector('english', chunk_text), plainto_tsquery('english', $1)) AS score \
    FROM chunks \
    WHERE to_tsvector('english', chunk_text) @@ plainto_tsquery('english', $1) \
      AND file_name = ANY($3) \
    ORDER BY score DESC \
    LIMIT $2";

#[derive(Debug, QueryableByName)]
struct LexicalSearchRow {
    #[diesel(sql_type = Text)]
    document_id: String,
    #[diesel(sql_type = Text)]
    file_name: String,
    #[diesel(sql_type = Integer)]
    chunk_index: i32,
    #[diesel(sql_type = Integer)]
    page_start: i32,
    #[diesel(sql_type = Integer)]
    page_end: i32,
    #[diesel(sql_type = Float)]
    score: f32,
}

impl From<LexicalSearchRow> for ScoredChunk {
    fn from(row: LexicalSearchRow) -> Self {
        ScoredChunk {
            document_id: row.document_id,
            file_name: row.file_name,
            chunk_index: row.chunk_index,
            page_start: row.page_start,
            page_end: row.page_end,
            score: row.score,
        }
    }
}

pub struct PostgresChunkRepository {
    pool: DbPool,
}

impl PostgresChunkRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChunkRepository for PostgresChunkRepository {
    async fn replace_for_document(
        &self,
        document_id_param: &str,
        new_chunks: &[Chunk],
    ) -> Result<(), ChunkRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        diesel::delete(dsl::chunks.filter(dsl::document_id.eq(document_id_param)))
            .execute(&mut conn)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        let rows: Vec<NewChunkModel> = new_chunks.iter().map(NewChunkModel::from).collect();

        diesel::insert_into(dsl::chunks)
            .values(&rows)
            .execute(&mut conn)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_document_id(
        &self,
        document_id_param: &str,
    ) -> Result<Vec<Chunk>, ChunkRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        let models = dsl::chunks
            .filter(dsl::document_id.eq(document_id_param))
            .order(dsl::chunk_index.asc())
            .load::<ChunkModel>(&mut conn)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(Chunk::from).collect())
    }

    async fn lexical_search(
        &self,
        query: &str,
        limit: i64,
        file_names: Option<&[String]>,
    ) -> Result<Vec<ScoredChunk>, ChunkRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        let rows: Vec<LexicalSearchRow> = match file_names {
            Some(names) => diesel::sql_query(LEXICAL_SEARCH_FILTERED_SQL)
                .bind::<Text, _>(query)
                .bind::<BigInt, _>(limit)
                .bind::<Array<Text>, _>(names.to_vec())
                .load(&mut conn),
            None => diesel::sql_query(LEXICAL_SEARCH_SQL)
                .bind::<Text, _>(query)
                .bind::<BigInt, _>(limit)
                .load(&mut conn),
        }
        .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(ScoredChunk::from).collect())
    }

    async fn vector_search(
        &self,
        query_embedding: &Vector,
        limit: i64,
        file_names: Option<&[String]>,
    ) -> Result<Vec<ScoredChunk>, ChunkRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        let results: Vec<(ChunkModel, f64)> = match file_names {
            Some(names) => dsl::chunks
                .filter(dsl::embedding.is_not_null())
                .filter(dsl::file_name.eq_any(names))
                .select((
                    ChunkModel::as_select(),
                    dsl::embedding.cosine_distance(query_embedding.clone()).assume_not_null(),
                ))
                .order(dsl::embedding.cosine_distance(query_embedding.clone()))
                .limit(limit)
                .load(&mut conn),
            None => dsl::chunks
                .filter(dsl::embedding.is_not_null())
                .select((
                    ChunkModel::as_select(),
                    dsl::embedding.cosine_distance(query_embedding.clone()).assume_not_null(),
                ))
                .order(dsl::embedding.cosine_distance(query_embedding.clone()))
                .limit(limit)
                .load(&mut conn),
        }
        .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        Ok(results
            .into_iter()
            .map(|(model, distance)| ScoredChunk {
                document_id: model.document_id,
                file_name: model.file_name,
                chunk_index: model.chunk_index,
                page_start: model.page_start,
                page_end: model.page_end,
                // Cosine distance to similarity.
                score: 1.0 - distance as f32,
            })
            .collect())
    }
}
