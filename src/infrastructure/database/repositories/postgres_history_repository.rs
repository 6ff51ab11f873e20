use async_trait::async_trait;
use diesel::prelude::*;

use crate::domain::entities::ProcessingRecord;
use crate::domain::repositories::{HistoryRepository, history_repository::HistoryRepositoryError};
use crate::infrastructure::database::models::{NewProcessingRecordModel, ProcessingRecordModel};
use crate::infrastructure::database::schema::processing_history::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresHistoryRepository {
    pool: DbPool,
}

impl PostgresHistoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryRepository for PostgresHistoryRepository {
    async fn append(&self, record: &ProcessingRecord) -> Result<(), HistoryRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| HistoryRepositoryError::DatabaseError(e.to_string()))?;

        let row = NewProcessingRecordModel::from(record);

        diesel::insert_into(processing_history)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| HistoryRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_document_id(
        &self,
        document_id_param: &str,
    ) -> Result<Vec<ProcessingRecord>, HistoryRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| HistoryRepositoryError::DatabaseError(e.to_string()))?;

        let models = processing_history
            .filter(document_id.eq(document_id_param))
            .order(started_at.desc())
            .load::<ProcessingRecordModel>(&mut conn)
            .map_err(|e| HistoryRepositoryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(ProcessingRecord::from).collect())
    }
}
