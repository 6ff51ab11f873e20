use async_trait::async_trait;
use diesel::prelude::*;

use crate::domain::entities::DocumentState;
use crate::domain::repositories::{StateRepository, state_repository::StateRepositoryError};
use crate::infrastructure::database::models::{DocumentStateModel, NewDocumentStateModel};
use crate::infrastructure::database::schema::document_state::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresStateRepository {
    pool: DbPool,
}

impl PostgresStateRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StateRepository for PostgresStateRepository {
    async fn find_by_document_id(
        &self,
        document_id_param: &str,
    ) -> Result<Option<DocumentState>, StateRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| StateRepositoryError::DatabaseError(e.to_string()))?;

        let result = document_state
            .find(document_id_param)
            .first::<DocumentStateModel>(&mut conn)
            .optional()
            .map_err(|e| StateRepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.map(DocumentState::from))
    }

    async fn commit(&self, state: &DocumentState) -> Result<(), StateRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| StateRepositoryError::DatabaseError(e.to_string()))?;

        let record = NewDocumentStateModel::from(state);

        // Upsert keyed by document id, last-write-wins.
        diesel::insert_into(document_state)
            .values(&record)
            .on_conflict(document_id)
            .do_update()
            .set(&record)
            .execute(&mut conn)
            .map_err(|e| StateRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
