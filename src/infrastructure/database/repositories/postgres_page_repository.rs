use async_trait::async_trait;
use diesel::prelude::*;

use crate::domain::entities::Page;
use crate::domain::repositories::{PageRepository, page_repository::PageRepositoryError};
use crate::infrastructure::database::models::{NewPageModel, PageModel};
use crate::infrastructure::database::schema::pages::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresPageRepository {
    pool: DbPool,
}

impl PostgresPageRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PageRepository for PostgresPageRepository {
    async fn replace_for_document(
        &self,
        document_id_param: &str,
        new_pages: &[Page],
    ) -> Result<(), PageRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| PageRepositoryError::DatabaseError(e.to_string()))?;

        diesel::delete(pages.filter(document_id.eq(document_id_param)))
            .execute(&mut conn)
            .map_err(|e| PageRepositoryError::DatabaseError(e.to_string()))?;

        let rows: Vec<NewPageModel> = new_pages.iter().map(NewPageModel::from).collect();

        diesel::insert_into(pages)
            .values(&rows)
            .execute(&mut conn)
            .map_err(|e| PageRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_document_id(
        &self,
        document_id_param: &str,
    ) -> Result<Vec<Page>, PageRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| PageRepositoryError::DatabaseError(e.to_string()))?;

        let models = pages
            .filter(document_id.eq(document_id_param))
            .order(page_number.asc())
            .load::<PageModel>(&mut conn)
            .map_err(|e| PageRepositoryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(Page::from).collect())
    }
}
