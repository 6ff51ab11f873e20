use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Page;
use crate::infrastructure::database::schema::pages;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = pages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PageModel {
    pub id: Uuid,
    pub document_id: String,
    pub file_name: String,
    pub page_number: i32,
    pub page_text: String,
    pub total_pages: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = pages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewPageModel {
    pub id: Uuid,
    pub document_id: String,
    pub file_name: String,
    pub page_number: i32,
    pub page_text: String,
    pub total_pages: i32,
    pub created_at: DateTime<Utc>,
}

impl From<PageModel> for Page {
    fn from(model: PageModel) -> Self {
        Page::from_parts(
            model.id,
            model.document_id,
            model.file_name,
            model.page_number,
            model.page_text,
            model.total_pages,
            model.created_at,
        )
    }
}

impl From<&Page> for NewPageModel {
    fn from(page: &Page) -> Self {
        Self {
            id: page.id(),
            document_id: page.document_id().to_string(),
            file_name: page.file_name().to_string(),
            page_number: page.page_number(),
            page_text: page.text().to_string(),
            total_pages: page.total_pages(),
            created_at: page.created_at(),
        }
    }
}
