use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::info;

use models::{category, repo};
use crate::bulk::{require_ids, require_records, DeleteSummary, ImportSummary};
use crate::{errors::ServiceError, pagination::{self, Pagination}};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    pub status: String,
}

pub fn to_dto(m: category::Model) -> CategoryDto {
    CategoryDto { id: m.id, name: m.name, status: m.status }
}

fn new_active_model(input: &CategoryInput) -> Result<category::ActiveModel, ServiceError> {
    category::validate_fields(&input.name, &input.status)?;
    Ok(category::ActiveModel {
        name: Set(input.name.trim().to_string()),
        status: Set(input.status.trim().to_string()),
        ..Default::default()
    })
}

async fn find_model(db: &DatabaseConnection, id: i32) -> Result<category::Model, ServiceError> {
    repo::find_by_id::<category::Entity, _>(db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("category", id))
}

pub async fn create_category(db: &DatabaseConnection, input: CategoryInput) -> Result<CategoryDto, ServiceError> {
    let created = new_active_model(&input)?.insert(db).await?;
    info!(category_id = created.id, "category_created");
    Ok(to_dto(created))
}

pub async fn get_all_categories(db: &DatabaseConnection, page: Option<Pagination>) -> Result<Vec<CategoryDto>, ServiceError> {
    let rows = repo::find_all::<category::Entity, _>(db, pagination::window(page)).await?;
    Ok(rows.into_iter().map(to_dto).collect())
}

pub async fn get_category(db: &DatabaseConnection, id: i32) -> Result<CategoryDto, ServiceError> {
    Ok(to_dto(find_model(db, id).await?))
}

pub async fn update_category(db: &DatabaseConnection, id: i32, input: CategoryInput) -> Result<CategoryDto, ServiceError> {
    let existing = find_model(db, id).await?;
    category::validate_fields(&input.name, &input.status)?;
    let mut am: category::ActiveModel = existing.into();
    am.name = Set(input.name.trim().to_string());
    am.status = Set(input.status.trim().to_string());
    Ok(to_dto(am.update(db).await?))
}

pub async fn delete_category(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    if !repo::exists_by_id::<category::Entity, _>(db, id).await? {
        return Err(ServiceError::not_found("category", id));
    }
    repo::delete_by_id::<category::Entity, _>(db, id).await?;
    info!(category_id = id, "category_deleted");
    Ok(())
}

pub async fn delete_categories(db: &DatabaseConnection, ids: &[i32]) -> Result<DeleteSummary, ServiceError> {
    require_ids(ids)?;
    let txn = db.begin().await?;
    let deleted = repo::delete_by_ids::<category::Entity, _>(&txn, ids).await?;
    txn.commit().await?;
    info!(requested = ids.len(), deleted, "categories_deleted");
    Ok(DeleteSummary { deleted })
}

pub async fn import_categories(db: &DatabaseConnection, records: Vec<CategoryInput>) -> Result<ImportSummary, ServiceError> {
    require_records(&records)?;
    // Validate the whole batch before opening the transaction.
    let rows = records.iter().map(new_active_model).collect::<Result<Vec<_>, _>>()?;
    let txn = db.begin().await?;
    let imported = rows.len();
    for am in rows {
        am.insert(&txn).await?;
    }
    txn.commit().await?;
    info!(imported, "categories_imported");
    Ok(ImportSummary { imported })
}
