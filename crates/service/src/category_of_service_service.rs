use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::info;

use models::{category_of_service, repo};
use crate::bulk::{require_ids, require_records, DeleteSummary, ImportSummary};
use crate::image::{ImageUpload, StoredImage};
use crate::{errors::ServiceError, pagination::{self, Pagination}};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOfServiceDto {
    pub id: i32,
    pub name: String,
    pub image_name: Option<String>,
    pub image_type: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOfServiceInput {
    pub name: String,
    pub status: String,
}

pub fn to_dto(m: category_of_service::Model) -> CategoryOfServiceDto {
    CategoryOfServiceDto {
        id: m.id,
        name: m.name,
        image_name: m.image_name,
        image_type: m.image_type,
        status: m.status,
    }
}

fn new_active_model(input: &CategoryOfServiceInput) -> Result<category_of_service::ActiveModel, ServiceError> {
    category_of_service::validate_fields(&input.name, &input.status)?;
    Ok(category_of_service::ActiveModel {
        name: Set(input.name.trim().to_string()),
        image_name: Set(None),
        image_type: Set(None),
        image: Set(None),
        status: Set(input.status.trim().to_string()),
        ..Default::default()
    })
}

fn apply_image(am: &mut category_of_service::ActiveModel, upload: Option<ImageUpload>) {
    if let Some(upload) = ImageUpload::non_empty(upload) {
        let (name, content_type, bytes) = upload.into_columns();
        am.image_name = Set(name);
        am.image_type = Set(content_type);
        am.image = Set(bytes);
    }
}

async fn find_model(db: &DatabaseConnection, id: i32) -> Result<category_of_service::Model, ServiceError> {
    repo::find_by_id::<category_of_service::Entity, _>(db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("category of service", id))
}

pub async fn create_category_of_service(
    db: &DatabaseConnection,
    input: CategoryOfServiceInput,
    image: Option<ImageUpload>,
) -> Result<CategoryOfServiceDto, ServiceError> {
    let mut am = new_active_model(&input)?;
    apply_image(&mut am, image);
    let created = am.insert(db).await?;
    info!(category_of_service_id = created.id, has_image = created.image.is_some(), "category_of_service_created");
    Ok(to_dto(created))
}

pub async fn get_all_categories_of_service(
    db: &DatabaseConnection,
    page: Option<Pagination>,
) -> Result<Vec<CategoryOfServiceDto>, ServiceError> {
    let rows = repo::find_all::<category_of_service::Entity, _>(db, pagination::window(page)).await?;
    Ok(rows.into_iter().map(to_dto).collect())
}

pub async fn get_category_of_service(db: &DatabaseConnection, id: i32) -> Result<CategoryOfServiceDto, ServiceError> {
    Ok(to_dto(find_model(db, id).await?))
}

pub async fn get_category_of_service_image(db: &DatabaseConnection, id: i32) -> Result<StoredImage, ServiceError> {
    let m = find_model(db, id).await?;
    StoredImage::from_columns(m.image_type, m.image)
        .ok_or_else(|| ServiceError::not_found("category of service image", id))
}

pub async fn update_category_of_service(
    db: &DatabaseConnection,
    id: i32,
    input: CategoryOfServiceInput,
    image: Option<ImageUpload>,
) -> Result<CategoryOfServiceDto, ServiceError> {
    let existing = find_model(db, id).await?;
    category_of_service::validate_fields(&input.name, &input.status)?;
    let mut am: category_of_service::ActiveModel = existing.into();
    am.name = Set(input.name.trim().to_string());
    am.status = Set(input.status.trim().to_string());
    apply_image(&mut am, image);
    Ok(to_dto(am.update(db).await?))
}

pub async fn delete_category_of_service(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    if !repo::exists_by_id::<category_of_service::Entity, _>(db, id).await? {
        return Err(ServiceError::not_found("category of service", id));
    }
    repo::delete_by_id::<category_of_service::Entity, _>(db, id).await?;
    info!(category_of_service_id = id, "category_of_service_deleted");
    Ok(())
}

pub async fn delete_categories_of_service(db: &DatabaseConnection, ids: &[i32]) -> Result<DeleteSummary, ServiceError> {
    require_ids(ids)?;
    let txn = db.begin().await?;
    let deleted = repo::delete_by_ids::<category_of_service::Entity, _>(&txn, ids).await?;
    txn.commit().await?;
    info!(requested = ids.len(), deleted, "categories_of_service_deleted");
    Ok(DeleteSummary { deleted })
}

pub async fn import_categories_of_service(
    db: &DatabaseConnection,
    records: Vec<CategoryOfServiceInput>,
) -> Result<ImportSummary, ServiceError> {
    require_records(&records)?;
    let rows = records.iter().map(new_active_model).collect::<Result<Vec<_>, _>>()?;
    let txn = db.begin().await?;
    let imported = rows.len();
    for am in rows {
        am.insert(&txn).await?;
    }
    txn.commit().await?;
    info!(imported, "categories_of_service_imported");
    Ok(ImportSummary { imported })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn input(name: &str) -> CategoryOfServiceInput {
        CategoryOfServiceInput { name: name.into(), status: "ACTIVE".into() }
    }

    #[tokio::test]
    async fn image_round_trips_and_survives_plain_update() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let upload = ImageUpload { file_name: Some("icon.jpg".into()), content_type: Some("image/jpeg".into()), bytes: vec![0xff, 0xd8, 0xff, 0xe0] };
        let c = create_category_of_service(&db, input("Spa"), Some(upload.clone())).await?;
        assert_eq!(c.image_type.as_deref(), Some("image/jpeg"));

        let updated = update_category_of_service(&db, c.id, input("Spa & Massage"), None).await?;
        assert_eq!(updated.name, "Spa & Massage");
        let img = get_category_of_service_image(&db, c.id).await?;
        assert_eq!(img.bytes, upload.bytes);
        assert_eq!(img.content_type, "image/jpeg");
        Ok(())
    }

    #[tokio::test]
    async fn replacing_the_image() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let c = create_category_of_service(&db, input("Laundry"), None).await?;
        assert!(matches!(get_category_of_service_image(&db, c.id).await, Err(ServiceError::NotFound { .. })));

        let upload = ImageUpload { file_name: Some("l.bin".into()), content_type: None, bytes: vec![9, 9, 9] };
        update_category_of_service(&db, c.id, input("Laundry"), Some(upload)).await?;
        let img = get_category_of_service_image(&db, c.id).await?;
        assert_eq!(img.content_type, crate::image::FALLBACK_CONTENT_TYPE);
        assert_eq!(img.bytes, vec![9, 9, 9]);
        Ok(())
    }

    #[tokio::test]
    async fn import_and_bulk_delete() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        assert_eq!(import_categories_of_service(&db, vec![input("A"), input("B")]).await?.imported, 2);
        let ids: Vec<i32> = get_all_categories_of_service(&db, None).await?.iter().map(|c| c.id).collect();
        assert_eq!(delete_categories_of_service(&db, &[ids[0], ids[1], 999]).await?.deleted, 2);
        assert!(matches!(delete_category_of_service(&db, ids[0]).await, Err(ServiceError::NotFound { .. })));
        Ok(())
    }
}
