use chrono::{NaiveTime, Utc};
use sea_orm::{prelude::DateTimeWithTimeZone, ActiveModelTrait, ConnectionTrait, DatabaseConnection, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use models::{repo, store, user};
use crate::bulk::{require_ids, require_records, DeleteSummary, ImportSummary};
use crate::image::{ImageUpload, StoredImage};
use crate::{errors::ServiceError, pagination::{self, Pagination}};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub image_name: Option<String>,
    pub image_type: Option<String>,
    pub open_time: Option<NaiveTime>,
    pub close_time: Option<NaiveTime>,
    pub status: String,
    pub owner_id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

/// Scalar store fields accepted on create, update and import.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreInput {
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub open_time: Option<String>,
    #[serde(default)]
    pub close_time: Option<String>,
    pub status: String,
    pub owner_id: i32,
}

pub fn to_dto(m: store::Model) -> StoreDto {
    StoreDto {
        id: m.id,
        name: m.name,
        description: m.description,
        address: m.address,
        phone: m.phone,
        image_name: m.image_name,
        image_type: m.image_type,
        open_time: m.open_time,
        close_time: m.close_time,
        status: m.status,
        owner_id: m.owner_id,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

struct CheckedStore {
    open_time: Option<NaiveTime>,
    close_time: Option<NaiveTime>,
}

fn optional_time(field: &str, value: Option<&str>) -> Result<Option<NaiveTime>, ServiceError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => Ok(Some(store::parse_time(field, v)?)),
    }
}

/// Field checks plus owner existence, shared by create, update and import.
async fn check_input<C: ConnectionTrait>(db: &C, input: &StoreInput) -> Result<CheckedStore, ServiceError> {
    store::validate_fields(&input.name, &input.description, &input.address, &input.phone, &input.status)?;
    let open_time = optional_time("openTime", input.open_time.as_deref())?;
    let close_time = optional_time("closeTime", input.close_time.as_deref())?;
    if !repo::exists_by_id::<user::Entity, _>(db, input.owner_id).await? {
        return Err(ServiceError::Validation(format!("owner {} does not exist", input.owner_id)));
    }
    Ok(CheckedStore { open_time, close_time })
}

fn new_active_model(input: StoreInput, checked: CheckedStore) -> store::ActiveModel {
    let now = Utc::now().into();
    store::ActiveModel {
        name: Set(input.name.trim().to_string()),
        description: Set(input.description.trim().to_string()),
        address: Set(input.address.trim().to_string()),
        phone: Set(input.phone.trim().to_string()),
        image_name: Set(None),
        image_type: Set(None),
        image: Set(None),
        open_time: Set(checked.open_time),
        close_time: Set(checked.close_time),
        status: Set(input.status.trim().to_string()),
        owner_id: Set(input.owner_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
}

fn apply_image(am: &mut store::ActiveModel, upload: Option<ImageUpload>) {
    if let Some(upload) = ImageUpload::non_empty(upload) {
        let (name, content_type, bytes) = upload.into_columns();
        am.image_name = Set(name);
        am.image_type = Set(content_type);
        am.image = Set(bytes);
    }
}

async fn find_model(db: &DatabaseConnection, id: i32) -> Result<store::Model, ServiceError> {
    repo::find_by_id::<store::Entity, _>(db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("store", id))
}

#[instrument(skip(db, input, image), fields(owner_id = input.owner_id))]
pub async fn create_store(db: &DatabaseConnection, input: StoreInput, image: Option<ImageUpload>) -> Result<StoreDto, ServiceError> {
    let checked = check_input(db, &input).await?;
    let mut am = new_active_model(input, checked);
    apply_image(&mut am, image);
    let created = am.insert(db).await?;
    info!(store_id = created.id, has_image = created.image.is_some(), "store_created");
    Ok(to_dto(created))
}

pub async fn get_all_stores(db: &DatabaseConnection, page: Option<Pagination>) -> Result<Vec<StoreDto>, ServiceError> {
    let rows = repo::find_all::<store::Entity, _>(db, pagination::window(page)).await?;
    Ok(rows.into_iter().map(to_dto).collect())
}

pub async fn get_store(db: &DatabaseConnection, id: i32) -> Result<StoreDto, ServiceError> {
    Ok(to_dto(find_model(db, id).await?))
}

pub async fn get_store_image(db: &DatabaseConnection, id: i32) -> Result<StoredImage, ServiceError> {
    let m = find_model(db, id).await?;
    StoredImage::from_columns(m.image_type, m.image).ok_or_else(|| ServiceError::not_found("store image", id))
}

/// Overwrite scalar fields; image columns change only when a non-empty file is supplied.
#[instrument(skip(db, input, image), fields(store_id = id))]
pub async fn update_store(db: &DatabaseConnection, id: i32, input: StoreInput, image: Option<ImageUpload>) -> Result<StoreDto, ServiceError> {
    let existing = find_model(db, id).await?;
    let checked = check_input(db, &input).await?;

    let mut am: store::ActiveModel = existing.into();
    am.name = Set(input.name.trim().to_string());
    am.description = Set(input.description.trim().to_string());
    am.address = Set(input.address.trim().to_string());
    am.phone = Set(input.phone.trim().to_string());
    am.open_time = Set(checked.open_time);
    am.close_time = Set(checked.close_time);
    am.status = Set(input.status.trim().to_string());
    am.owner_id = Set(input.owner_id);
    am.updated_at = Set(Utc::now().into());
    apply_image(&mut am, image);
    let updated = am.update(db).await?;
    Ok(to_dto(updated))
}

pub async fn delete_store(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    if !repo::exists_by_id::<store::Entity, _>(db, id).await? {
        return Err(ServiceError::not_found("store", id));
    }
    repo::delete_by_id::<store::Entity, _>(db, id).await?;
    info!(store_id = id, "store_deleted");
    Ok(())
}

pub async fn delete_stores(db: &DatabaseConnection, ids: &[i32]) -> Result<DeleteSummary, ServiceError> {
    require_ids(ids)?;
    let txn = db.begin().await?;
    let deleted = repo::delete_by_ids::<store::Entity, _>(&txn, ids).await?;
    txn.commit().await?;
    info!(requested = ids.len(), deleted, "stores_deleted");
    Ok(DeleteSummary { deleted })
}

/// Insert every record or none.
pub async fn import_stores(db: &DatabaseConnection, records: Vec<StoreInput>) -> Result<ImportSummary, ServiceError> {
    require_records(&records)?;
    let txn = db.begin().await?;
    let mut imported = 0;
    for input in records {
        let checked = check_input(&txn, &input).await?;
        new_active_model(input, checked).insert(&txn).await?;
        imported += 1;
    }
    txn.commit().await?;
    info!(imported, "stores_imported");
    Ok(ImportSummary { imported })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order_service::{create_order, get_order, CreateOrderInput, OrderItemInput};
    use crate::test_support::get_db;
    use crate::user_service::{create_user, CreateUserInput};

    async fn owner(db: &DatabaseConnection) -> Result<i32, ServiceError> {
        let u = create_user(db, CreateUserInput {
            email: "owner@example.com".into(),
            phone: "0907777777".into(),
            password: "secret1".into(),
            first_name: "Quan".into(),
            last_name: "Do".into(),
            role: Some("OWNER".into()),
        })
        .await?;
        Ok(u.id)
    }

    fn input(owner_id: i32) -> StoreInput {
        StoreInput {
            name: "Corner Cafe".into(),
            description: "Coffee and cake".into(),
            address: "12 Hai Ba Trung".into(),
            phone: "0281234567".into(),
            open_time: Some("07:00".into()),
            close_time: Some("21:30:00".into()),
            status: "ACTIVE".into(),
            owner_id,
        }
    }

    fn png() -> ImageUpload {
        ImageUpload { file_name: Some("logo.png".into()), content_type: Some("image/png".into()), bytes: vec![0x89, b'P', b'N', b'G', 0, 1, 2] }
    }

    #[tokio::test]
    async fn create_with_image_and_fetch_bytes() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let owner_id = owner(&db).await?;
        let s = create_store(&db, input(owner_id), Some(png())).await?;
        assert_eq!(s.image_name.as_deref(), Some("logo.png"));
        assert_eq!(s.open_time, NaiveTime::from_hms_opt(7, 0, 0));

        let img = get_store_image(&db, s.id).await?;
        assert_eq!(img.bytes, png().bytes);
        assert_eq!(img.content_type, "image/png");
        Ok(())
    }

    #[tokio::test]
    async fn missing_owner_is_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let res = create_store(&db, input(42), None).await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
        assert!(get_all_stores(&db, None).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_keeps_image_without_new_file() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let owner_id = owner(&db).await?;
        let s = create_store(&db, input(owner_id), Some(png())).await?;

        let mut changed = input(owner_id);
        changed.name = "Corner Cafe 2".into();
        changed.open_time = None;
        let empty = ImageUpload { file_name: Some("x.png".into()), content_type: None, bytes: vec![] };
        let updated = update_store(&db, s.id, changed, Some(empty)).await?;
        assert_eq!(updated.name, "Corner Cafe 2");
        assert_eq!(updated.open_time, None);
        assert_eq!(updated.image_name.as_deref(), Some("logo.png"));
        assert_eq!(get_store_image(&db, s.id).await?.bytes, png().bytes);

        assert!(matches!(update_store(&db, 999, input(owner_id), None).await, Err(ServiceError::NotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn image_missing_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let owner_id = owner(&db).await?;
        let s = create_store(&db, input(owner_id), None).await?;
        assert!(matches!(get_store_image(&db, s.id).await, Err(ServiceError::NotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn import_is_all_or_nothing() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let owner_id = owner(&db).await?;
        let mut bad = input(owner_id);
        bad.phone = "12".into();
        let res = import_stores(&db, vec![input(owner_id), bad]).await;
        assert!(res.is_err());
        assert!(get_all_stores(&db, None).await?.is_empty());

        let ok = import_stores(&db, vec![input(owner_id), input(owner_id)]).await?;
        assert_eq!(ok.imported, 2);
        let all = get_all_stores(&db, None).await?;
        let ids: Vec<i32> = all.iter().map(|s| s.id).collect();
        let summary = delete_stores(&db, &[ids[0], 999]).await?;
        assert_eq!(summary.deleted, 1);
        delete_store(&db, ids[1]).await?;
        assert!(matches!(delete_store(&db, ids[1]).await, Err(ServiceError::NotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn deleting_a_store_detaches_its_orders() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let owner_id = owner(&db).await?;
        let s = create_store(&db, input(owner_id), None).await?;
        let mut orders = vec![];
        for qty in [1, 2] {
            let o = create_order(&db, CreateOrderInput {
                user_id: owner_id,
                store_id: Some(s.id),
                status: None,
                items: vec![OrderItemInput { product_name: "Ca phe sua".into(), quantity: qty, unit_price: 30000 }],
            })
            .await?;
            orders.push(o.id);
        }

        delete_store(&db, s.id).await?;
        for id in orders {
            let o = get_order(&db, id).await?;
            assert_eq!(o.store_id, None);
            assert_eq!(o.items.len(), 1);
        }
        Ok(())
    }
}
