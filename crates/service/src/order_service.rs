use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{prelude::DateTimeWithTimeZone, ActiveModelTrait, DatabaseConnection, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use models::{order, order_item, repo, store, user};
use crate::bulk::{require_ids, DeleteSummary};
use crate::{errors::ServiceError, pagination::{self, Pagination}};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: i32,
    pub user_id: i32,
    pub store_id: Option<i32>,
    pub status: String,
    pub total_amount: i64,
    pub created_at: DateTimeWithTimeZone,
    pub items: Vec<OrderItemDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderInput {
    pub user_id: i32,
    #[serde(default)]
    pub store_id: Option<i32>,
    #[serde(default)]
    pub status: Option<String>,
    pub items: Vec<OrderItemInput>,
}

fn item_dto(m: order_item::Model) -> OrderItemDto {
    OrderItemDto { id: m.id, product_name: m.product_name, quantity: m.quantity, unit_price: m.unit_price }
}

pub fn to_dto(m: order::Model, items: Vec<order_item::Model>) -> OrderDto {
    OrderDto {
        id: m.id,
        user_id: m.user_id,
        store_id: m.store_id,
        status: m.status,
        total_amount: m.total_amount,
        created_at: m.created_at,
        items: items.into_iter().map(item_dto).collect(),
    }
}

/// Σ quantity × unit_price, rejecting lines that fail validation or overflow.
fn order_total(items: &[OrderItemInput]) -> Result<i64, ServiceError> {
    if items.is_empty() {
        return Err(ServiceError::Validation("order needs at least one item".into()));
    }
    items.iter().try_fold(0i64, |acc, line| {
        order_item::validate_line(&line.product_name, line.quantity, line.unit_price)?;
        i64::from(line.quantity)
            .checked_mul(line.unit_price)
            .and_then(|sub| acc.checked_add(sub))
            .ok_or_else(|| ServiceError::Validation("order total overflows".into()))
    })
}

/// Attach items to each order, preserving order of `orders`.
async fn with_items(db: &DatabaseConnection, orders: Vec<order::Model>) -> Result<Vec<OrderDto>, ServiceError> {
    let ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
    let mut grouped: HashMap<i32, Vec<order_item::Model>> = HashMap::new();
    for item in order_item::find_by_orders(db, &ids).await? {
        grouped.entry(item.order_id).or_default().push(item);
    }
    Ok(orders
        .into_iter()
        .map(|o| {
            let items = grouped.remove(&o.id).unwrap_or_default();
            to_dto(o, items)
        })
        .collect())
}

/// Create an order and its lines in one transaction; the total is computed here.
#[instrument(skip(db, input), fields(user_id = input.user_id, store_id = ?input.store_id))]
pub async fn create_order(db: &DatabaseConnection, input: CreateOrderInput) -> Result<OrderDto, ServiceError> {
    let total = order_total(&input.items)?;
    let status = match input.status.as_deref().map(str::trim) {
        None | Some("") => order::DEFAULT_STATUS.to_string(),
        Some(s) => s.to_ascii_uppercase(),
    };

    let txn = db.begin().await?;
    if !repo::exists_by_id::<user::Entity, _>(&txn, input.user_id).await? {
        return Err(ServiceError::Validation(format!("user {} does not exist", input.user_id)));
    }
    if let Some(store_id) = input.store_id {
        if !repo::exists_by_id::<store::Entity, _>(&txn, store_id).await? {
            return Err(ServiceError::Validation(format!("store {store_id} does not exist")));
        }
    }

    let created = order::ActiveModel {
        user_id: Set(input.user_id),
        store_id: Set(input.store_id),
        status: Set(status),
        total_amount: Set(total),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut items = Vec::with_capacity(input.items.len());
    for line in input.items {
        let item = order_item::ActiveModel {
            order_id: Set(created.id),
            product_name: Set(line.product_name.trim().to_string()),
            quantity: Set(line.quantity),
            unit_price: Set(line.unit_price),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        items.push(item);
    }
    txn.commit().await?;
    info!(order_id = created.id, total, lines = items.len(), "order_created");
    Ok(to_dto(created, items))
}

pub async fn get_all_orders(db: &DatabaseConnection, page: Option<Pagination>) -> Result<Vec<OrderDto>, ServiceError> {
    let rows = repo::find_all::<order::Entity, _>(db, pagination::window(page)).await?;
    with_items(db, rows).await
}

pub async fn get_order(db: &DatabaseConnection, id: i32) -> Result<OrderDto, ServiceError> {
    let m = repo::find_by_id::<order::Entity, _>(db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("order", id))?;
    let items = order_item::find_by_order(db, m.id).await?;
    Ok(to_dto(m, items))
}

/// Orders placed by one user; the user must exist.
pub async fn get_orders_by_user(db: &DatabaseConnection, user_id: i32) -> Result<Vec<OrderDto>, ServiceError> {
    if !repo::exists_by_id::<user::Entity, _>(db, user_id).await? {
        return Err(ServiceError::not_found("user", user_id));
    }
    let rows = order::find_all_by_user_id(db, user_id).await?;
    with_items(db, rows).await
}

pub async fn delete_order(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    if !repo::exists_by_id::<order::Entity, _>(db, id).await? {
        return Err(ServiceError::not_found("order", id));
    }
    let txn = db.begin().await?;
    order_item::delete_by_orders(&txn, &[id]).await?;
    repo::delete_by_id::<order::Entity, _>(&txn, id).await?;
    txn.commit().await?;
    info!(order_id = id, "order_deleted");
    Ok(())
}

pub async fn delete_orders(db: &DatabaseConnection, ids: &[i32]) -> Result<DeleteSummary, ServiceError> {
    require_ids(ids)?;
    let txn = db.begin().await?;
    order_item::delete_by_orders(&txn, ids).await?;
    let deleted = repo::delete_by_ids::<order::Entity, _>(&txn, ids).await?;
    txn.commit().await?;
    info!(requested = ids.len(), deleted, "orders_deleted");
    Ok(DeleteSummary { deleted })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use crate::user_service::{create_user, delete_user, CreateUserInput};

    async fn customer(db: &DatabaseConnection, email: &str, phone: &str) -> Result<i32, ServiceError> {
        let u = create_user(db, CreateUserInput {
            email: email.into(),
            phone: phone.into(),
            password: "secret1".into(),
            first_name: "Hoa".into(),
            last_name: "Ly".into(),
            role: None,
        })
        .await?;
        Ok(u.id)
    }

    fn line(name: &str, quantity: i32, unit_price: i64) -> OrderItemInput {
        OrderItemInput { product_name: name.into(), quantity, unit_price }
    }

    #[test]
    fn total_is_sum_of_lines() {
        assert_eq!(order_total(&[line("a", 2, 150), line("b", 1, 1000)]).unwrap(), 1300);
        assert!(order_total(&[]).is_err());
        assert!(order_total(&[line("a", i32::MAX, i64::MAX)]).is_err());
        assert!(order_total(&[line("a", 0, 10)]).is_err());
    }

    #[tokio::test]
    async fn create_and_list_by_user() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let alice = customer(&db, "alice@example.com", "0911111111").await?;
        let bob = customer(&db, "bob@example.com", "0922222222").await?;

        let o = create_order(&db, CreateOrderInput {
            user_id: alice,
            store_id: None,
            status: None,
            items: vec![line("Banh mi", 2, 25000), line("Tra da", 1, 5000)],
        })
        .await?;
        assert_eq!(o.total_amount, 55000);
        assert_eq!(o.status, "PENDING");
        assert_eq!(o.items.len(), 2);

        let mine = get_orders_by_user(&db, alice).await?;
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, o.id);
        assert_eq!(mine[0].items, o.items);
        assert!(get_orders_by_user(&db, bob).await?.is_empty());
        assert!(matches!(get_orders_by_user(&db, 999).await, Err(ServiceError::NotFound { .. })));

        // A user with orders cannot be deleted.
        assert!(matches!(delete_user(&db, alice).await, Err(ServiceError::InUse(_))));

        delete_order(&db, o.id).await?;
        assert!(matches!(get_order(&db, o.id).await, Err(ServiceError::NotFound { .. })));
        delete_user(&db, alice).await?;
        Ok(())
    }

    #[tokio::test]
    async fn unknown_user_or_store_creates_nothing() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let res = create_order(&db, CreateOrderInput { user_id: 5, store_id: None, status: None, items: vec![line("x", 1, 1)] }).await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));

        let u = customer(&db, "c@example.com", "0933333333").await?;
        let res = create_order(&db, CreateOrderInput { user_id: u, store_id: Some(77), status: None, items: vec![line("x", 1, 1)] }).await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
        assert!(get_all_orders(&db, None).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn bulk_delete_removes_items_too() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let u = customer(&db, "d@example.com", "0944444444").await?;
        let mut ids = vec![];
        for _ in 0..2 {
            let o = create_order(&db, CreateOrderInput { user_id: u, store_id: None, status: Some("paid".into()), items: vec![line("x", 3, 10)] }).await?;
            assert_eq!(o.status, "PAID");
            ids.push(o.id);
        }
        let summary = delete_orders(&db, &[ids[0], ids[1], 999]).await?;
        assert_eq!(summary.deleted, 2);
        assert!(order_item::find_by_orders(&db, &ids).await?.is_empty());
        Ok(())
    }
}
