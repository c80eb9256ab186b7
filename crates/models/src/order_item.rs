use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, QueryOrder};

use crate::errors::ModelError;
use crate::order;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub order_id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: i64,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Order,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Order => Entity::belongs_to(order::Entity)
                .from(Column::OrderId)
                .to(order::Column::Id)
                .into(),
        }
    }
}

impl Related<order::Entity> for Entity {
    fn to() -> RelationDef { Relation::Order.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_line(product_name: &str, quantity: i32, unit_price: i64) -> Result<(), ModelError> {
    if product_name.trim().is_empty() {
        return Err(ModelError::Validation("productName required".into()));
    }
    if quantity < 1 {
        return Err(ModelError::Validation("quantity must be >= 1".into()));
    }
    if unit_price < 0 {
        return Err(ModelError::Validation("unitPrice must be >= 0".into()));
    }
    Ok(())
}

pub async fn find_by_order<C: ConnectionTrait>(db: &C, order_id: i32) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::OrderId.eq(order_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

pub async fn find_by_orders<C: ConnectionTrait>(db: &C, order_ids: &[i32]) -> Result<Vec<Model>, ModelError> {
    if order_ids.is_empty() {
        return Ok(Vec::new());
    }
    Ok(Entity::find()
        .filter(Column::OrderId.is_in(order_ids.iter().copied()))
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

/// Removes the items of every listed order; used before deleting the orders themselves.
pub async fn delete_by_orders<C: ConnectionTrait>(db: &C, order_ids: &[i32]) -> Result<u64, ModelError> {
    if order_ids.is_empty() {
        return Ok(0);
    }
    let res = Entity::delete_many()
        .filter(Column::OrderId.is_in(order_ids.iter().copied()))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}
