use chrono::NaiveTime;
use sea_orm::{entity::prelude::*, ConnectionTrait, PaginatorTrait, QueryFilter};

use crate::errors::ModelError;
use crate::repo::IdColumn;
use crate::user;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "stores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub address: String,
    pub phone: String,
    pub image_name: Option<String>,
    pub image_type: Option<String>,
    pub image: Option<Vec<u8>>,
    pub open_time: Option<Time>,
    pub close_time: Option<Time>,
    pub status: String,
    pub owner_id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Owner,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Owner => Entity::belongs_to(user::Entity)
                .from(Column::OwnerId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::Owner.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl IdColumn for Entity {
    fn id_column() -> Column { Column::Id }
}

/// Presence checks for the scalar fields every store must carry.
pub fn validate_fields(name: &str, description: &str, address: &str, phone: &str, status: &str) -> Result<(), ModelError> {
    for (field, value) in [("name", name), ("description", description), ("address", address), ("status", status)] {
        if value.trim().is_empty() {
            return Err(ModelError::Validation(format!("{field} required")));
        }
    }
    user::validate_phone(phone)
}

/// Accepts `HH:MM` or `HH:MM:SS`.
pub fn parse_time(field: &str, value: &str) -> Result<NaiveTime, ModelError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| ModelError::Validation(format!("{field} must be HH:MM or HH:MM:SS")))
}

pub async fn count_by_owner<C: ConnectionTrait>(db: &C, owner_id: i32) -> Result<u64, ModelError> {
    Ok(Entity::find().filter(Column::OwnerId.eq(owner_id)).count(db).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_time_accepts_both_formats() {
        assert_eq!(parse_time("openTime", "08:30").unwrap(), NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        assert_eq!(parse_time("openTime", "21:15:05").unwrap(), NaiveTime::from_hms_opt(21, 15, 5).unwrap());
        assert!(parse_time("openTime", "25:00").is_err());
        assert!(parse_time("openTime", "noon").is_err());
    }

    #[test]
    fn fields_require_presence_and_phone() {
        assert!(validate_fields("Shop", "Desc", "1 Main St", "0901234567", "ACTIVE").is_ok());
        assert!(validate_fields(" ", "Desc", "1 Main St", "0901234567", "ACTIVE").is_err());
        assert!(validate_fields("Shop", "Desc", "1 Main St", "12", "ACTIVE").is_err());
        assert!(validate_fields("Shop", "Desc", "1 Main St", "0901234567", "").is_err());
    }
}
