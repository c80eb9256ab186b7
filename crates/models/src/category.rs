use sea_orm::entity::prelude::*;

use crate::errors::ModelError;
use crate::repo::IdColumn;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

impl IdColumn for Entity {
    fn id_column() -> Column { Column::Id }
}

pub fn validate_fields(name: &str, status: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() { return Err(ModelError::Validation("name required".into())); }
    if status.trim().is_empty() { return Err(ModelError::Validation("status required".into())); }
    Ok(())
}
