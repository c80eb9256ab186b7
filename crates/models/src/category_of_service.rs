use sea_orm::entity::prelude::*;

use crate::repo::IdColumn;

pub use crate::category::validate_fields;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories_of_services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub image_name: Option<String>,
    pub image_type: Option<String>,
    pub image: Option<Vec<u8>>,
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
