use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter};

use crate::errors::ModelError;
use crate::repo::IdColumn;

pub const ROLES: [&str; 3] = ["ADMIN", "OWNER", "CUSTOMER"];
pub const DEFAULT_ROLE: &str = "CUSTOMER";
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub phone: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Store,
    Order,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Store => Entity::has_many(super::store::Entity).into(),
            Relation::Order => Entity::has_many(super::order::Entity).into(),
        }
    }
}

impl Related<super::store::Entity> for Entity {
    fn to() -> RelationDef { Relation::Store.def() }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef { Relation::Order.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl IdColumn for Entity {
    fn id_column() -> Column { Column::Id }
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return Err(ModelError::Validation("invalid email".into()));
    }
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split_once('.').is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    };
    if !valid {
        return Err(ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

/// 10 to 12 ASCII digits.
pub fn validate_phone(phone: &str) -> Result<(), ModelError> {
    let phone = phone.trim();
    if !(10..=12).contains(&phone.len()) || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ModelError::Validation("phone must be 10 to 12 digits".into()));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ModelError> {
    if password.trim().chars().count() < MIN_PASSWORD_LEN {
        return Err(ModelError::Validation(format!("password too short (>={MIN_PASSWORD_LEN})")));
    }
    Ok(())
}

/// Upper-cases the role and checks it against [`ROLES`]; empty input yields the default.
pub fn validate_role(role: Option<&str>) -> Result<String, ModelError> {
    let up = match role.map(str::trim) {
        None | Some("") => return Ok(DEFAULT_ROLE.to_string()),
        Some(r) => r.to_ascii_uppercase(),
    };
    if !ROLES.contains(&up.as_str()) {
        return Err(ModelError::Validation("invalid role".into()));
    }
    Ok(up)
}

pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Email.eq(email.trim())).one(db).await?)
}

pub async fn find_by_phone<C: ConnectionTrait>(db: &C, phone: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Phone.eq(phone.trim())).one(db).await?)
}
