use chrono::Utc;
use sea_orm::{
    prelude::DateTimeWithTimeZone, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set, SqlErr,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use models::{order, repo, store, user};
use crate::auth::password::{hash_password, verify_password};
use crate::bulk::{require_ids, DeleteSummary};
use crate::{errors::ServiceError, pagination::{self, Pagination}};

/// User as exposed over the API; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    pub email: String,
    pub phone: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

pub fn to_dto(m: user::Model) -> UserDto {
    UserDto {
        id: m.id,
        email: m.email,
        phone: m.phone,
        first_name: m.first_name,
        last_name: m.last_name,
        role: m.role,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn validate_profile(email: &str, phone: &str, first_name: &str, last_name: &str) -> Result<(), ServiceError> {
    user::validate_email(email)?;
    user::validate_phone(phone)?;
    user::validate_name(first_name)?;
    user::validate_name(last_name)?;
    Ok(())
}

/// Rejects an email or phone held by a user other than `own_id`.
async fn ensure_unique(db: &DatabaseConnection, email: &str, phone: &str, own_id: Option<i32>) -> Result<(), ServiceError> {
    if let Some(other) = user::find_by_email(db, email).await? {
        if Some(other.id) != own_id {
            return Err(ServiceError::EmailTaken);
        }
    }
    if let Some(other) = user::find_by_phone(db, phone).await? {
        if Some(other.id) != own_id {
            return Err(ServiceError::PhoneTaken);
        }
    }
    Ok(())
}

/// Unique-index violations on users.email or users.phone become the matching conflict.
fn conflict_from(e: DbErr) -> ServiceError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) if msg.contains("phone") => ServiceError::PhoneTaken,
        Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::EmailTaken,
        _ => e.into(),
    }
}

/// A foreign-key violation on delete means a store or order still points at the user.
fn in_use_from(what: &str, e: DbErr) -> ServiceError {
    match e.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => ServiceError::InUse(format!("{what} is still referenced")),
        _ => e.into(),
    }
}

async fn find_model(db: &DatabaseConnection, id: i32) -> Result<user::Model, ServiceError> {
    repo::find_by_id::<user::Entity, _>(db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("user", id))
}

/// Create a user; the password is stored as an Argon2 hash.
#[instrument(skip(db, input), fields(email = %input.email))]
pub async fn create_user(db: &DatabaseConnection, input: CreateUserInput) -> Result<UserDto, ServiceError> {
    validate_profile(&input.email, &input.phone, &input.first_name, &input.last_name)?;
    user::validate_password(&input.password)?;
    let role = user::validate_role(input.role.as_deref())?;
    ensure_unique(db, &input.email, &input.phone, None).await?;

    let now = Utc::now().into();
    let am = user::ActiveModel {
        email: Set(input.email.trim().to_string()),
        phone: Set(input.phone.trim().to_string()),
        password_hash: Set(hash_password(&input.password)?),
        first_name: Set(input.first_name.trim().to_string()),
        last_name: Set(input.last_name.trim().to_string()),
        role: Set(role),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let created = am.insert(db).await.map_err(conflict_from)?;
    info!(user_id = created.id, "user_created");
    Ok(to_dto(created))
}

/// All users ordered by id; empty when there are none.
pub async fn get_all_users(db: &DatabaseConnection, page: Option<Pagination>) -> Result<Vec<UserDto>, ServiceError> {
    let rows = repo::find_all::<user::Entity, _>(db, pagination::window(page)).await?;
    Ok(rows.into_iter().map(to_dto).collect())
}

pub async fn get_user(db: &DatabaseConnection, id: i32) -> Result<UserDto, ServiceError> {
    Ok(to_dto(find_model(db, id).await?))
}

/// Overwrite profile fields; the password is left untouched.
#[instrument(skip(db, input), fields(user_id = id))]
pub async fn update_user(db: &DatabaseConnection, id: i32, input: UpdateUserInput) -> Result<UserDto, ServiceError> {
    validate_profile(&input.email, &input.phone, &input.first_name, &input.last_name)?;
    let role = user::validate_role(input.role.as_deref())?;
    let existing = find_model(db, id).await?;
    ensure_unique(db, &input.email, &input.phone, Some(id)).await?;

    let mut am: user::ActiveModel = existing.into();
    am.email = Set(input.email.trim().to_string());
    am.phone = Set(input.phone.trim().to_string());
    am.first_name = Set(input.first_name.trim().to_string());
    am.last_name = Set(input.last_name.trim().to_string());
    am.role = Set(role);
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await.map_err(conflict_from)?;
    Ok(to_dto(updated))
}

async fn ensure_not_in_use<C: sea_orm::ConnectionTrait>(db: &C, id: i32) -> Result<(), ServiceError> {
    if store::count_by_owner(db, id).await? > 0 {
        return Err(ServiceError::InUse(format!("user {id} still owns stores")));
    }
    if order::count_by_user(db, id).await? > 0 {
        return Err(ServiceError::InUse(format!("user {id} still has orders")));
    }
    Ok(())
}

pub async fn delete_user(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    if !repo::exists_by_id::<user::Entity, _>(&txn, id).await? {
        return Err(ServiceError::not_found("user", id));
    }
    ensure_not_in_use(&txn, id).await?;
    user::Entity::delete_by_id(id)
        .exec(&txn)
        .await
        .map_err(|e| in_use_from(&format!("user {id}"), e))?;
    txn.commit().await?;
    info!(user_id = id, "user_deleted");
    Ok(())
}

/// Delete every listed user in one transaction; unknown ids are skipped.
///
/// Any listed user still owning stores or orders aborts the whole batch.
pub async fn delete_users(db: &DatabaseConnection, ids: &[i32]) -> Result<DeleteSummary, ServiceError> {
    require_ids(ids)?;
    let txn = db.begin().await?;
    for &id in ids {
        ensure_not_in_use(&txn, id).await?;
    }
    let deleted = user::Entity::delete_many()
        .filter(user::Column::Id.is_in(ids.iter().copied()))
        .exec(&txn)
        .await
        .map_err(|e| in_use_from("a listed user", e))?
        .rows_affected;
    txn.commit().await?;
    info!(requested = ids.len(), deleted, "users_deleted");
    Ok(DeleteSummary { deleted })
}

/// Replace the password after checking the current one.
///
/// A wrong current password leaves the stored hash untouched.
#[instrument(skip(db, input), fields(user_id = id))]
pub async fn change_password(db: &DatabaseConnection, id: i32, input: ChangePasswordInput) -> Result<(), ServiceError> {
    let existing = find_model(db, id).await?;
    if !verify_password(&input.current_password, &existing.password_hash)? {
        return Err(ServiceError::IncorrectPassword);
    }
    user::validate_password(&input.new_password)?;

    let mut am: user::ActiveModel = existing.into();
    am.password_hash = Set(hash_password(&input.new_password)?);
    am.updated_at = Set(Utc::now().into());
    am.update(db).await?;
    info!(user_id = id, "password_changed");
    Ok(())
}
