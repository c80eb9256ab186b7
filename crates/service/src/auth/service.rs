use sea_orm::DatabaseConnection;
use tracing::{info, instrument};

use models::user;

use super::domain::{AuthSession, LoginInput};
use super::password::verify_password;
use super::token::{issue_token, Claims, TokenConfig};
use crate::errors::ServiceError;
use crate::user_service::{self, UserDto};

/// Authenticate by email and password and issue a token.
///
/// Unknown email is `NotFound`; a wrong password is `Unauthorized`.
#[instrument(skip(db, cfg, input), fields(email = %input.email))]
pub async fn login(db: &DatabaseConnection, cfg: &TokenConfig, input: LoginInput) -> Result<AuthSession, ServiceError> {
    let found = user::find_by_email(db, &input.email)
        .await?
        .ok_or_else(|| ServiceError::not_found("user", input.email.trim()))?;
    if !verify_password(&input.password, &found.password_hash)? {
        return Err(ServiceError::Unauthorized);
    }
    let token = issue_token(cfg, &found)?;
    info!(user_id = found.id, "user_logged_in");
    Ok(AuthSession { token, user: user_service::to_dto(found) })
}

/// The user a verified token was issued to.
pub async fn current_user(db: &DatabaseConnection, claims: &Claims) -> Result<UserDto, ServiceError> {
    user_service::get_user(db, claims.uid).await
}
