//! HS256 login tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use serde::{Deserialize, Serialize};

use models::user;

use crate::errors::ServiceError;

#[derive(Clone, Debug)]
pub struct TokenConfig {
    pub jwt_secret: String,
    pub ttl_hours: i64,
}

impl From<&configs::AuthConfig> for TokenConfig {
    fn from(c: &configs::AuthConfig) -> Self {
        Self { jwt_secret: c.jwt_secret.clone(), ttl_hours: c.token_ttl_hours }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// account email
    pub sub: String,
    pub uid: i32,
    pub role: String,
    pub exp: usize,
}

pub fn issue_token(cfg: &TokenConfig, user: &user::Model) -> Result<String, ServiceError> {
    let exp = (Utc::now() + Duration::hours(cfg.ttl_hours)).timestamp() as usize;
    let claims = Claims { sub: user.email.clone(), uid: user.id, role: user.role.clone(), exp };
    encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()))
        .map_err(|e| ServiceError::Token(e.to_string()))
}

pub fn verify_token(jwt_secret: &str, token: &str) -> Result<Claims, ServiceError> {
    let key = DecodingKey::from_secret(jwt_secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| ServiceError::Token(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> user::Model {
        let now = Utc::now().into();
        user::Model {
            id: 7,
            email: "ann@example.com".into(),
            phone: "0901234567".into(),
            password_hash: String::new(),
            first_name: "Ann".into(),
            last_name: "Le".into(),
            role: "OWNER".into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn issued_token_verifies_with_same_secret() {
        let cfg = TokenConfig { jwt_secret: "test-secret".into(), ttl_hours: 1 };
        let token = issue_token(&cfg, &sample_user()).unwrap();
        let claims = verify_token("test-secret", &token).unwrap();
        assert_eq!(claims.uid, 7);
        assert_eq!(claims.sub, "ann@example.com");
        assert_eq!(claims.role, "OWNER");
    }

    #[test]
    fn wrong_secret_or_expired_token_is_rejected() {
        let cfg = TokenConfig { jwt_secret: "test-secret".into(), ttl_hours: 1 };
        let token = issue_token(&cfg, &sample_user()).unwrap();
        assert!(matches!(verify_token("other-secret", &token), Err(ServiceError::Token(_))));

        let expired = TokenConfig { jwt_secret: "test-secret".into(), ttl_hours: -2 };
        let token = issue_token(&expired, &sample_user()).unwrap();
        assert!(verify_token("test-secret", &token).is_err());
    }
}
