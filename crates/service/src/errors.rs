use models::errors::ModelError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },
    #[error("email already in use")]
    EmailTaken,
    #[error("phone already in use")]
    PhoneTaken,
    #[error("{0}")]
    InUse(String),
    #[error("current password is incorrect")]
    IncorrectPassword,
    #[error("invalid credentials")]
    Unauthorized,
    #[error("hashing error: {0}")]
    Hash(String),
    #[error("token error: {0}")]
    Token(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound { entity, key: key.to_string() }
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::Model(_) => 1002,
            ServiceError::NotFound { .. } => 1003,
            ServiceError::EmailTaken => 1004,
            ServiceError::PhoneTaken => 1005,
            ServiceError::InUse(_) => 1006,
            ServiceError::IncorrectPassword => 1007,
            ServiceError::Unauthorized => 1008,
            ServiceError::Hash(_) => 1101,
            ServiceError::Token(_) => 1102,
            ServiceError::Db(_) => 1200,
        }
    }
}

// Storage failures surfaced through a model helper stay storage failures.
impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Db(msg) => ServiceError::Db(msg),
            other => ServiceError::Model(other),
        }
    }
}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self { ServiceError::Db(e.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_db_errors_are_not_client_errors() {
        let e: ServiceError = ModelError::Db("boom".into()).into();
        assert!(matches!(e, ServiceError::Db(_)));
        let e: ServiceError = ModelError::Validation("name required".into()).into();
        assert!(matches!(e, ServiceError::Model(_)));
    }

    #[test]
    fn not_found_message_names_entity_and_key() {
        let e = ServiceError::not_found("category", 7);
        assert_eq!(e.to_string(), "category 7 not found");
        assert_eq!(e.code(), 1003);
    }
}
