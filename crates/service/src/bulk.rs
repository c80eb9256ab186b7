//! Shared shapes for list-of-ids and list-of-records operations.

use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteSummary {
    pub deleted: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub imported: usize,
}

pub(crate) fn require_ids(ids: &[i32]) -> Result<(), ServiceError> {
    if ids.is_empty() {
        return Err(ServiceError::Validation("id list must not be empty".into()));
    }
    Ok(())
}

pub(crate) fn require_records<T>(records: &[T]) -> Result<(), ServiceError> {
    if records.is_empty() {
        return Err(ServiceError::Validation("import list must not be empty".into()));
    }
    Ok(())
}
