//! Service layer providing business-oriented CRUD operations on top of models.
//! - Maps entities to transfer objects and back.
//! - Owns transaction boundaries for bulk delete, import and order creation.
//! - Reuses validation and entity definitions in `models` crate.

pub mod errors;
pub mod pagination;
pub mod bulk;
pub mod image;
pub mod auth;
pub mod user_service;
pub mod store_service;
pub mod category_service;
pub mod category_of_service_service;
pub mod order_service;
#[cfg(test)]
pub mod test_support;
