//! Persistence layer: SeaORM entities, field validators and repository helpers.

pub mod errors;
pub mod db;
pub mod repo;
pub mod user;
pub mod store;
pub mod category;
pub mod category_of_service;
pub mod order;
pub mod order_item;

#[cfg(test)]
mod tests;
