use axum::{extract::State, Json};
use tracing::info;

use service::bulk::{DeleteSummary, ImportSummary};
use service::category_service::{self, CategoryDto, CategoryInput};
use service::pagination::ListQuery;

use super::{auth::ServerState, Message};
use super::extract::{ApiJson, ApiPath, ApiQuery};
use crate::errors::JsonApiError;

#[utoipa::path(post, path = "/api/categories", tag = "categories", request_body = crate::openapi::CategoryInputDoc, responses((status = 200, description = "Created", body = crate::openapi::CategoryDoc), (status = 400, description = "Validation Error")))]
pub async fn create(State(state): State<ServerState>, ApiJson(input): ApiJson<CategoryInput>) -> Result<Json<CategoryDto>, JsonApiError> {
    let created = category_service::create_category(&state.db, input).await?;
    info!(category_id = created.id, "created category");
    Ok(Json(created))
}

#[utoipa::path(get, path = "/api/categories", tag = "categories", params(crate::openapi::ListParams), responses((status = 200, description = "All categories", body = [crate::openapi::CategoryDoc])))]
pub async fn list(State(state): State<ServerState>, ApiQuery(q): ApiQuery<ListQuery>) -> Result<Json<Vec<CategoryDto>>, JsonApiError> {
    Ok(Json(category_service::get_all_categories(&state.db, q.pagination()).await?))
}

#[utoipa::path(get, path = "/api/categories/{id}", tag = "categories", params(("id" = i32, Path, description = "Category id")), responses((status = 200, description = "Category", body = crate::openapi::CategoryDoc), (status = 404, description = "Not Found")))]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<Json<CategoryDto>, JsonApiError> {
    Ok(Json(category_service::get_category(&state.db, id).await?))
}

#[utoipa::path(put, path = "/api/categories/{id}", tag = "categories", params(("id" = i32, Path, description = "Category id")), request_body = crate::openapi::CategoryInputDoc, responses((status = 200, description = "Updated", body = crate::openapi::CategoryDoc), (status = 404, description = "Not Found")))]
pub async fn update(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>, ApiJson(input): ApiJson<CategoryInput>) -> Result<Json<CategoryDto>, JsonApiError> {
    let updated = category_service::update_category(&state.db, id, input).await?;
    info!(category_id = id, "updated category");
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/api/categories/{id}", tag = "categories", params(("id" = i32, Path, description = "Category id")), responses((status = 200, description = "Deleted", body = crate::openapi::MessageDoc), (status = 404, description = "Not Found")))]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<Json<Message>, JsonApiError> {
    category_service::delete_category(&state.db, id).await?;
    Ok(Json(Message::new(format!("category {id} deleted"))))
}

#[utoipa::path(delete, path = "/api/categories/delete-multiple", tag = "categories", request_body = Vec<i32>, responses((status = 200, description = "Deleted count", body = crate::openapi::DeleteSummaryDoc), (status = 400, description = "Empty id list")))]
pub async fn delete_multiple(State(state): State<ServerState>, ApiJson(ids): ApiJson<Vec<i32>>) -> Result<Json<DeleteSummary>, JsonApiError> {
    Ok(Json(category_service::delete_categories(&state.db, &ids).await?))
}

#[utoipa::path(post, path = "/api/categories/import", tag = "categories", request_body = [crate::openapi::CategoryInputDoc], responses((status = 200, description = "Imported count", body = crate::openapi::ImportSummaryDoc), (status = 400, description = "Validation Error")))]
pub async fn import(State(state): State<ServerState>, ApiJson(records): ApiJson<Vec<CategoryInput>>) -> Result<Json<ImportSummary>, JsonApiError> {
    Ok(Json(category_service::import_categories(&state.db, records).await?))
}
