use axum::{extract::{multipart::MultipartRejection, Multipart, State}, http::header, response::IntoResponse, Json};
use tracing::info;

use service::bulk::{DeleteSummary, ImportSummary};
use service::pagination::ListQuery;
use service::store_service::{self, StoreDto, StoreInput};

use super::{auth::ServerState, multipart::read_form, Message};
use super::extract::{ApiJson, ApiPath, ApiQuery};
use crate::errors::JsonApiError;

/// Name of the JSON part in store multipart bodies.
pub const DATA_FIELD: &str = "storeDTO";

#[utoipa::path(post, path = "/api/stores", tag = "stores", request_body(content = crate::openapi::StoreFormDoc, content_type = "multipart/form-data"), responses((status = 200, description = "Created", body = crate::openapi::StoreDoc), (status = 400, description = "Validation Error")))]
pub async fn create(State(state): State<ServerState>, multipart: Result<Multipart, MultipartRejection>) -> Result<Json<StoreDto>, JsonApiError> {
    let (input, image) = read_form::<StoreInput>(multipart, DATA_FIELD).await?;
    let created = store_service::create_store(&state.db, input, image).await?;
    info!(store_id = created.id, owner_id = created.owner_id, "created store");
    Ok(Json(created))
}

#[utoipa::path(get, path = "/api/stores", tag = "stores", params(crate::openapi::ListParams), responses((status = 200, description = "All stores", body = [crate::openapi::StoreDoc])))]
pub async fn list(State(state): State<ServerState>, ApiQuery(q): ApiQuery<ListQuery>) -> Result<Json<Vec<StoreDto>>, JsonApiError> {
    Ok(Json(store_service::get_all_stores(&state.db, q.pagination()).await?))
}

#[utoipa::path(get, path = "/api/stores/{id}", tag = "stores", params(("id" = i32, Path, description = "Store id")), responses((status = 200, description = "Store", body = crate::openapi::StoreDoc), (status = 404, description = "Not Found")))]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<Json<StoreDto>, JsonApiError> {
    Ok(Json(store_service::get_store(&state.db, id).await?))
}

#[utoipa::path(get, path = "/api/stores/{id}/image", tag = "stores", params(("id" = i32, Path, description = "Store id")), responses((status = 200, description = "Raw image bytes"), (status = 404, description = "Store or image not found")))]
pub async fn image(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<impl IntoResponse, JsonApiError> {
    let img = store_service::get_store_image(&state.db, id).await?;
    Ok(([(header::CONTENT_TYPE, img.content_type)], img.bytes))
}

#[utoipa::path(put, path = "/api/stores/{id}", tag = "stores", params(("id" = i32, Path, description = "Store id")), request_body(content = crate::openapi::StoreFormDoc, content_type = "multipart/form-data"), responses((status = 200, description = "Updated", body = crate::openapi::StoreDoc), (status = 400, description = "Validation Error"), (status = 404, description = "Not Found")))]
pub async fn update(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>, multipart: Result<Multipart, MultipartRejection>) -> Result<Json<StoreDto>, JsonApiError> {
    let (input, image) = read_form::<StoreInput>(multipart, DATA_FIELD).await?;
    let updated = store_service::update_store(&state.db, id, input, image).await?;
    info!(store_id = id, "updated store");
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/api/stores/{id}", tag = "stores", params(("id" = i32, Path, description = "Store id")), responses((status = 200, description = "Deleted", body = crate::openapi::MessageDoc), (status = 404, description = "Not Found")))]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<Json<Message>, JsonApiError> {
    store_service::delete_store(&state.db, id).await?;
    Ok(Json(Message::new(format!("store {id} deleted"))))
}

#[utoipa::path(delete, path = "/api/stores/delete-multiple", tag = "stores", request_body = Vec<i32>, responses((status = 200, description = "Deleted count", body = crate::openapi::DeleteSummaryDoc), (status = 400, description = "Empty id list")))]
pub async fn delete_multiple(State(state): State<ServerState>, ApiJson(ids): ApiJson<Vec<i32>>) -> Result<Json<DeleteSummary>, JsonApiError> {
    Ok(Json(store_service::delete_stores(&state.db, &ids).await?))
}

#[utoipa::path(post, path = "/api/stores/import", tag = "stores", request_body = [crate::openapi::StoreInputDoc], responses((status = 200, description = "Imported count", body = crate::openapi::ImportSummaryDoc), (status = 400, description = "Validation Error")))]
pub async fn import(State(state): State<ServerState>, ApiJson(records): ApiJson<Vec<StoreInput>>) -> Result<Json<ImportSummary>, JsonApiError> {
    Ok(Json(store_service::import_stores(&state.db, records).await?))
}
