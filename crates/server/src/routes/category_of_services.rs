use axum::{extract::{multipart::MultipartRejection, Multipart, State}, http::header, response::IntoResponse, Json};
use tracing::info;

use service::bulk::{DeleteSummary, ImportSummary};
use service::category_of_service_service::{self as cos_service, CategoryOfServiceDto, CategoryOfServiceInput};
use service::pagination::ListQuery;

use super::{auth::ServerState, multipart::read_form, Message};
use super::extract::{ApiJson, ApiPath, ApiQuery};
use crate::errors::JsonApiError;

pub const DATA_FIELD: &str = "categoryDTO";

#[utoipa::path(post, path = "/api/categoryOfServices", tag = "categoryOfServices", request_body(content = crate::openapi::CategoryOfServiceFormDoc, content_type = "multipart/form-data"), responses((status = 200, description = "Created", body = crate::openapi::CategoryOfServiceDoc), (status = 400, description = "Validation Error")))]
pub async fn create(State(state): State<ServerState>, multipart: Result<Multipart, MultipartRejection>) -> Result<Json<CategoryOfServiceDto>, JsonApiError> {
    let (input, image) = read_form::<CategoryOfServiceInput>(multipart, DATA_FIELD).await?;
    let created = cos_service::create_category_of_service(&state.db, input, image).await?;
    info!(category_of_service_id = created.id, "created category of service");
    Ok(Json(created))
}

#[utoipa::path(get, path = "/api/categoryOfServices", tag = "categoryOfServices", params(crate::openapi::ListParams), responses((status = 200, description = "All categories of service", body = [crate::openapi::CategoryOfServiceDoc])))]
pub async fn list(State(state): State<ServerState>, ApiQuery(q): ApiQuery<ListQuery>) -> Result<Json<Vec<CategoryOfServiceDto>>, JsonApiError> {
    Ok(Json(cos_service::get_all_categories_of_service(&state.db, q.pagination()).await?))
}

#[utoipa::path(get, path = "/api/categoryOfServices/{id}", tag = "categoryOfServices", params(("id" = i32, Path, description = "Category of service id")), responses((status = 200, description = "Category of service", body = crate::openapi::CategoryOfServiceDoc), (status = 404, description = "Not Found")))]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<Json<CategoryOfServiceDto>, JsonApiError> {
    Ok(Json(cos_service::get_category_of_service(&state.db, id).await?))
}

#[utoipa::path(get, path = "/api/categoryOfServices/{id}/image", tag = "categoryOfServices", params(("id" = i32, Path, description = "Category of service id")), responses((status = 200, description = "Raw image bytes"), (status = 404, description = "Not Found")))]
pub async fn image(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<impl IntoResponse, JsonApiError> {
    let img = cos_service::get_category_of_service_image(&state.db, id).await?;
    Ok(([(header::CONTENT_TYPE, img.content_type)], img.bytes))
}

#[utoipa::path(put, path = "/api/categoryOfServices/{id}", tag = "categoryOfServices", params(("id" = i32, Path, description = "Category of service id")), request_body(content = crate::openapi::CategoryOfServiceFormDoc, content_type = "multipart/form-data"), responses((status = 200, description = "Updated", body = crate::openapi::CategoryOfServiceDoc), (status = 404, description = "Not Found")))]
pub async fn update(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>, multipart: Result<Multipart, MultipartRejection>) -> Result<Json<CategoryOfServiceDto>, JsonApiError> {
    let (input, image) = read_form::<CategoryOfServiceInput>(multipart, DATA_FIELD).await?;
    let updated = cos_service::update_category_of_service(&state.db, id, input, image).await?;
    info!(category_of_service_id = id, "updated category of service");
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/api/categoryOfServices/{id}", tag = "categoryOfServices", params(("id" = i32, Path, description = "Category of service id")), responses((status = 200, description = "Deleted", body = crate::openapi::MessageDoc), (status = 404, description = "Not Found")))]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<Json<Message>, JsonApiError> {
    cos_service::delete_category_of_service(&state.db, id).await?;
    Ok(Json(Message::new(format!("category of service {id} deleted"))))
}

#[utoipa::path(delete, path = "/api/categoryOfServices/delete-multiple", tag = "categoryOfServices", request_body = Vec<i32>, responses((status = 200, description = "Deleted count", body = crate::openapi::DeleteSummaryDoc), (status = 400, description = "Empty id list")))]
pub async fn delete_multiple(State(state): State<ServerState>, ApiJson(ids): ApiJson<Vec<i32>>) -> Result<Json<DeleteSummary>, JsonApiError> {
    Ok(Json(cos_service::delete_categories_of_service(&state.db, &ids).await?))
}

#[utoipa::path(post, path = "/api/categoryOfServices/import", tag = "categoryOfServices", request_body = [crate::openapi::CategoryInputDoc], responses((status = 200, description = "Imported count", body = crate::openapi::ImportSummaryDoc), (status = 400, description = "Validation Error")))]
pub async fn import(State(state): State<ServerState>, ApiJson(records): ApiJson<Vec<CategoryOfServiceInput>>) -> Result<Json<ImportSummary>, JsonApiError> {
    Ok(Json(cos_service::import_categories_of_service(&state.db, records).await?))
}
