use axum::{extract::State, http::{header, StatusCode}, response::IntoResponse, Json};
use tracing::info;

use service::bulk::DeleteSummary;
use service::order_service::{self, OrderDto};
use service::pagination::ListQuery;
use service::user_service::{self, ChangePasswordInput, CreateUserInput, UpdateUserInput, UserDto};

use super::{auth::ServerState, Message};
use super::extract::{ApiJson, ApiPath, ApiQuery};
use crate::errors::JsonApiError;

#[utoipa::path(get, path = "/api/users", tag = "users", params(crate::openapi::ListParams), responses((status = 200, description = "All users", body = [crate::openapi::UserDoc])))]
pub async fn list(State(state): State<ServerState>, ApiQuery(q): ApiQuery<ListQuery>) -> Result<Json<Vec<UserDto>>, JsonApiError> {
    Ok(Json(user_service::get_all_users(&state.db, q.pagination()).await?))
}

#[utoipa::path(post, path = "/api/users", tag = "users", request_body = crate::openapi::CreateUserDoc, responses((status = 201, description = "Created", body = crate::openapi::UserDoc), (status = 400, description = "Validation Error"), (status = 409, description = "Email or phone in use")))]
pub async fn create(State(state): State<ServerState>, ApiJson(input): ApiJson<CreateUserInput>) -> Result<impl IntoResponse, JsonApiError> {
    let created = user_service::create_user(&state.db, input).await?;
    info!(user_id = created.id, "created user");
    let location = format!("/api/users/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

#[utoipa::path(get, path = "/api/users/{id}", tag = "users", params(("id" = i32, Path, description = "User id")), responses((status = 200, description = "User", body = crate::openapi::UserDoc), (status = 404, description = "Not Found")))]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<Json<UserDto>, JsonApiError> {
    Ok(Json(user_service::get_user(&state.db, id).await?))
}

#[utoipa::path(put, path = "/api/users/{id}", tag = "users", params(("id" = i32, Path, description = "User id")), request_body = crate::openapi::UpdateUserDoc, responses((status = 200, description = "Updated", body = crate::openapi::UserDoc), (status = 404, description = "Not Found"), (status = 409, description = "Email or phone in use")))]
pub async fn update(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>, ApiJson(input): ApiJson<UpdateUserInput>) -> Result<Json<UserDto>, JsonApiError> {
    let updated = user_service::update_user(&state.db, id, input).await?;
    info!(user_id = id, "updated user");
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/api/users/{id}", tag = "users", params(("id" = i32, Path, description = "User id")), responses((status = 200, description = "Deleted", body = crate::openapi::MessageDoc), (status = 404, description = "Not Found"), (status = 409, description = "User still owns stores or orders")))]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<Json<Message>, JsonApiError> {
    user_service::delete_user(&state.db, id).await?;
    Ok(Json(Message::new(format!("user {id} deleted"))))
}

#[utoipa::path(delete, path = "/api/users/delete-multiple", tag = "users", request_body = Vec<i32>, responses((status = 200, description = "Deleted count", body = crate::openapi::DeleteSummaryDoc), (status = 400, description = "Empty id list")))]
pub async fn delete_multiple(State(state): State<ServerState>, ApiJson(ids): ApiJson<Vec<i32>>) -> Result<Json<DeleteSummary>, JsonApiError> {
    Ok(Json(user_service::delete_users(&state.db, &ids).await?))
}

#[utoipa::path(post, path = "/api/users/{id}/changepassword", tag = "users", params(("id" = i32, Path, description = "User id")), request_body = crate::openapi::ChangePasswordDoc, responses((status = 200, description = "Password changed", body = crate::openapi::MessageDoc), (status = 400, description = "Incorrect current password or invalid new password"), (status = 404, description = "Not Found")))]
pub async fn change_password(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>, ApiJson(input): ApiJson<ChangePasswordInput>) -> Result<Json<Message>, JsonApiError> {
    user_service::change_password(&state.db, id, input).await?;
    Ok(Json(Message::new("password changed")))
}

#[utoipa::path(get, path = "/api/users/{id}/orders", tag = "orders", params(("id" = i32, Path, description = "User id")), responses((status = 200, description = "Orders placed by the user", body = [crate::openapi::OrderDoc]), (status = 404, description = "Not Found")))]
pub async fn orders(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<Json<Vec<OrderDto>>, JsonApiError> {
    Ok(Json(order_service::get_orders_by_user(&state.db, id).await?))
}
