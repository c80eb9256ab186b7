use axum::{extract::State, Json};
use tracing::info;

use service::bulk::DeleteSummary;
use service::order_service::{self, CreateOrderInput, OrderDto};
use service::pagination::ListQuery;

use super::{auth::ServerState, Message};
use super::extract::{ApiJson, ApiPath, ApiQuery};
use crate::errors::JsonApiError;

#[utoipa::path(post, path = "/api/orders", tag = "orders", request_body = crate::openapi::CreateOrderDoc, responses((status = 200, description = "Created", body = crate::openapi::OrderDoc), (status = 400, description = "Validation Error")))]
pub async fn create(State(state): State<ServerState>, ApiJson(input): ApiJson<CreateOrderInput>) -> Result<Json<OrderDto>, JsonApiError> {
    let created = order_service::create_order(&state.db, input).await?;
    info!(order_id = created.id, user_id = created.user_id, total = created.total_amount, "created order");
    Ok(Json(created))
}

#[utoipa::path(get, path = "/api/orders", tag = "orders", params(crate::openapi::ListParams), responses((status = 200, description = "All orders", body = [crate::openapi::OrderDoc])))]
pub async fn list(State(state): State<ServerState>, ApiQuery(q): ApiQuery<ListQuery>) -> Result<Json<Vec<OrderDto>>, JsonApiError> {
    Ok(Json(order_service::get_all_orders(&state.db, q.pagination()).await?))
}

#[utoipa::path(get, path = "/api/orders/{id}", tag = "orders", params(("id" = i32, Path, description = "Order id")), responses((status = 200, description = "Order with items", body = crate::openapi::OrderDoc), (status = 404, description = "Not Found")))]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<Json<OrderDto>, JsonApiError> {
    Ok(Json(order_service::get_order(&state.db, id).await?))
}

#[utoipa::path(delete, path = "/api/orders/{id}", tag = "orders", params(("id" = i32, Path, description = "Order id")), responses((status = 200, description = "Deleted", body = crate::openapi::MessageDoc), (status = 404, description = "Not Found")))]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<Json<Message>, JsonApiError> {
    order_service::delete_order(&state.db, id).await?;
    Ok(Json(Message::new(format!("order {id} deleted"))))
}

#[utoipa::path(delete, path = "/api/orders/delete-multiple", tag = "orders", request_body = Vec<i32>, responses((status = 200, description = "Deleted count", body = crate::openapi::DeleteSummaryDoc), (status = 400, description = "Empty id list")))]
pub async fn delete_multiple(State(state): State<ServerState>, ApiJson(ids): ApiJson<Vec<i32>>) -> Result<Json<DeleteSummary>, JsonApiError> {
    Ok(Json(order_service::delete_orders(&state.db, &ids).await?))
}
