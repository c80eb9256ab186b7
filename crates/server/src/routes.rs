use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;

pub mod auth;
pub mod categories;
pub mod extract;
pub mod category_of_services;
pub mod multipart;
pub mod orders;
pub mod stores;
pub mod users;

/// Plain confirmation body for deletes and password changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public API, token-protected routes and docs
pub fn build_router(state: auth::ServerState, cors: CorsLayer, max_upload_bytes: usize) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout));

    // Requires a Bearer token or the auth_token cookie
    let protected = Router::new()
        .route("/api/users/me", get(auth::me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer_token_state,
        ));

    let users_routes = Router::new()
        .route("/api/users", get(users::list).post(users::create))
        .route("/api/users/delete-multiple", delete(users::delete_multiple))
        .route("/api/users/:id", get(users::get).put(users::update).delete(users::delete))
        .route("/api/users/:id/changepassword", post(users::change_password))
        .route("/api/users/:id/orders", get(users::orders));

    let stores_routes = Router::new()
        .route("/api/stores", get(stores::list).post(stores::create))
        .route("/api/stores/delete-multiple", delete(stores::delete_multiple))
        .route("/api/stores/import", post(stores::import))
        .route("/api/stores/:id", get(stores::get).put(stores::update).delete(stores::delete))
        .route("/api/stores/:id/image", get(stores::image));

    let categories_routes = Router::new()
        .route("/api/categories", get(categories::list).post(categories::create))
        .route("/api/categories/delete-multiple", delete(categories::delete_multiple))
        .route("/api/categories/import", post(categories::import))
        .route("/api/categories/:id", get(categories::get).put(categories::update).delete(categories::delete));

    let category_of_services_routes = Router::new()
        .route("/api/categoryOfServices", get(category_of_services::list).post(category_of_services::create))
        .route("/api/categoryOfServices/delete-multiple", delete(category_of_services::delete_multiple))
        .route("/api/categoryOfServices/import", post(category_of_services::import))
        .route(
            "/api/categoryOfServices/:id",
            get(category_of_services::get).put(category_of_services::update).delete(category_of_services::delete),
        )
        .route("/api/categoryOfServices/:id/image", get(category_of_services::image));

    let orders_routes = Router::new()
        .route("/api/orders", get(orders::list).post(orders::create))
        .route("/api/orders/delete-multiple", delete(orders::delete_multiple))
        .route("/api/orders/:id", get(orders::get).delete(orders::delete));

    // Compose
    public
        .merge(protected)
        .merge(users_routes)
        .merge(stores_routes)
        .merge(categories_routes)
        .merge(category_of_services_routes)
        .merge(orders_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
