#![allow(dead_code)]

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};
use serde_json::Value;
use service::auth::token::TokenConfig;
use tower::ServiceExt;

use server::routes::{self, auth};

pub const JWT_SECRET: &str = "test-secret";
const BOUNDARY: &str = "marketplace-test-boundary";

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

/// Router over a fresh, migrated in-memory SQLite database.
pub async fn build_app() -> anyhow::Result<Router> {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    let state = auth::ServerState {
        db,
        auth: TokenConfig { jwt_secret: JWT_SECRET.into(), ttl_hours: 1 },
    };
    Ok(routes::build_router(state, cors(), 1024 * 1024))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> anyhow::Result<Value> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> anyhow::Result<TestResponse> {
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await?.to_vec();
    Ok(TestResponse { status, headers, body })
}

pub async fn send_json(app: &Router, method: &str, uri: &str, body: &Value) -> anyhow::Result<TestResponse> {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body)?))?;
    send(app, req).await
}

pub async fn get(app: &Router, uri: &str) -> anyhow::Result<TestResponse> {
    send(app, Request::builder().method("GET").uri(uri).body(Body::empty())?).await
}

/// `(file_name, content_type, bytes)` of the optional `imageFile` part.
pub type ImagePart<'a> = (&'a str, &'a str, &'a [u8]);

pub async fn send_multipart(
    app: &Router,
    method: &str,
    uri: &str,
    data_field: &str,
    data: &Value,
    image: Option<ImagePart<'_>>,
) -> anyhow::Result<TestResponse> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{data_field}\"\r\nContent-Type: application/json\r\n\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(data.to_string().as_bytes());
    body.extend_from_slice(b"\r\n");
    if let Some((file_name, content_type, bytes)) = image {
        body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"imageFile\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n")
                .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))?;
    send(app, req).await
}

pub fn user_body(email: &str, phone: &str, password: &str) -> Value {
    serde_json::json!({
        "email": email,
        "phone": phone,
        "password": password,
        "firstName": "Test",
        "lastName": "User",
        "role": "owner"
    })
}

/// Creates a user and returns its id.
pub async fn create_user(app: &Router, email: &str, phone: &str, password: &str) -> anyhow::Result<i64> {
    let resp = send_json(app, "POST", "/api/users", &user_body(email, phone, password)).await?;
    assert_eq!(resp.status, StatusCode::CREATED, "create user: {}", String::from_utf8_lossy(&resp.body));
    resp.json()?["id"].as_i64().ok_or_else(|| anyhow::anyhow!("missing id"))
}

pub fn store_body(owner_id: i64) -> Value {
    serde_json::json!({
        "name": "Pho Hoa",
        "description": "Beef noodle soup",
        "address": "260C Pasteur",
        "phone": "0283829794",
        "openTime": "06:00",
        "closeTime": "22:00",
        "status": "ACTIVE",
        "ownerId": owner_id
    })
}
