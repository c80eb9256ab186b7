use axum::{extract::{Request, State}, http::{header, StatusCode}, middleware::Next, response::Response, Extension, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use service::auth::{self, domain::{AuthSession, LoginInput}, token::{self, Claims, TokenConfig}};
use service::user_service::UserDto;

use super::extract::ApiJson;
use crate::errors::JsonApiError;

pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: TokenConfig,
}

#[utoipa::path(post, path = "/api/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged in", body = crate::openapi::LoginResponseDoc), (status = 401, description = "Wrong password"), (status = 404, description = "Unknown account")))]
pub async fn login(State(state): State<ServerState>, jar: CookieJar, ApiJson(input): ApiJson<LoginInput>) -> Result<(CookieJar, Json<AuthSession>), JsonApiError> {
    let session = auth::login(&state.db, &state.auth, input).await?;
    let mut cookie = Cookie::new(AUTH_COOKIE, session.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    Ok((jar.add(cookie), Json(session)))
}

#[utoipa::path(post, path = "/api/auth/logout", tag = "auth", responses((status = 204, description = "Cookie cleared")))]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let mut cookie = Cookie::from(AUTH_COOKIE);
    cookie.set_path("/");
    (jar.remove(cookie), StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/users/me", tag = "users", responses((status = 200, description = "Current user", body = crate::openapi::UserDoc), (status = 401, description = "Missing or invalid token"), (status = 404, description = "User no longer exists")))]
pub async fn me(State(state): State<ServerState>, Extension(claims): Extension<Claims>) -> Result<Json<UserDto>, JsonApiError> {
    Ok(Json(auth::current_user(&state.db, &claims).await?))
}

/// Verifies `Authorization: Bearer <token>`, falling back to the `auth_token` cookie,
/// and hands the decoded claims to the handler as an extension.
pub async fn require_bearer_token_state(
    State(state): State<ServerState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_string();
    let authz = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let token = match authz {
        Some(h) => match h.strip_prefix("Bearer ") {
            Some(t) => t.trim().to_string(),
            None => {
                warn!(path = %path, "invalid Authorization format (expect Bearer)");
                return Err(unauthorized("expected a Bearer token"));
            }
        },
        None => match jar.get(AUTH_COOKIE).map(|c| c.value().to_string()) {
            Some(t) if !t.is_empty() => t,
            _ => {
                warn!(path = %path, "missing Authorization header and auth_token cookie");
                return Err(unauthorized("missing token"));
            }
        },
    };

    match token::verify_token(&state.auth.jwt_secret, &token) {
        Ok(claims) => {
            info!(path = %path, user_id = claims.uid, "token accepted");
            req.extensions_mut().insert(claims);
            Ok(next.run(req).await)
        }
        Err(e) => {
            warn!(path = %path, err = %e, "token validation failed");
            Err(e.into())
        }
    }
}

fn unauthorized(detail: &str) -> JsonApiError {
    JsonApiError::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some(detail.to_string()))
}
