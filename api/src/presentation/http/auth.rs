use axum::{
    Json, Router,
    extract::{FromRequestParts, State},
    http::{HeaderMap, HeaderValue, StatusCode, header, request::Parts},
    routing::post,
};
use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::ports::cart_repository::CartRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::auth::login::{Login as LoginUc, LoginRequest as LoginDto};
use crate::application::use_cases::auth::register::{
    Register as RegisterUc, RegisterRequest as RegisterDto,
};
use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::domain::users::user::User;
use crate::presentation::http::error::{ApiError, ApiResult, MessageResponse};
use crate::presentation::http::users::CartLineResponse;

pub const AUTH_COOKIE: &str = "jwt";

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub mobile: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            mobile: u.mobile,
            role: u.role.as_str().to_string(),
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub cart: Vec<CartLineResponse>,
    pub access_token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/auth/register", tag = "Auth", request_body = RegisterRequest, security(()), responses(
    (status = 201, body = AuthResponse),
    (status = 400, body = MessageResponse)
))]
pub async fn register(
    State(ctx): State<AppContext>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, HeaderMap, Json<AuthResponse>)> {
    let repo = ctx.user_repo();
    let uc = RegisterUc {
        repo: repo.as_ref(),
    };
    let dto = RegisterDto {
        name: req.name,
        email: req.email,
        password: req.password,
        mobile: req.mobile,
    };
    let user = uc.execute(&dto).await?;
    tracing::info!(user_id = %user.id, "user_registered");
    let token = issue_token(&ctx.cfg, user.id)?;
    let headers = cookie_headers(&build_auth_cookie(
        &token,
        ctx.cfg.jwt_expires_secs,
        ctx.cfg.cookie_secure,
    ));
    Ok((
        StatusCode::CREATED,
        headers,
        Json(AuthResponse {
            user: user.into(),
            cart: Vec::new(),
            access_token: token,
        }),
    ))
}

#[utoipa::path(post, path = "/api/auth/login", tag = "Auth", request_body = LoginRequest, security(()), responses(
    (status = 200, body = AuthResponse),
    (status = 401, body = MessageResponse),
    (status = 503, body = MessageResponse)
))]
pub async fn login(
    State(ctx): State<AppContext>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<(HeaderMap, Json<AuthResponse>)> {
    let repo = ctx.user_repo();
    let settings = ctx.settings_repo();
    let uc = LoginUc {
        repo: repo.as_ref(),
        settings: settings.as_ref(),
    };
    let dto = LoginDto {
        email: req.email,
        password: req.password,
    };
    let user = uc.execute(&dto).await?;
    let cart = ctx.cart_repo().list_cart(user.id).await?;
    let token = issue_token(&ctx.cfg, user.id)?;
    let headers = cookie_headers(&build_auth_cookie(
        &token,
        ctx.cfg.jwt_expires_secs,
        ctx.cfg.cookie_secure,
    ));
    Ok((
        headers,
        Json(AuthResponse {
            user: user.into(),
            cart: cart.into_iter().map(CartLineResponse::from).collect(),
            access_token: token,
        }),
    ))
}

#[utoipa::path(post, path = "/api/auth/logout", tag = "Auth", responses((status = 200, body = MessageResponse)))]
pub async fn logout(State(ctx): State<AppContext>) -> (HeaderMap, Json<MessageResponse>) {
    let headers = cookie_headers(&build_auth_cookie("", 0, ctx.cfg.cookie_secure));
    (
        headers,
        Json(MessageResponse {
            message: "Logged out successfully".into(),
        }),
    )
}

// --- Extractors ---

/// Signed-in user, resolved from the `jwt` cookie or a bearer token.
pub struct AuthUser(pub User);

/// Signed-in user with the admin role.
pub struct AdminUser(pub User);

#[axum::async_trait]
impl FromRequestParts<AppContext> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_headers(&parts.headers)
            .ok_or_else(|| ApiError::unauthorized("Not authorized, no token"))?;
        let user_id = validate_token(&ctx.cfg, &token)
            .ok_or_else(|| ApiError::unauthorized("Not authorized, token failed"))?;
        let user = ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::unauthorized("Not authorized, token failed"))?;
        Ok(AuthUser(user))
    }
}

#[axum::async_trait]
impl FromRequestParts<AppContext> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, ctx).await?;
        if !user.is_admin() {
            tracing::warn!(user_id = %user.id, "admin_route_denied");
            return Err(ApiError::unauthorized("Not authorized as admin"));
        }
        Ok(AdminUser(user))
    }
}

// --- JWT & cookie helpers ---

pub fn issue_token(cfg: &Config, user_id: Uuid) -> anyhow::Result<String> {
    let now = Utc::now().timestamp().max(0) as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + cfg.jwt_expires_secs.max(0) as usize,
    };
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn validate_token(cfg: &Config, token: &str) -> Option<Uuid> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .ok()?;
    Uuid::parse_str(&data.claims.sub).ok()
}

/// Cookie first, then `Authorization: Bearer`.
fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|c| get_cookie(c, AUTH_COOKIE))
        .filter(|t| !t.is_empty());
    if from_cookie.is_some() {
        return from_cookie;
    }
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

fn get_cookie(cookie_header: &str, name: &str) -> Option<String> {
    for part in cookie_header.split(';') {
        let kv = part.trim();
        if let Some((k, v)) = kv.split_once('=') {
            if k.trim() == name {
                return Some(v.trim().to_string());
            }
        }
    }
    None
}

/// Cross-site deployments need `SameSite=None`, which browsers only accept with `Secure`.
fn build_auth_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let same_site = if secure {
        "SameSite=None; Secure"
    } else {
        "SameSite=Lax"
    };
    format!(
        "{}={}; HttpOnly; Path=/; Max-Age={}; {}",
        AUTH_COOKIE,
        token,
        max_age_secs.max(0),
        same_site
    )
}

fn cookie_headers(cookie: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    match HeaderValue::from_str(cookie) {
        Ok(v) => {
            headers.insert(header::SET_COOKIE, v);
        }
        Err(e) => tracing::error!(error = %e, "invalid_set_cookie_header"),
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_wins_over_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; jwt=abc.def"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer xyz"));
        assert_eq!(token_from_headers(&headers).as_deref(), Some("abc.def"));

        headers.remove(header::COOKIE);
        assert_eq!(token_from_headers(&headers).as_deref(), Some("xyz"));

        headers.insert(header::COOKIE, HeaderValue::from_static("jwt="));
        assert_eq!(token_from_headers(&headers).as_deref(), Some("xyz"));
    }

    #[test]
    fn cookie_attributes_follow_secure_flag() {
        let secure = build_auth_cookie("t", 60, true);
        assert_eq!(secure, "jwt=t; HttpOnly; Path=/; Max-Age=60; SameSite=None; Secure");
        let lax = build_auth_cookie("", -5, false);
        assert_eq!(lax, "jwt=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax");
    }
}
