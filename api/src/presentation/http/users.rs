use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::users::add_to_cart::AddToCart;
use crate::application::use_cases::users::get_profile::{GetProfile, Profile};
use crate::application::use_cases::users::get_user::GetUser;
use crate::application::use_cases::users::list_users::ListUsers;
use crate::application::use_cases::users::remove_from_cart::RemoveFromCart;
use crate::bootstrap::app_context::AppContext;
use crate::domain::downloads::sample_download::SampleDownload;
use crate::domain::users::user::CartLine;
use crate::presentation::http::auth::{AdminUser, AuthUser, UserResponse};
use crate::presentation::http::books::BookResponse;
use crate::presentation::http::error::{ApiResult, MessageResponse};
use crate::presentation::http::orders::OrderResponse;

#[derive(Debug, Serialize, ToSchema)]
pub struct CartLineResponse {
    pub book: BookResponse,
    pub qty: i32,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            book: BookResponse::public(line.book),
            qty: line.qty,
        }
    }
}

fn cart_response(lines: Vec<CartLine>) -> Vec<CartLineResponse> {
    lines.into_iter().map(CartLineResponse::from).collect()
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub cart: Vec<CartLineResponse>,
    pub orders: Vec<OrderResponse>,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            user: p.user.into(),
            cart: cart_response(p.cart),
            orders: p.orders.into_iter().map(OrderResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SampleDownloadResponse {
    pub id: Uuid,
    pub book_id: Uuid,
    pub book_title: Option<String>,
    pub downloaded_at: DateTime<Utc>,
}

impl From<SampleDownload> for SampleDownloadResponse {
    fn from(d: SampleDownload) -> Self {
        Self {
            id: d.id,
            book_id: d.book_id,
            book_title: d.book_title,
            downloaded_at: d.downloaded_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserDetailResponse {
    #[serde(flatten)]
    pub profile: ProfileResponse,
    pub sample_downloads: Vec<SampleDownloadResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserWithCartResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub cart: Vec<CartLineResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub book_id: Uuid,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/users/profile", get(get_profile))
        .route("/users/cart", post(add_to_cart))
        .route("/users/cart/:book_id", delete(remove_from_cart))
        .route("/users/users", get(list_users))
        .route("/users/:id", get(get_user))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/users/profile", tag = "Users", responses(
    (status = 200, body = ProfileResponse),
    (status = 401, body = MessageResponse)
))]
pub async fn get_profile(
    State(ctx): State<AppContext>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let users = ctx.user_repo();
    let carts = ctx.cart_repo();
    let orders = ctx.order_repo();
    let uc = GetProfile {
        users: users.as_ref(),
        carts: carts.as_ref(),
        orders: orders.as_ref(),
    };
    let profile = uc.execute(user.id).await?;
    Ok(Json(profile.into()))
}

#[utoipa::path(post, path = "/api/users/cart", tag = "Users", request_body = AddToCartRequest, responses(
    (status = 200, body = [CartLineResponse]),
    (status = 400, body = MessageResponse),
    (status = 404, body = MessageResponse)
))]
pub async fn add_to_cart(
    State(ctx): State<AppContext>,
    AuthUser(user): AuthUser,
    Json(req): Json<AddToCartRequest>,
) -> ApiResult<Json<Vec<CartLineResponse>>> {
    let carts = ctx.cart_repo();
    let books = ctx.book_repo();
    let uc = AddToCart {
        carts: carts.as_ref(),
        books: books.as_ref(),
    };
    let cart = uc.execute(user.id, req.book_id).await?;
    Ok(Json(cart_response(cart)))
}

#[utoipa::path(delete, path = "/api/users/cart/{book_id}", tag = "Users",
    params(("book_id" = Uuid, Path, description = "Book id")),
    responses((status = 200, body = [CartLineResponse]))
)]
pub async fn remove_from_cart(
    State(ctx): State<AppContext>,
    AuthUser(user): AuthUser,
    Path(book_id): Path<Uuid>,
) -> ApiResult<Json<Vec<CartLineResponse>>> {
    let carts = ctx.cart_repo();
    let uc = RemoveFromCart {
        carts: carts.as_ref(),
    };
    let cart = uc.execute(user.id, book_id).await?;
    Ok(Json(cart_response(cart)))
}

#[utoipa::path(get, path = "/api/users/users", tag = "Users", responses(
    (status = 200, body = [UserWithCartResponse]),
    (status = 401, body = MessageResponse)
))]
pub async fn list_users(
    State(ctx): State<AppContext>,
    _admin: AdminUser,
) -> ApiResult<Json<Vec<UserWithCartResponse>>> {
    let users = ctx.user_repo();
    let carts = ctx.cart_repo();
    let uc = ListUsers {
        users: users.as_ref(),
        carts: carts.as_ref(),
    };
    let rows = uc.execute().await?;
    Ok(Json(
        rows.into_iter()
            .map(|(user, cart)| UserWithCartResponse {
                user: user.into(),
                cart: cart_response(cart),
            })
            .collect(),
    ))
}

#[utoipa::path(get, path = "/api/users/{id}", tag = "Users",
    params(("id" = Uuid, Path, description = "User id")),
    responses((status = 200, body = UserDetailResponse), (status = 404, body = MessageResponse))
)]
pub async fn get_user(
    State(ctx): State<AppContext>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UserDetailResponse>> {
    let users = ctx.user_repo();
    let carts = ctx.cart_repo();
    let orders = ctx.order_repo();
    let downloads = ctx.sample_download_repo();
    let uc = GetUser {
        users: users.as_ref(),
        carts: carts.as_ref(),
        orders: orders.as_ref(),
        downloads: downloads.as_ref(),
    };
    let detail = uc.execute(id).await?;
    Ok(Json(UserDetailResponse {
        profile: detail.profile.into(),
        sample_downloads: detail
            .sample_downloads
            .into_iter()
            .map(SampleDownloadResponse::from)
            .collect(),
    }))
}
