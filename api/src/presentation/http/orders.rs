use std::collections::HashMap;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post, put},
};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::orders::confirm_payment::ConfirmPayment;
use crate::application::use_cases::orders::create_order::CreateOrder;
use crate::application::use_cases::orders::get_order::GetOrder;
use crate::application::use_cases::orders::list_my_orders::ListMyOrders;
use crate::application::use_cases::orders::list_orders::ListOrders;
use crate::application::use_cases::orders::retry_grants::RetryGrants;
use crate::application::use_cases::orders::submit_payment_proof::SubmitPaymentProof;
use crate::application::use_cases::payments::ingest_sms::{IngestSms, SmsOutcome};
use crate::application::use_cases::payments::ingest_transaction::IngestTransaction;
use crate::bootstrap::app_context::AppContext;
use crate::domain::orders::order::{Order, OrderItem, OrderWithBuyer};
use crate::presentation::http::auth::{AdminUser, AuthUser};
use crate::presentation::http::error::{ApiError, ApiResult, MessageResponse};

pub const WEBHOOK_SECRET_HEADER: &str = "x-webhook-secret";

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub book_id: Uuid,
    pub title: String,
    pub price: i64,
    pub cover_image: Option<String>,
    pub access_granted: bool,
    /// Present once the order is paid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_drive_file_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub items: Vec<OrderItemResponse>,
    pub total_price: i64,
    pub payment_proof: String,
    pub payment_id: Option<String>,
    pub payment_method: Option<String>,
    pub is_paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderResponse {
    fn with_drive_files(o: Order, drive_files: &HashMap<Uuid, String>) -> Self {
        let item = |i: OrderItem| OrderItemResponse {
            google_drive_file_id: drive_files.get(&i.book_id).cloned(),
            book_id: i.book_id,
            title: i.title,
            price: i.price,
            cover_image: i.cover_image,
            access_granted: i.access_granted,
        };
        Self {
            id: o.id,
            user_id: o.user_id,
            items: o.items.into_iter().map(item).collect(),
            total_price: o.total_price,
            payment_proof: o.payment_proof,
            payment_id: o.payment_id,
            payment_method: o.payment_method,
            is_paid: o.is_paid,
            paid_at: o.paid_at,
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self::with_drive_files(o, &HashMap::new())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminOrderResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub buyer_name: String,
    pub buyer_email: String,
}

impl From<OrderWithBuyer> for AdminOrderResponse {
    fn from(o: OrderWithBuyer) -> Self {
        Self {
            order: o.order.into(),
            buyer_name: o.buyer_name,
            buyer_email: o.buyer_email,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub book_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentProofRequest {
    #[serde(default)]
    pub payment_proof: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ConfirmPaymentRequest {
    #[serde(default)]
    pub utr: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GrantResponse {
    pub order: OrderResponse,
    pub granted: Vec<Uuid>,
    pub failed: Vec<Uuid>,
    pub skipped: Vec<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SmsWebhookRequest {
    #[serde(default)]
    pub sms_body: String,
    #[serde(default)]
    pub sender: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SmsWebhookResponse {
    pub message: String,
    pub matched: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub duplicate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/orders", post(create_order).get(list_orders))
        .route("/orders/myorders", get(list_my_orders))
        .route("/orders/webhook/sms", post(sms_webhook))
        .route("/orders/:id", get(get_order))
        .route("/orders/:id/pay", put(submit_payment_proof))
        .route("/orders/:id/confirm", put(confirm_payment))
        .route("/orders/:id/grant", post(retry_grants))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/orders", tag = "Orders", request_body = CreateOrderRequest, responses(
    (status = 201, body = OrderResponse),
    (status = 400, body = MessageResponse)
))]
pub async fn create_order(
    State(ctx): State<AppContext>,
    AuthUser(user): AuthUser,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<OrderResponse>)> {
    let req: CreateOrderRequest = optional_json(&body)?;
    let orders = ctx.order_repo();
    let books = ctx.book_repo();
    let carts = ctx.cart_repo();
    let uc = CreateOrder {
        orders: orders.as_ref(),
        books: books.as_ref(),
        carts: carts.as_ref(),
    };
    let order = uc.execute(user.id, req.book_ids).await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

#[utoipa::path(get, path = "/api/orders", tag = "Orders", responses(
    (status = 200, body = [AdminOrderResponse]),
    (status = 401, body = MessageResponse)
))]
pub async fn list_orders(
    State(ctx): State<AppContext>,
    _admin: AdminUser,
) -> ApiResult<Json<Vec<AdminOrderResponse>>> {
    let orders = ctx.order_repo();
    let uc = ListOrders {
        orders: orders.as_ref(),
    };
    let rows = uc.execute().await?;
    Ok(Json(rows.into_iter().map(AdminOrderResponse::from).collect()))
}

#[utoipa::path(get, path = "/api/orders/myorders", tag = "Orders", responses(
    (status = 200, body = [OrderResponse])
))]
pub async fn list_my_orders(
    State(ctx): State<AppContext>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<Vec<OrderResponse>>> {
    let orders = ctx.order_repo();
    let uc = ListMyOrders {
        orders: orders.as_ref(),
    };
    let rows = uc.execute(user.id).await?;
    Ok(Json(rows.into_iter().map(OrderResponse::from).collect()))
}

#[utoipa::path(get, path = "/api/orders/{id}", tag = "Orders",
    params(("id" = Uuid, Path, description = "Order id")),
    responses((status = 200, body = OrderResponse), (status = 404, body = MessageResponse))
)]
pub async fn get_order(
    State(ctx): State<AppContext>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<OrderResponse>> {
    let orders = ctx.order_repo();
    let books = ctx.book_repo();
    let uc = GetOrder {
        orders: orders.as_ref(),
        books: books.as_ref(),
    };
    let view = uc.execute(&user, id).await?;
    Ok(Json(OrderResponse::with_drive_files(
        view.order,
        &view.drive_files,
    )))
}

#[utoipa::path(put, path = "/api/orders/{id}/pay", tag = "Orders", request_body = PaymentProofRequest,
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, body = OrderResponse),
        (status = 400, body = MessageResponse),
        (status = 404, body = MessageResponse)
    )
)]
pub async fn submit_payment_proof(
    State(ctx): State<AppContext>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<PaymentProofRequest>,
) -> ApiResult<Json<OrderResponse>> {
    let orders = ctx.order_repo();
    let transactions = ctx.transaction_repo();
    let users = ctx.user_repo();
    let books = ctx.book_repo();
    let drive = ctx.drive_access();
    let uc = SubmitPaymentProof {
        orders: orders.as_ref(),
        transactions: transactions.as_ref(),
        users: users.as_ref(),
        books: books.as_ref(),
        drive: drive.as_ref(),
    };
    let order = uc.execute(user.id, id, &req.payment_proof).await?;
    Ok(Json(order.into()))
}

#[utoipa::path(put, path = "/api/orders/{id}/confirm", tag = "Orders", request_body = ConfirmPaymentRequest,
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, body = OrderResponse),
        (status = 400, body = MessageResponse),
        (status = 404, body = MessageResponse)
    )
)]
pub async fn confirm_payment(
    State(ctx): State<AppContext>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> ApiResult<Json<OrderResponse>> {
    let req: ConfirmPaymentRequest = optional_json(&body)?;
    let orders = ctx.order_repo();
    let transactions = ctx.transaction_repo();
    let users = ctx.user_repo();
    let books = ctx.book_repo();
    let drive = ctx.drive_access();
    let uc = ConfirmPayment {
        orders: orders.as_ref(),
        transactions: transactions.as_ref(),
        users: users.as_ref(),
        books: books.as_ref(),
        drive: drive.as_ref(),
    };
    let order = uc.execute(id, req.utr.as_deref()).await?;
    tracing::info!(order_id = %order.id, admin_id = %admin.id, "order_marked_paid");
    Ok(Json(order.into()))
}

#[utoipa::path(post, path = "/api/orders/{id}/grant", tag = "Orders",
    params(("id" = Uuid, Path, description = "Order id")),
    responses((status = 200, body = GrantResponse), (status = 400, body = MessageResponse))
)]
pub async fn retry_grants(
    State(ctx): State<AppContext>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<GrantResponse>> {
    let orders = ctx.order_repo();
    let users = ctx.user_repo();
    let books = ctx.book_repo();
    let drive = ctx.drive_access();
    let uc = RetryGrants {
        orders: orders.as_ref(),
        users: users.as_ref(),
        books: books.as_ref(),
        drive: drive.as_ref(),
    };
    let (order, report) = uc.execute(id).await?;
    Ok(Json(GrantResponse {
        order: order.into(),
        granted: report.granted,
        failed: report.failed,
        skipped: report.skipped,
    }))
}

/// An empty body means the default request; anything else must deserialize.
fn optional_json<T: DeserializeOwned + Default>(body: &Bytes) -> ApiResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("Invalid request body: {e}")))
}

fn webhook_authorized(expected: Option<&str>, headers: &HeaderMap) -> bool {
    let Some(expected) = expected else {
        return true;
    };
    // Fixed-length digests keep the comparison time independent of the secret.
    headers
        .get(WEBHOOK_SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|got| Sha256::digest(got.as_bytes()) == Sha256::digest(expected.as_bytes()))
}

#[utoipa::path(post, path = "/api/orders/webhook/sms", tag = "Orders", request_body = SmsWebhookRequest,
    security(()),
    responses((status = 200, body = SmsWebhookResponse), (status = 401, body = MessageResponse))
)]
pub async fn sms_webhook(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    Json(req): Json<SmsWebhookRequest>,
) -> ApiResult<Json<SmsWebhookResponse>> {
    if !webhook_authorized(ctx.cfg.sms_webhook_secret.as_deref(), &headers) {
        tracing::warn!(sender = ?req.sender, "sms_webhook_rejected");
        return Err(ApiError::unauthorized("Invalid webhook secret"));
    }
    let transactions = ctx.transaction_repo();
    let orders = ctx.order_repo();
    let users = ctx.user_repo();
    let books = ctx.book_repo();
    let drive = ctx.drive_access();
    let uc = IngestSms {
        inner: IngestTransaction {
            transactions: transactions.as_ref(),
            orders: orders.as_ref(),
            users: users.as_ref(),
            books: books.as_ref(),
            drive: drive.as_ref(),
        },
    };
    let outcome = match uc.execute(&req.sms_body, req.sender.as_deref()).await? {
        SmsOutcome::NotPaymentSms => {
            return Ok(Json(SmsWebhookResponse {
                message: "Not a payment SMS".into(),
                matched: false,
                duplicate: false,
                order_id: None,
                utr: None,
                amount: None,
            }));
        }
        SmsOutcome::Ingested(outcome) => outcome,
    };
    let order_id = outcome.matched_order.as_ref().map(|o| o.id);
    let message = if order_id.is_some() {
        "Order Verified Successfully"
    } else {
        "No matching order found"
    };
    Ok(Json(SmsWebhookResponse {
        message: message.into(),
        matched: order_id.is_some(),
        duplicate: outcome.duplicate,
        order_id,
        utr: Some(outcome.transaction.utr),
        amount: Some(outcome.transaction.amount),
    }))
}
