use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::application::use_cases::payments::ingest_transaction::{
    IngestOutcome, IngestTransaction,
};
use crate::application::use_cases::payments::list_transactions::ListTransactions;
use crate::bootstrap::app_context::AppContext;
use crate::domain::payments::transaction::{NewTransaction, Transaction};
use crate::presentation::http::auth::AdminUser;
use crate::presentation::http::error::{ApiResult, MessageResponse};

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionResponse {
    pub id: Uuid,
    pub utr: String,
    pub amount: i64,
    pub is_used: bool,
    pub order_id: Option<Uuid>,
    pub sender: Option<String>,
    pub raw_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(t: Transaction) -> Self {
        Self {
            id: t.id,
            utr: t.utr,
            amount: t.amount,
            is_used: t.is_used,
            order_id: t.order_id,
            sender: t.sender,
            raw_message: t.raw_message,
            created_at: t.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordTransactionRequest {
    pub utr: String,
    /// Paise.
    pub amount: i64,
    #[serde(default)]
    pub sender: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecordTransactionResponse {
    pub message: String,
    pub matched: bool,
    pub duplicate: bool,
    pub order_id: Option<Uuid>,
    pub transaction: TransactionResponse,
}

impl From<IngestOutcome> for RecordTransactionResponse {
    fn from(o: IngestOutcome) -> Self {
        let order_id = o.matched_order.as_ref().map(|m| m.id);
        let message = if o.duplicate {
            "Transaction already used"
        } else if order_id.is_some() {
            "Order Verified Successfully"
        } else {
            "Transaction recorded"
        };
        Self {
            message: message.into(),
            matched: order_id.is_some(),
            duplicate: o.duplicate,
            order_id,
            transaction: o.transaction.into(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListTransactionsQuery {
    #[serde(default)]
    pub unused: Option<bool>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route(
            "/payment/transactions",
            get(list_transactions).post(record_transaction),
        )
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/payment/transactions", tag = "Payments", request_body = RecordTransactionRequest, responses(
    (status = 200, body = RecordTransactionResponse),
    (status = 400, body = MessageResponse)
))]
pub async fn record_transaction(
    State(ctx): State<AppContext>,
    AdminUser(admin): AdminUser,
    Json(req): Json<RecordTransactionRequest>,
) -> ApiResult<Json<RecordTransactionResponse>> {
    let transactions = ctx.transaction_repo();
    let orders = ctx.order_repo();
    let users = ctx.user_repo();
    let books = ctx.book_repo();
    let drive = ctx.drive_access();
    let uc = IngestTransaction {
        transactions: transactions.as_ref(),
        orders: orders.as_ref(),
        users: users.as_ref(),
        books: books.as_ref(),
        drive: drive.as_ref(),
    };
    let sender = req
        .sender
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let outcome = uc
        .execute(NewTransaction {
            utr: req.utr,
            amount: req.amount,
            sender,
            raw_message: None,
        })
        .await?;
    tracing::info!(admin_id = %admin.id, utr = %outcome.transaction.utr, "transaction_entered_by_admin");
    Ok(Json(outcome.into()))
}

#[utoipa::path(get, path = "/api/payment/transactions", tag = "Payments", params(ListTransactionsQuery), responses(
    (status = 200, body = [TransactionResponse])
))]
pub async fn list_transactions(
    State(ctx): State<AppContext>,
    _admin: AdminUser,
    Query(q): Query<ListTransactionsQuery>,
) -> ApiResult<Json<Vec<TransactionResponse>>> {
    let transactions = ctx.transaction_repo();
    let uc = ListTransactions {
        transactions: transactions.as_ref(),
    };
    let rows = uc.execute(q.unused.unwrap_or(false)).await?;
    Ok(Json(rows.into_iter().map(TransactionResponse::from).collect()))
}
