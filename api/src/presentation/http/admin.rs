use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::ports::stats_repository::{BookSales, DashboardStats, MonthlySales};
use crate::application::use_cases::admin::get_stats::GetStats;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::AdminUser;
use crate::presentation::http::error::{ApiResult, MessageResponse};

#[derive(Debug, Serialize, ToSchema)]
pub struct MonthlySalesResponse {
    /// `YYYY-MM`
    pub month: String,
    pub revenue: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookSalesResponse {
    pub book_id: Uuid,
    pub title: Option<String>,
    pub category: Option<String>,
    pub count: i64,
    pub revenue: i64,
}

/// Money fields are paise.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_orders: i64,
    pub total_users: i64,
    pub total_books: i64,
    pub total_cart_items: i64,
    pub total_revenue: i64,
    pub yearly_revenue: i64,
    pub monthly_revenue: i64,
    pub monthly_sales: Vec<MonthlySalesResponse>,
    pub book_analytics: Vec<BookSalesResponse>,
}

impl From<DashboardStats> for StatsResponse {
    fn from(s: DashboardStats) -> Self {
        Self {
            total_orders: s.total_orders,
            total_users: s.total_users,
            total_books: s.total_books,
            total_cart_items: s.total_cart_items,
            total_revenue: s.total_revenue,
            yearly_revenue: s.yearly_revenue,
            monthly_revenue: s.monthly_revenue,
            monthly_sales: s
                .monthly_sales
                .into_iter()
                .map(|MonthlySales { month, revenue }| MonthlySalesResponse { month, revenue })
                .collect(),
            book_analytics: s
                .book_analytics
                .into_iter()
                .map(|b: BookSales| BookSalesResponse {
                    book_id: b.book_id,
                    title: b.title,
                    category: b.category,
                    count: b.count,
                    revenue: b.revenue,
                })
                .collect(),
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/admin/stats", get(get_stats))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/admin/stats", tag = "Admin", responses(
    (status = 200, body = StatsResponse),
    (status = 401, body = MessageResponse)
))]
pub async fn get_stats(
    State(ctx): State<AppContext>,
    _admin: AdminUser,
) -> ApiResult<Json<StatsResponse>> {
    let repo = ctx.stats_repo();
    let uc = GetStats {
        repo: repo.as_ref(),
    };
    let stats = uc.execute(chrono::Utc::now()).await?;
    Ok(Json(stats.into()))
}
