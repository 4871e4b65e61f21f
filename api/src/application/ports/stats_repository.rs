use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySales {
    /// `YYYY-MM`
    pub month: String,
    pub revenue: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSales {
    pub book_id: Uuid,
    pub title: Option<String>,
    pub category: Option<String>,
    pub count: i64,
    pub revenue: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_orders: i64,
    pub total_users: i64,
    pub total_books: i64,
    pub total_cart_items: i64,
    pub total_revenue: i64,
    pub yearly_revenue: i64,
    pub monthly_revenue: i64,
    pub monthly_sales: Vec<MonthlySales>,
    pub book_analytics: Vec<BookSales>,
}

/// Keeps the `months` most recent buckets, oldest first.
pub fn latest_months(mut buckets: Vec<MonthlySales>, months: usize) -> Vec<MonthlySales> {
    buckets.sort_by(|a, b| a.month.cmp(&b.month));
    let skip = buckets.len().saturating_sub(months);
    buckets.split_off(skip)
}

#[async_trait]
pub trait StatsRepository: Send + Sync {
    async fn dashboard(
        &self,
        year_start: chrono::DateTime<chrono::Utc>,
        month_start: chrono::DateTime<chrono::Utc>,
        months: i64,
        top_books: i64,
    ) -> anyhow::Result<DashboardStats>;
}
