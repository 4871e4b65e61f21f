use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;

use crate::application::ports::stats_repository::{
    BookSales, DashboardStats, MonthlySales, StatsRepository, latest_months,
};
use crate::infrastructure::db::PgPool;

pub struct SqlxStatsRepository {
    pub pool: PgPool,
}

impl SqlxStatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for SqlxStatsRepository {
    async fn dashboard(
        &self,
        year_start: DateTime<Utc>,
        month_start: DateTime<Utc>,
        months: i64,
        top_books: i64,
    ) -> anyhow::Result<DashboardStats> {
        let totals = sqlx::query(
            r#"SELECT
                 (SELECT count(*) FROM orders) AS total_orders,
                 (SELECT count(*) FROM users) AS total_users,
                 (SELECT count(*) FROM books) AS total_books,
                 (SELECT COALESCE(SUM(qty), 0)::bigint FROM cart_items) AS total_cart_items,
                 (SELECT COALESCE(SUM(total_price), 0)::bigint FROM orders WHERE is_paid) AS total_revenue,
                 (SELECT COALESCE(SUM(total_price), 0)::bigint FROM orders
                    WHERE is_paid AND created_at >= $1) AS yearly_revenue,
                 (SELECT COALESCE(SUM(total_price), 0)::bigint FROM orders
                    WHERE is_paid AND created_at >= $2) AS monthly_revenue"#,
        )
        .bind(year_start)
        .bind(month_start)
        .fetch_one(&self.pool)
        .await?;

        let month_rows = sqlx::query(
            r#"SELECT to_char(date_trunc('month', created_at AT TIME ZONE 'UTC'), 'YYYY-MM') AS month,
                      SUM(total_price)::bigint AS revenue
               FROM orders WHERE is_paid
               GROUP BY 1 ORDER BY 1 DESC LIMIT $1"#,
        )
        .bind(months)
        .fetch_all(&self.pool)
        .await?;
        let monthly_sales = latest_months(
            month_rows
                .iter()
                .map(|r| MonthlySales {
                    month: r.get("month"),
                    revenue: r.get("revenue"),
                })
                .collect(),
            months as usize,
        );

        let book_rows = sqlx::query(
            r#"SELECT oi.book_id, b.title, b.category,
                      count(*) AS count, SUM(oi.price)::bigint AS revenue
               FROM order_items oi
               JOIN orders o ON o.id = oi.order_id
               LEFT JOIN books b ON b.id = oi.book_id
               WHERE o.is_paid
               GROUP BY oi.book_id, b.title, b.category
               ORDER BY revenue DESC
               LIMIT $1"#,
        )
        .bind(top_books)
        .fetch_all(&self.pool)
        .await?;
        let book_analytics = book_rows
            .iter()
            .map(|r| BookSales {
                book_id: r.get("book_id"),
                title: r.try_get("title").ok().flatten(),
                category: r.try_get("category").ok().flatten(),
                count: r.get("count"),
                revenue: r.get("revenue"),
            })
            .collect();

        Ok(DashboardStats {
            total_orders: totals.get("total_orders"),
            total_users: totals.get("total_users"),
            total_books: totals.get("total_books"),
            total_cart_items: totals.get("total_cart_items"),
            total_revenue: totals.get("total_revenue"),
            yearly_revenue: totals.get("yearly_revenue"),
            monthly_revenue: totals.get("monthly_revenue"),
            monthly_sales,
            book_analytics,
        })
    }
}
