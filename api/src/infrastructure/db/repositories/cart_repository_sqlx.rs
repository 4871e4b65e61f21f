use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use super::book_repository_sqlx::{BOOK_COLUMNS, map_book};
use crate::application::ports::cart_repository::CartRepository;
use crate::domain::users::user::CartLine;
use crate::infrastructure::db::PgPool;

pub struct SqlxCartRepository {
    pub pool: PgPool,
}

impl SqlxCartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartRepository for SqlxCartRepository {
    async fn list_cart(&self, user_id: Uuid) -> anyhow::Result<Vec<CartLine>> {
        let rows = sqlx::query(&format!(
            r#"SELECT {BOOK_COLUMNS}, c.qty
               FROM cart_items c JOIN books b ON b.id = c.book_id
               WHERE c.user_id = $1
               ORDER BY c.added_at"#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .iter()
            .map(|r| CartLine {
                book: map_book(r),
                qty: r.get("qty"),
            })
            .collect())
    }

    async fn list_carts_for(&self, user_ids: &[Uuid]) -> anyhow::Result<Vec<(Uuid, CartLine)>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query(&format!(
            r#"SELECT {BOOK_COLUMNS}, c.qty, c.user_id
               FROM cart_items c JOIN books b ON b.id = c.book_id
               WHERE c.user_id = ANY($1)
               ORDER BY c.added_at"#
        ))
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .iter()
            .map(|r| {
                (
                    r.get("user_id"),
                    CartLine {
                        book: map_book(r),
                        qty: r.get("qty"),
                    },
                )
            })
            .collect())
    }

    async fn add_item(&self, user_id: Uuid, book_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"INSERT INTO cart_items (user_id, book_id, qty) VALUES ($1, $2, 1)
               ON CONFLICT (user_id, book_id) DO NOTHING"#,
        )
        .bind(user_id)
        .bind(book_id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn remove_items(&self, user_id: Uuid, book_ids: &[Uuid]) -> anyhow::Result<u64> {
        if book_ids.is_empty() {
            return Ok(0);
        }
        let res = sqlx::query("DELETE FROM cart_items WHERE user_id = $1 AND book_id = ANY($2)")
            .bind(user_id)
            .bind(book_ids)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }
}
