use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::order_repository::{OrderRepository, SettleOutcome};
use crate::domain::orders::order::{Order, OrderItem, OrderWithBuyer};
use crate::infrastructure::db::PgPool;

pub struct SqlxOrderRepository {
    pub pool: PgPool,
}

impl SqlxOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_items(&self, order_ids: &[Uuid]) -> anyhow::Result<HashMap<Uuid, Vec<OrderItem>>> {
        let mut out: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
        if order_ids.is_empty() {
            return Ok(out);
        }
        let rows = sqlx::query(
            r#"SELECT order_id, book_id, title, price, cover_image, access_granted
               FROM order_items WHERE order_id = ANY($1)
               ORDER BY order_id, position"#,
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await?;
        for r in rows {
            out.entry(r.get("order_id")).or_default().push(OrderItem {
                book_id: r.get("book_id"),
                title: r.get("title"),
                price: r.get("price"),
                cover_image: r.try_get("cover_image").ok().flatten(),
                access_granted: r.get("access_granted"),
            });
        }
        Ok(out)
    }

    async fn with_items(&self, rows: &[PgRow]) -> anyhow::Result<Vec<Order>> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.get("id")).collect();
        let mut items = self.load_items(&ids).await?;
        Ok(rows
            .iter()
            .map(|r| {
                let id: Uuid = r.get("id");
                map_order(r, items.remove(&id).unwrap_or_default())
            })
            .collect())
    }
}

const ORDER_COLUMNS: &str = "o.id, o.user_id, o.total_price, o.payment_proof, o.payment_id, \
     o.payment_method, o.is_paid, o.paid_at, o.created_at, o.updated_at";

fn map_order(r: &PgRow, items: Vec<OrderItem>) -> Order {
    Order {
        id: r.get("id"),
        user_id: r.get("user_id"),
        items,
        total_price: r.get("total_price"),
        payment_proof: r.get("payment_proof"),
        payment_id: r.try_get("payment_id").ok().flatten(),
        payment_method: r.try_get("payment_method").ok().flatten(),
        is_paid: r.get("is_paid"),
        paid_at: r.try_get("paid_at").ok().flatten(),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

#[async_trait]
impl OrderRepository for SqlxOrderRepository {
    async fn create(
        &self,
        user_id: Uuid,
        items: &[OrderItem],
        total_price: i64,
    ) -> anyhow::Result<Order> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query(&format!(
            r#"INSERT INTO orders AS o (user_id, total_price) VALUES ($1, $2)
               RETURNING {ORDER_COLUMNS}"#
        ))
        .bind(user_id)
        .bind(total_price)
        .fetch_one(&mut *tx)
        .await?;
        let order_id: Uuid = row.get("id");
        for (position, item) in items.iter().enumerate() {
            sqlx::query(
                r#"INSERT INTO order_items (order_id, position, book_id, title, price, cover_image)
                   VALUES ($1, $2, $3, $4, $5, $6)"#,
            )
            .bind(order_id)
            .bind(position as i32)
            .bind(item.book_id)
            .bind(&item.title)
            .bind(item.price)
            .bind(&item.cover_image)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(map_order(&row, items.to_vec()))
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Order>> {
        let row = sqlx::query(&format!("SELECT {ORDER_COLUMNS} FROM orders o WHERE o.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(self.with_items(std::slice::from_ref(&row)).await?.pop())
    }

    async fn list_all(&self) -> anyhow::Result<Vec<OrderWithBuyer>> {
        let rows = sqlx::query(&format!(
            r#"SELECT {ORDER_COLUMNS}, u.name AS buyer_name, u.email AS buyer_email
               FROM orders o JOIN users u ON u.id = o.user_id
               ORDER BY o.created_at DESC"#
        ))
        .fetch_all(&self.pool)
        .await?;
        let orders = self.with_items(&rows).await?;
        Ok(orders
            .into_iter()
            .zip(rows.iter())
            .map(|(order, r)| OrderWithBuyer {
                order,
                buyer_name: r.get("buyer_name"),
                buyer_email: r.get("buyer_email"),
            })
            .collect())
    }

    async fn list_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Order>> {
        let rows = sqlx::query(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders o WHERE o.user_id = $1 ORDER BY o.created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        self.with_items(&rows).await
    }

    async fn set_payment_proof(
        &self,
        id: Uuid,
        proof: &str,
        method: &str,
    ) -> anyhow::Result<Option<Order>> {
        let res = sqlx::query(
            r#"UPDATE orders SET payment_proof = $2, payment_method = $3, updated_at = now()
               WHERE id = $1"#,
        )
        .bind(id)
        .bind(proof)
        .bind(method)
        .execute(&self.pool)
        .await?;
        if res.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(id).await
    }

    async fn list_pending_with_proof(&self, total_price: i64) -> anyhow::Result<Vec<Order>> {
        let rows = sqlx::query(&format!(
            r#"SELECT {ORDER_COLUMNS} FROM orders o
               WHERE NOT o.is_paid AND o.total_price = $1 AND o.payment_proof <> ''
               ORDER BY o.created_at ASC"#
        ))
        .bind(total_price)
        .fetch_all(&self.pool)
        .await?;
        self.with_items(&rows).await
    }

    async fn settle(
        &self,
        order_id: Uuid,
        payment_id: &str,
        transaction_id: Option<Uuid>,
    ) -> anyhow::Result<SettleOutcome> {
        let mut tx = self.pool.begin().await?;
        let paid: Option<bool> =
            sqlx::query_scalar("SELECT is_paid FROM orders WHERE id = $1 FOR UPDATE")
                .bind(order_id)
                .fetch_optional(&mut *tx)
                .await?;
        match paid {
            None => return Ok(SettleOutcome::OrderNotFound),
            Some(true) => return Ok(SettleOutcome::OrderAlreadyPaid),
            Some(false) => {}
        }
        if let Some(txn_id) = transaction_id {
            let res = sqlx::query(
                r#"UPDATE transactions SET is_used = true, order_id = $2, updated_at = now()
                   WHERE id = $1 AND is_used = false"#,
            )
            .bind(txn_id)
            .bind(order_id)
            .execute(&mut *tx)
            .await?;
            if res.rows_affected() == 0 {
                tx.rollback().await?;
                return Ok(SettleOutcome::TransactionAlreadyUsed);
            }
        }
        let res = sqlx::query(
            r#"UPDATE orders SET is_paid = true, paid_at = now(), payment_id = $2, updated_at = now()
               WHERE id = $1 AND is_paid = false"#,
        )
        .bind(order_id)
        .bind(payment_id)
        .execute(&mut *tx)
        .await?;
        if res.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(SettleOutcome::OrderAlreadyPaid);
        }
        sqlx::query(
            r#"UPDATE books SET sales_count = sales_count + 1
               WHERE id IN (SELECT book_id FROM order_items WHERE order_id = $1)"#,
        )
        .bind(order_id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        match self.get(order_id).await? {
            Some(order) => Ok(SettleOutcome::Settled(order)),
            None => Ok(SettleOutcome::OrderNotFound),
        }
    }

    async fn mark_item_granted(&self, order_id: Uuid, book_id: Uuid) -> anyhow::Result<()> {
        sqlx::query(
            "UPDATE order_items SET access_granted = true WHERE order_id = $1 AND book_id = $2",
        )
        .bind(order_id)
        .bind(book_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
