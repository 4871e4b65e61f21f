use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::transaction_repository::TransactionRepository;
use crate::domain::payments::transaction::{NewTransaction, Transaction};
use crate::infrastructure::db::PgPool;

pub struct SqlxTransactionRepository {
    pub pool: PgPool,
}

impl SqlxTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const TXN_COLUMNS: &str = "id, utr, amount, is_used, order_id, sender, raw_message, created_at";

fn map_transaction(r: &PgRow) -> Transaction {
    Transaction {
        id: r.get("id"),
        utr: r.get("utr"),
        amount: r.get("amount"),
        is_used: r.get("is_used"),
        order_id: r.try_get("order_id").ok().flatten(),
        sender: r.try_get("sender").ok().flatten(),
        raw_message: r.try_get("raw_message").ok().flatten(),
        created_at: r.get("created_at"),
    }
}

#[async_trait]
impl TransactionRepository for SqlxTransactionRepository {
    async fn insert_or_get(&self, new_txn: &NewTransaction) -> anyhow::Result<(Transaction, bool)> {
        let inserted = sqlx::query(&format!(
            r#"INSERT INTO transactions (utr, amount, sender, raw_message)
               VALUES ($1, $2, $3, $4)
               ON CONFLICT (utr) DO NOTHING
               RETURNING {TXN_COLUMNS}"#
        ))
        .bind(&new_txn.utr)
        .bind(new_txn.amount)
        .bind(&new_txn.sender)
        .bind(&new_txn.raw_message)
        .fetch_optional(&self.pool)
        .await?;
        if let Some(row) = inserted {
            return Ok((map_transaction(&row), true));
        }
        let existing = self
            .find_by_utr(&new_txn.utr)
            .await?
            .ok_or_else(|| anyhow::anyhow!("transaction {} vanished after conflict", new_txn.utr))?;
        Ok((existing, false))
    }

    async fn find_by_utr(&self, utr: &str) -> anyhow::Result<Option<Transaction>> {
        let row = sqlx::query(&format!("SELECT {TXN_COLUMNS} FROM transactions WHERE utr = $1"))
            .bind(utr)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_transaction))
    }

    async fn list_unused_by_amount(&self, amount: i64) -> anyhow::Result<Vec<Transaction>> {
        let rows = sqlx::query(&format!(
            r#"SELECT {TXN_COLUMNS} FROM transactions
               WHERE NOT is_used AND amount = $1
               ORDER BY created_at ASC"#
        ))
        .bind(amount)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_transaction).collect())
    }

    async fn list(&self, unused_only: bool) -> anyhow::Result<Vec<Transaction>> {
        let rows = sqlx::query(&format!(
            r#"SELECT {TXN_COLUMNS} FROM transactions
               WHERE ($1 = false OR NOT is_used)
               ORDER BY created_at DESC"#
        ))
        .bind(unused_only)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_transaction).collect())
    }
}
