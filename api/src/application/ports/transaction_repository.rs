use async_trait::async_trait;

use crate::domain::payments::transaction::{NewTransaction, Transaction};

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Inserts unless the UTR is already known. The bool is true when a row was created.
    async fn insert_or_get(&self, new_txn: &NewTransaction) -> anyhow::Result<(Transaction, bool)>;
    async fn find_by_utr(&self, utr: &str) -> anyhow::Result<Option<Transaction>>;
    /// Unused transactions with the given amount, oldest first.
    async fn list_unused_by_amount(&self, amount: i64) -> anyhow::Result<Vec<Transaction>>;
    async fn list(&self, unused_only: bool) -> anyhow::Result<Vec<Transaction>>;
}
