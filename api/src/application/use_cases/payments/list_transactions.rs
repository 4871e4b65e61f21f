use crate::application::ports::transaction_repository::TransactionRepository;
use crate::domain::payments::transaction::Transaction;

pub struct ListTransactions<'a, T: TransactionRepository + ?Sized> {
    pub transactions: &'a T,
}

impl<'a, T: TransactionRepository + ?Sized> ListTransactions<'a, T> {
    pub async fn execute(&self, unused_only: bool) -> anyhow::Result<Vec<Transaction>> {
        self.transactions.list(unused_only).await
    }
}
