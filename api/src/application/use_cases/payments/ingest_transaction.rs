use crate::application::ports::book_repository::BookRepository;
use crate::application::ports::drive_access_port::DriveAccessPort;
use crate::application::ports::order_repository::{OrderRepository, SettleOutcome};
use crate::application::ports::transaction_repository::TransactionRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::fulfillment::OrderFulfillment;
use crate::application::services::payments::{
    ProofError, pick_order_for_transaction, validate_payment_proof,
};
use crate::domain::orders::order::Order;
use crate::domain::payments::transaction::{NewTransaction, Transaction};

#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub transaction: Transaction,
    /// The UTR was already recorded and consumed; nothing was done.
    pub duplicate: bool,
    pub matched_order: Option<Order>,
}

#[derive(thiserror::Error, Debug)]
pub enum IngestError {
    #[error("Invalid UTR: {0}")]
    InvalidUtr(#[source] ProofError),
    #[error("Amount must be positive")]
    InvalidAmount,
    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

/// Records a bank credit and settles the pending order it pays for, if any.
pub struct IngestTransaction<'a, T, O, U, B, D>
where
    T: TransactionRepository + ?Sized,
    O: OrderRepository + ?Sized,
    U: UserRepository + ?Sized,
    B: BookRepository + ?Sized,
    D: DriveAccessPort + ?Sized,
{
    pub transactions: &'a T,
    pub orders: &'a O,
    pub users: &'a U,
    pub books: &'a B,
    pub drive: &'a D,
}

impl<'a, T, O, U, B, D> IngestTransaction<'a, T, O, U, B, D>
where
    T: TransactionRepository + ?Sized,
    O: OrderRepository + ?Sized,
    U: UserRepository + ?Sized,
    B: BookRepository + ?Sized,
    D: DriveAccessPort + ?Sized,
{
    pub async fn execute(&self, new_txn: NewTransaction) -> Result<IngestOutcome, IngestError> {
        let utr = validate_payment_proof(&new_txn.utr).map_err(IngestError::InvalidUtr)?;
        if new_txn.amount <= 0 {
            return Err(IngestError::InvalidAmount);
        }
        let new_txn = NewTransaction { utr, ..new_txn };

        let (mut txn, inserted) = self.transactions.insert_or_get(&new_txn).await?;
        if !inserted {
            if txn.is_used {
                tracing::info!(utr = %txn.utr, order_id = ?txn.order_id, "duplicate_utr_ignored");
                return Ok(IngestOutcome {
                    transaction: txn,
                    duplicate: true,
                    matched_order: None,
                });
            }
            if txn.amount != new_txn.amount {
                tracing::warn!(utr = %txn.utr, stored = txn.amount, reported = new_txn.amount, "utr_amount_conflict");
            }
        } else {
            tracing::info!(utr = %txn.utr, amount = txn.amount, sender = ?txn.sender, "transaction_recorded");
        }

        let candidates = self.orders.list_pending_with_proof(txn.amount).await?;
        let Some(order) = pick_order_for_transaction(&txn, &candidates) else {
            tracing::info!(utr = %txn.utr, amount = txn.amount, "no_matching_pending_order");
            return Ok(IngestOutcome {
                transaction: txn,
                duplicate: false,
                matched_order: None,
            });
        };

        let fulfillment = OrderFulfillment {
            orders: self.orders,
            users: self.users,
            books: self.books,
            drive: self.drive,
        };
        let utr = txn.utr.clone();
        let matched_order = match fulfillment.settle(order.id, &utr, Some(txn.id)).await? {
            SettleOutcome::Settled(paid) => {
                txn.is_used = true;
                txn.order_id = Some(paid.id);
                Some(paid)
            }
            _ => None,
        };
        Ok(IngestOutcome {
            transaction: txn,
            duplicate: false,
            matched_order,
        })
    }
}
