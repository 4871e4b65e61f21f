use uuid::Uuid;

use super::OrderError;
use crate::application::ports::book_repository::BookRepository;
use crate::application::ports::drive_access_port::DriveAccessPort;
use crate::application::ports::order_repository::{OrderRepository, SettleOutcome};
use crate::application::ports::transaction_repository::TransactionRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::fulfillment::OrderFulfillment;
use crate::application::services::payments::normalize_utr;
use crate::domain::orders::order::{Order, PAYMENT_ID_MANUAL};

/// Admin marks an order paid after checking the bank statement by hand.
pub struct ConfirmPayment<'a, O, T, U, B, D>
where
    O: OrderRepository + ?Sized,
    T: TransactionRepository + ?Sized,
    U: UserRepository + ?Sized,
    B: BookRepository + ?Sized,
    D: DriveAccessPort + ?Sized,
{
    pub orders: &'a O,
    pub transactions: &'a T,
    pub users: &'a U,
    pub books: &'a B,
    pub drive: &'a D,
}

impl<'a, O, T, U, B, D> ConfirmPayment<'a, O, T, U, B, D>
where
    O: OrderRepository + ?Sized,
    T: TransactionRepository + ?Sized,
    U: UserRepository + ?Sized,
    B: BookRepository + ?Sized,
    D: DriveAccessPort + ?Sized,
{
    pub async fn execute(&self, order_id: Uuid, utr: Option<&str>) -> Result<Order, OrderError> {
        let order = self
            .orders
            .get(order_id)
            .await?
            .ok_or(OrderError::NotFound)?;
        if order.is_paid {
            return Err(OrderError::AlreadyPaid);
        }

        let utr = utr.map(normalize_utr).filter(|u| !u.is_empty());
        let mut transaction_id = None;
        if let Some(utr) = utr.as_deref() {
            if let Some(txn) = self.transactions.find_by_utr(utr).await? {
                if txn.is_used {
                    return Err(OrderError::TransactionUsed);
                }
                if txn.amount != order.total_price {
                    return Err(OrderError::AmountMismatch);
                }
                transaction_id = Some(txn.id);
            }
        }
        let payment_id = utr.as_deref().unwrap_or(PAYMENT_ID_MANUAL);

        let fulfillment = OrderFulfillment {
            orders: self.orders,
            users: self.users,
            books: self.books,
            drive: self.drive,
        };
        match fulfillment
            .settle(order.id, payment_id, transaction_id)
            .await?
        {
            SettleOutcome::Settled(paid) => {
                tracing::info!(order_id = %paid.id, payment_id, "payment_confirmed_by_admin");
                Ok(paid)
            }
            SettleOutcome::OrderNotFound => Err(OrderError::NotFound),
            SettleOutcome::OrderAlreadyPaid => Err(OrderError::AlreadyPaid),
            SettleOutcome::TransactionAlreadyUsed => Err(OrderError::TransactionUsed),
        }
    }
}
