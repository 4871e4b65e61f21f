use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::orders::order::{Order, OrderItem, OrderWithBuyer};

#[derive(Debug, Clone)]
pub enum SettleOutcome {
    Settled(Order),
    OrderNotFound,
    OrderAlreadyPaid,
    TransactionAlreadyUsed,
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(
        &self,
        user_id: Uuid,
        items: &[OrderItem],
        total_price: i64,
    ) -> anyhow::Result<Order>;
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Order>>;
    async fn list_all(&self) -> anyhow::Result<Vec<OrderWithBuyer>>;
    async fn list_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Order>>;
    async fn set_payment_proof(
        &self,
        id: Uuid,
        proof: &str,
        method: &str,
    ) -> anyhow::Result<Option<Order>>;
    /// Unpaid orders with the given total and a non-empty proof, oldest first.
    async fn list_pending_with_proof(&self, total_price: i64) -> anyhow::Result<Vec<Order>>;
    /// Marks the order paid and, when given, consumes the transaction, atomically.
    async fn settle(
        &self,
        order_id: Uuid,
        payment_id: &str,
        transaction_id: Option<Uuid>,
    ) -> anyhow::Result<SettleOutcome>;
    async fn mark_item_granted(&self, order_id: Uuid, book_id: Uuid) -> anyhow::Result<()>;
}
