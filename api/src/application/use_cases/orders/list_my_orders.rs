use uuid::Uuid;

use crate::application::ports::order_repository::OrderRepository;
use crate::domain::orders::order::Order;

pub struct ListMyOrders<'a, O: OrderRepository + ?Sized> {
    pub orders: &'a O,
}

impl<'a, O: OrderRepository + ?Sized> ListMyOrders<'a, O> {
    pub async fn execute(&self, user_id: Uuid) -> anyhow::Result<Vec<Order>> {
        self.orders.list_for_user(user_id).await
    }
}
