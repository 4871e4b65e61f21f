use crate::application::ports::order_repository::OrderRepository;
use crate::domain::orders::order::OrderWithBuyer;

pub struct ListOrders<'a, O: OrderRepository + ?Sized> {
    pub orders: &'a O,
}

impl<'a, O: OrderRepository + ?Sized> ListOrders<'a, O> {
    pub async fn execute(&self) -> anyhow::Result<Vec<OrderWithBuyer>> {
        self.orders.list_all().await
    }
}
