use uuid::Uuid;

use super::OrderError;
use crate::application::ports::book_repository::BookRepository;
use crate::application::ports::drive_access_port::DriveAccessPort;
use crate::application::ports::order_repository::OrderRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::fulfillment::{GrantReport, OrderFulfillment};
use crate::domain::orders::order::Order;

pub struct RetryGrants<'a, O, U, B, D>
where
    O: OrderRepository + ?Sized,
    U: UserRepository + ?Sized,
    B: BookRepository + ?Sized,
    D: DriveAccessPort + ?Sized,
{
    pub orders: &'a O,
    pub users: &'a U,
    pub books: &'a B,
    pub drive: &'a D,
}

impl<'a, O, U, B, D> RetryGrants<'a, O, U, B, D>
where
    O: OrderRepository + ?Sized,
    U: UserRepository + ?Sized,
    B: BookRepository + ?Sized,
    D: DriveAccessPort + ?Sized,
{
    pub async fn execute(&self, order_id: Uuid) -> Result<(Order, GrantReport), OrderError> {
        let order = self
            .orders
            .get(order_id)
            .await?
            .ok_or(OrderError::NotFound)?;
        if !order.is_paid {
            return Err(OrderError::NotPaid);
        }
        let report = OrderFulfillment {
            orders: self.orders,
            users: self.users,
            books: self.books,
            drive: self.drive,
        }
        .grant_pending(&order)
        .await?;
        let refreshed = self
            .orders
            .get(order_id)
            .await?
            .ok_or(OrderError::NotFound)?;
        Ok((refreshed, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::order_repository::SettleOutcome;
    use crate::application::testing::{FakeDrive, MemStore};
    use crate::domain::orders::order::OrderItem;
    use crate::domain::users::user::Role;

    #[tokio::test]
    async fn failed_grants_keep_payment_and_can_be_retried() {
        let store = MemStore::new();
        let user = store.seed_user("reader@example.com", Role::Customer);
        let ok = store.seed_book("Dune", 10_000, "drive-ok");
        let flaky = store.seed_book("Emma", 20_000, "drive-flaky");
        let items: Vec<OrderItem> = [&ok, &flaky]
            .iter()
            .map(|b| OrderItem {
                book_id: b.id,
                title: b.title.clone(),
                price: b.selling_price,
                cover_image: None,
                access_granted: false,
            })
            .collect();
        let order = store.seed_order(user.id, &items, 30_000);

        let failing = FakeDrive::failing_for(&["drive-flaky"]);
        let outcome = OrderFulfillment {
            orders: &store,
            users: &store,
            books: &store,
            drive: &failing,
        }
        .settle(order.id, "MANUAL", None)
        .await
        .unwrap();
        let SettleOutcome::Settled(paid) = outcome else {
            panic!("expected settlement, got {outcome:?}");
        };
        assert!(paid.is_paid);
        assert_eq!(paid.pending_grants().count(), 1);

        let healthy = FakeDrive::default();
        let (order, report) = RetryGrants {
            orders: &store,
            users: &store,
            books: &store,
            drive: &healthy,
        }
        .execute(order.id)
        .await
        .unwrap();
        assert_eq!(report.granted, vec![flaky.id]);
        assert!(report.failed.is_empty());
        assert_eq!(order.pending_grants().count(), 0);
        assert_eq!(healthy.grants().len(), 1);
    }

    #[tokio::test]
    async fn unpaid_orders_are_not_fulfilled() {
        let store = MemStore::new();
        let user = store.seed_user("reader@example.com", Role::Customer);
        let order = store.seed_order(user.id, &[], 0);
        let err = RetryGrants {
            orders: &store,
            users: &store,
            books: &store,
            drive: &FakeDrive::default(),
        }
        .execute(order.id)
        .await
        .unwrap_err();
        assert!(matches!(err, OrderError::NotPaid));
    }
}
