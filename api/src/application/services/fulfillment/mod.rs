use uuid::Uuid;

use crate::application::ports::book_repository::BookRepository;
use crate::application::ports::drive_access_port::DriveAccessPort;
use crate::application::ports::order_repository::{OrderRepository, SettleOutcome};
use crate::application::ports::user_repository::UserRepository;
use crate::domain::orders::order::Order;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrantReport {
    pub granted: Vec<Uuid>,
    pub failed: Vec<Uuid>,
    /// Books that no longer exist or carry no Drive file.
    pub skipped: Vec<Uuid>,
}

/// Settles paid orders and delivers their books through Drive grants.
pub struct OrderFulfillment<'a, O, U, B, D>
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

impl<'a, O, U, B, D> OrderFulfillment<'a, O, U, B, D>
where
    O: OrderRepository + ?Sized,
    U: UserRepository + ?Sized,
    B: BookRepository + ?Sized,
    D: DriveAccessPort + ?Sized,
{
    /// Marks the order paid, then grants access. Grant failures are logged and
    /// leave the payment in place; the returned order reflects what was granted.
    pub async fn settle(
        &self,
        order_id: Uuid,
        payment_id: &str,
        transaction_id: Option<Uuid>,
    ) -> anyhow::Result<SettleOutcome> {
        let outcome = self
            .orders
            .settle(order_id, payment_id, transaction_id)
            .await?;
        let SettleOutcome::Settled(mut order) = outcome else {
            tracing::warn!(order_id = %order_id, payment_id, outcome = ?outcome, "settlement_rejected");
            return Ok(outcome);
        };
        tracing::info!(order_id = %order.id, payment_id, total = order.total_price, "order_settled");
        match self.grant_pending(&order).await {
            Ok(report) => {
                for item in order.items.iter_mut() {
                    if report.granted.contains(&item.book_id) {
                        item.access_granted = true;
                    }
                }
            }
            Err(err) => {
                tracing::error!(order_id = %order.id, error = ?err, "access_grant_failed");
            }
        }
        Ok(SettleOutcome::Settled(order))
    }

    pub async fn grant_pending(&self, order: &Order) -> anyhow::Result<GrantReport> {
        anyhow::ensure!(order.is_paid, "order {} is not paid", order.id);
        let buyer = self
            .users
            .find_by_id(order.user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("buyer {} not found", order.user_id))?;

        let pending: Vec<Uuid> = order.pending_grants().map(|i| i.book_id).collect();
        let mut report = GrantReport::default();
        if pending.is_empty() {
            return Ok(report);
        }
        let books = self.books.get_many(&pending).await?;

        for book_id in pending {
            let file_id = books
                .iter()
                .find(|b| b.id == book_id)
                .map(|b| b.google_drive_file_id.trim())
                .filter(|f| !f.is_empty());
            let Some(file_id) = file_id else {
                tracing::warn!(order_id = %order.id, book_id = %book_id, "no_drive_file_for_item");
                report.skipped.push(book_id);
                continue;
            };
            match self.drive.grant_reader(file_id, &buyer.email).await {
                Ok(()) => match self.orders.mark_item_granted(order.id, book_id).await {
                    Ok(()) => {
                        tracing::info!(order_id = %order.id, book_id = %book_id, email = %buyer.email, "drive_access_granted");
                        report.granted.push(book_id);
                    }
                    Err(err) => {
                        // Drive already shared the file; a retry re-grants idempotently.
                        tracing::error!(order_id = %order.id, book_id = %book_id, error = ?err, "drive_grant_not_recorded");
                        report.failed.push(book_id);
                    }
                },
                Err(err) => {
                    tracing::warn!(order_id = %order.id, book_id = %book_id, error = ?err, "drive_access_grant_failed");
                    report.failed.push(book_id);
                }
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{FakeDrive, MemStore};
    use crate::domain::orders::order::OrderItem;
    use crate::domain::users::user::Role;

    fn item(book_id: Uuid, title: &str, price: i64) -> OrderItem {
        OrderItem {
            book_id,
            title: title.into(),
            price,
            cover_image: None,
            access_granted: false,
        }
    }

    #[tokio::test]
    async fn unrecorded_grant_is_reported_and_remaining_items_continue() {
        let store = MemStore::new();
        let drive = FakeDrive::default();
        let buyer = store.seed_user("reader@example.com", Role::Customer);
        let dune = store.seed_book("Dune", 49_900, "drive-dune");
        let emma = store.seed_book("Emma", 10_000, "drive-emma");
        let order = store.seed_order(
            buyer.id,
            &[item(dune.id, "Dune", 49_900), item(emma.id, "Emma", 10_000)],
            59_900,
        );
        store.fail_grant_marks();
        let fulfillment = OrderFulfillment {
            orders: &store,
            users: &store,
            books: &store,
            drive: &drive,
        };

        let outcome = fulfillment.settle(order.id, "MANUAL", None).await.unwrap();
        let SettleOutcome::Settled(settled) = outcome else {
            panic!("expected settlement, got {outcome:?}");
        };
        assert!(settled.is_paid);
        assert!(settled.items.iter().all(|i| !i.access_granted));
        assert_eq!(drive.grants().len(), 2);

        let report = fulfillment.grant_pending(&settled).await.unwrap();
        assert!(report.granted.is_empty());
        assert_eq!(report.failed, vec![dune.id, emma.id]);
    }
}
