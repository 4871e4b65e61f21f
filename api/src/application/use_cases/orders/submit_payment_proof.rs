use uuid::Uuid;

use super::OrderError;
use crate::application::ports::book_repository::BookRepository;
use crate::application::ports::drive_access_port::DriveAccessPort;
use crate::application::ports::order_repository::{OrderRepository, SettleOutcome};
use crate::application::ports::transaction_repository::TransactionRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::fulfillment::OrderFulfillment;
use crate::application::services::payments::{pick_transaction_for_order, validate_payment_proof};
use crate::domain::orders::order::{Order, PAYMENT_METHOD_UPI_MANUAL};

pub struct SubmitPaymentProof<'a, O, T, U, B, D>
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

impl<'a, O, T, U, B, D> SubmitPaymentProof<'a, O, T, U, B, D>
where
    O: OrderRepository + ?Sized,
    T: TransactionRepository + ?Sized,
    U: UserRepository + ?Sized,
    B: BookRepository + ?Sized,
    D: DriveAccessPort + ?Sized,
{
    /// Stores the customer's UTR. If the matching bank credit has already been
    /// reported, the order is settled right away; otherwise it waits for the SMS.
    pub async fn execute(
        &self,
        user_id: Uuid,
        order_id: Uuid,
        raw_proof: &str,
    ) -> Result<Order, OrderError> {
        let order = self
            .orders
            .get(order_id)
            .await?
            .filter(|o| o.is_owned_by(user_id))
            .ok_or(OrderError::NotFound)?;
        if order.is_paid {
            return Err(OrderError::AlreadyPaid);
        }
        let proof = validate_payment_proof(raw_proof)?;
        let updated = self
            .orders
            .set_payment_proof(order.id, &proof, PAYMENT_METHOD_UPI_MANUAL)
            .await?
            .ok_or(OrderError::NotFound)?;
        tracing::info!(order_id = %updated.id, user_id = %user_id, "payment_proof_submitted");

        let candidates = self
            .transactions
            .list_unused_by_amount(updated.total_price)
            .await?;
        let Some(txn) = pick_transaction_for_order(&updated, &candidates) else {
            return Ok(updated);
        };

        let fulfillment = OrderFulfillment {
            orders: self.orders,
            users: self.users,
            books: self.books,
            drive: self.drive,
        };
        match fulfillment.settle(updated.id, &txn.utr, Some(txn.id)).await? {
            SettleOutcome::Settled(paid) => Ok(paid),
            // Lost a race with another settlement; report current state.
            _ => Ok(self
                .orders
                .get(updated.id)
                .await?
                .ok_or(OrderError::NotFound)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{FakeDrive, MemStore};
    use crate::domain::books::book::Book;
    use crate::domain::orders::order::OrderItem;
    use crate::domain::users::user::{Role, User};

    fn item(book: &Book) -> OrderItem {
        OrderItem {
            book_id: book.id,
            title: book.title.clone(),
            price: book.selling_price,
            cover_image: None,
            access_granted: false,
        }
    }

    async fn setup(store: &MemStore) -> (User, Book, Order) {
        let user = store.seed_user("buyer@example.com", Role::Customer);
        let book = store.seed_book("Dune", 49_900, "drive-dune");
        let order = store.seed_order(user.id, &[item(&book)], 49_900);
        (user, book, order)
    }

    #[tokio::test]
    async fn stores_proof_and_waits_when_no_credit_reported() {
        let store = MemStore::new();
        let drive = FakeDrive::default();
        let (user, _, order) = setup(&store).await;
        let submit = SubmitPaymentProof {
            orders: &store,
            transactions: &store,
            users: &store,
            books: &store,
            drive: &drive,
        };

        let updated = submit.execute(user.id, order.id, " 4321 ").await.unwrap();
        assert_eq!(updated.payment_proof, "4321");
        assert_eq!(updated.payment_method.as_deref(), Some(PAYMENT_METHOD_UPI_MANUAL));
        assert!(!updated.is_paid);
        assert!(drive.grants().is_empty());
    }

    #[tokio::test]
    async fn settles_against_already_reported_credit() {
        let store = MemStore::new();
        let drive = FakeDrive::default();
        let (user, book, order) = setup(&store).await;
        store.seed_transaction("412345678901", 49_900);

        let paid = SubmitPaymentProof {
            orders: &store,
            transactions: &store,
            users: &store,
            books: &store,
            drive: &drive,
        }
        .execute(user.id, order.id, "8901")
        .await
        .unwrap();

        assert!(paid.is_paid);
        assert_eq!(paid.payment_id.as_deref(), Some("412345678901"));
        assert!(paid.items[0].access_granted);
        assert!(store.transaction("412345678901").unwrap().is_used);
        assert_eq!(store.book(book.id).unwrap().sales_count, 1);
        assert_eq!(
            drive.grants(),
            vec![("drive-dune".to_string(), "buyer@example.com".to_string())]
        );
    }

    #[tokio::test]
    async fn amount_mismatch_does_not_settle() {
        let store = MemStore::new();
        let drive = FakeDrive::default();
        let (user, _, order) = setup(&store).await;
        store.seed_transaction("412345678901", 49_800);

        let updated = SubmitPaymentProof {
            orders: &store,
            transactions: &store,
            users: &store,
            books: &store,
            drive: &drive,
        }
        .execute(user.id, order.id, "8901")
        .await
        .unwrap();
        assert!(!updated.is_paid);
        assert!(!store.transaction("412345678901").unwrap().is_used);
    }

    #[tokio::test]
    async fn rejects_strangers_paid_orders_and_bad_proofs() {
        let store = MemStore::new();
        let drive = FakeDrive::default();
        let (user, _, order) = setup(&store).await;
        let stranger = store.seed_user("other@example.com", Role::Customer);
        let submit = SubmitPaymentProof {
            orders: &store,
            transactions: &store,
            users: &store,
            books: &store,
            drive: &drive,
        };

        let err = submit.execute(stranger.id, order.id, "4321").await.unwrap_err();
        assert!(matches!(err, OrderError::NotFound));

        let err = submit.execute(user.id, order.id, "12a4").await.unwrap_err();
        assert!(matches!(err, OrderError::InvalidProof(_)));

        store.settle(order.id, "MANUAL", None).await.unwrap();
        let err = submit.execute(user.id, order.id, "4321").await.unwrap_err();
        assert!(matches!(err, OrderError::AlreadyPaid));
    }
}
