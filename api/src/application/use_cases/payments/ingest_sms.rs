use super::ingest_transaction::{IngestError, IngestOutcome, IngestTransaction};
use crate::application::ports::book_repository::BookRepository;
use crate::application::ports::drive_access_port::DriveAccessPort;
use crate::application::ports::order_repository::OrderRepository;
use crate::application::ports::transaction_repository::TransactionRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::payments::parse_payment_sms;
use crate::domain::payments::transaction::NewTransaction;

#[derive(Debug, Clone)]
pub enum SmsOutcome {
    NotPaymentSms,
    Ingested(IngestOutcome),
}

/// Entry point for SMS forwarded by the phone bot.
pub struct IngestSms<'a, T, O, U, B, D>
where
    T: TransactionRepository + ?Sized,
    O: OrderRepository + ?Sized,
    U: UserRepository + ?Sized,
    B: BookRepository + ?Sized,
    D: DriveAccessPort + ?Sized,
{
    pub inner: IngestTransaction<'a, T, O, U, B, D>,
}

impl<'a, T, O, U, B, D> IngestSms<'a, T, O, U, B, D>
where
    T: TransactionRepository + ?Sized,
    O: OrderRepository + ?Sized,
    U: UserRepository + ?Sized,
    B: BookRepository + ?Sized,
    D: DriveAccessPort + ?Sized,
{
    pub async fn execute(
        &self,
        sms_body: &str,
        sender: Option<&str>,
    ) -> Result<SmsOutcome, IngestError> {
        tracing::debug!(sender = ?sender, "sms_received");
        let Some(parsed) = parse_payment_sms(sms_body) else {
            return Ok(SmsOutcome::NotPaymentSms);
        };
        let new_txn = NewTransaction {
            utr: parsed.utr,
            amount: parsed.amount,
            sender: sender.map(str::to_string),
            raw_message: Some(sms_body.to_string()),
        };
        match self.inner.execute(new_txn).await {
            Ok(outcome) => Ok(SmsOutcome::Ingested(outcome)),
            // Parsed digits outside the accepted UTR shape are not payments we can match.
            Err(IngestError::InvalidUtr(_)) | Err(IngestError::InvalidAmount) => {
                Ok(SmsOutcome::NotPaymentSms)
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::order_repository::OrderRepository;
    use crate::application::testing::{FakeDrive, MemStore};
    use crate::domain::orders::order::{Order, OrderItem, PAYMENT_METHOD_UPI_MANUAL};
    use crate::domain::users::user::Role;

    const SMS: &str = "Rs.499.00 credited to a/c XX1234 on 19-10-26 by UPI Ref No 629412345678. -Bank";

    async fn order_with_proof(store: &MemStore, total: i64, proof: &str) -> Order {
        let user = store.seed_user(&format!("{proof}@example.com"), Role::Customer);
        let book = store.seed_book(&format!("Book {proof}"), total, &format!("drive-{proof}"));
        let order = store.seed_order(
            user.id,
            &[OrderItem {
                book_id: book.id,
                title: book.title.clone(),
                price: total,
                cover_image: None,
                access_granted: false,
            }],
            total,
        );
        store
            .set_payment_proof(order.id, proof, PAYMENT_METHOD_UPI_MANUAL)
            .await
            .unwrap()
            .unwrap()
    }

    fn ingest<'a>(
        store: &'a MemStore,
        drive: &'a FakeDrive,
    ) -> IngestSms<'a, MemStore, MemStore, MemStore, MemStore, FakeDrive> {
        IngestSms {
            inner: IngestTransaction {
                transactions: store,
                orders: store,
                users: store,
                books: store,
                drive,
            },
        }
    }

    #[tokio::test]
    async fn matching_sms_settles_the_order() {
        let store = MemStore::new();
        let drive = FakeDrive::default();
        let order = order_with_proof(&store, 49_900, "5678").await;

        let outcome = ingest(&store, &drive).execute(SMS, Some("VM-BANK")).await.unwrap();
        let SmsOutcome::Ingested(outcome) = outcome else {
            panic!("expected ingestion");
        };
        assert!(!outcome.duplicate);
        assert_eq!(outcome.transaction.utr, "629412345678");
        assert_eq!(outcome.transaction.amount, 49_900);
        assert!(outcome.transaction.is_used);
        let paid = outcome.matched_order.expect("order settled");
        assert_eq!(paid.id, order.id);
        assert_eq!(paid.payment_id.as_deref(), Some("629412345678"));
        assert!(paid.items[0].access_granted);
        assert_eq!(drive.grants().len(), 1);
    }

    #[tokio::test]
    async fn oldest_matching_order_wins() {
        let store = MemStore::new();
        let drive = FakeDrive::default();
        let first = order_with_proof(&store, 49_900, "5678").await;
        let second = order_with_proof(&store, 49_900, "345678").await;

        let SmsOutcome::Ingested(outcome) = ingest(&store, &drive).execute(SMS, None).await.unwrap()
        else {
            panic!("expected ingestion");
        };
        assert_eq!(outcome.matched_order.map(|o| o.id), Some(first.id));
        assert!(!store.order(second.id).unwrap().is_paid);
    }

    #[tokio::test]
    async fn unmatched_credit_is_kept_for_later() {
        let store = MemStore::new();
        let drive = FakeDrive::default();
        let order = order_with_proof(&store, 50_000, "5678").await;

        let SmsOutcome::Ingested(outcome) = ingest(&store, &drive).execute(SMS, None).await.unwrap()
        else {
            panic!("expected ingestion");
        };
        assert!(outcome.matched_order.is_none());
        assert!(!outcome.transaction.is_used);
        assert!(!store.order(order.id).unwrap().is_paid);
        assert_eq!(store.transaction_count(), 1);
    }

    #[tokio::test]
    async fn replayed_sms_cannot_pay_twice() {
        let store = MemStore::new();
        let drive = FakeDrive::default();
        order_with_proof(&store, 49_900, "5678").await;
        let late = ingest(&store, &drive);
        late.execute(SMS, None).await.unwrap();

        let second = order_with_proof(&store, 49_900, "345678").await;
        let SmsOutcome::Ingested(outcome) = late.execute(SMS, None).await.unwrap() else {
            panic!("expected ingestion");
        };
        assert!(outcome.duplicate);
        assert!(outcome.matched_order.is_none());
        assert!(!store.order(second.id).unwrap().is_paid);
        assert_eq!(store.transaction_count(), 1);
    }

    #[tokio::test]
    async fn unrelated_text_is_not_a_payment() {
        let store = MemStore::new();
        let drive = FakeDrive::default();
        let outcome = ingest(&store, &drive)
            .execute("Your OTP is 123456. Do not share it.", None)
            .await
            .unwrap();
        assert!(matches!(outcome, SmsOutcome::NotPaymentSms));
        assert_eq!(store.transaction_count(), 0);
    }
}
