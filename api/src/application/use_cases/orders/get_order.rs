use std::collections::HashMap;

use uuid::Uuid;

use super::OrderError;
use crate::application::ports::book_repository::BookRepository;
use crate::application::ports::order_repository::OrderRepository;
use crate::domain::orders::order::Order;
use crate::domain::users::user::User;

pub struct OrderView {
    pub order: Order,
    /// Drive file per purchased book. Empty until the order is paid.
    pub drive_files: HashMap<Uuid, String>,
}

pub struct GetOrder<'a, O, B>
where
    O: OrderRepository + ?Sized,
    B: BookRepository + ?Sized,
{
    pub orders: &'a O,
    pub books: &'a B,
}

impl<'a, O, B> GetOrder<'a, O, B>
where
    O: OrderRepository + ?Sized,
    B: BookRepository + ?Sized,
{
    /// Orders are visible to their buyer and to admins only.
    pub async fn execute(&self, viewer: &User, id: Uuid) -> Result<OrderView, OrderError> {
        let order = self.orders.get(id).await?.ok_or(OrderError::NotFound)?;
        if !order.is_owned_by(viewer.id) && !viewer.is_admin() {
            return Err(OrderError::NotFound);
        }
        let mut drive_files = HashMap::new();
        if order.is_paid {
            let ids: Vec<Uuid> = order.items.iter().map(|i| i.book_id).collect();
            for book in self.books.get_many(&ids).await? {
                if !book.google_drive_file_id.trim().is_empty() {
                    drive_files.insert(book.id, book.google_drive_file_id);
                }
            }
        }
        Ok(OrderView { order, drive_files })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::MemStore;
    use crate::domain::orders::order::OrderItem;
    use crate::domain::users::user::Role;

    fn item(book: &crate::domain::books::book::Book) -> OrderItem {
        OrderItem {
            book_id: book.id,
            title: book.title.clone(),
            price: book.selling_price,
            cover_image: None,
            access_granted: false,
        }
    }

    #[tokio::test]
    async fn drive_files_appear_only_after_payment() {
        let store = MemStore::new();
        let buyer = store.seed_user("buyer@example.com", Role::Customer);
        let book = store.seed_book("Dune", 49_900, "drive-dune");
        let order = store.seed_order(buyer.id, &[item(&book)], 49_900);
        let uc = GetOrder {
            orders: &store,
            books: &store,
        };

        let view = uc.execute(&buyer, order.id).await.unwrap();
        assert!(view.drive_files.is_empty());

        OrderRepository::settle(&store, order.id, "MANUAL", None)
            .await
            .unwrap();
        let view = uc.execute(&buyer, order.id).await.unwrap();
        assert_eq!(view.drive_files.get(&book.id).map(String::as_str), Some("drive-dune"));
    }

    #[tokio::test]
    async fn strangers_cannot_see_orders_but_admins_can() {
        let store = MemStore::new();
        let buyer = store.seed_user("buyer@example.com", Role::Customer);
        let stranger = store.seed_user("other@example.com", Role::Customer);
        let admin = store.seed_user("admin@example.com", Role::Admin);
        let order = store.seed_order(buyer.id, &[], 0);
        let uc = GetOrder {
            orders: &store,
            books: &store,
        };

        let err = uc.execute(&stranger, order.id).await.err().unwrap();
        assert!(matches!(err, OrderError::NotFound));
        assert_eq!(uc.execute(&admin, order.id).await.unwrap().order.id, order.id);
    }
}
