use uuid::Uuid;

use super::OrderError;
use crate::application::ports::book_repository::BookRepository;
use crate::application::ports::cart_repository::CartRepository;
use crate::application::ports::order_repository::OrderRepository;
use crate::domain::orders::order::{Order, OrderItem};

pub struct CreateOrder<'a, O, B, C>
where
    O: OrderRepository + ?Sized,
    B: BookRepository + ?Sized,
    C: CartRepository + ?Sized,
{
    pub orders: &'a O,
    pub books: &'a B,
    pub carts: &'a C,
}

impl<'a, O, B, C> CreateOrder<'a, O, B, C>
where
    O: OrderRepository + ?Sized,
    B: BookRepository + ?Sized,
    C: CartRepository + ?Sized,
{
    /// Checks out the given books, or the whole cart when none are given.
    /// Prices always come from the catalog.
    pub async fn execute(
        &self,
        user_id: Uuid,
        book_ids: Option<Vec<Uuid>>,
    ) -> Result<Order, OrderError> {
        let requested = match book_ids {
            Some(ids) if !ids.is_empty() => ids,
            _ => self
                .carts
                .list_cart(user_id)
                .await?
                .into_iter()
                .map(|l| l.book.id)
                .collect(),
        };
        let mut ids: Vec<Uuid> = Vec::with_capacity(requested.len());
        for id in requested {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        if ids.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let books = self.books.get_many(&ids).await?;
        let items: Vec<OrderItem> = ids
            .iter()
            .filter_map(|id| books.iter().find(|b| b.id == *id))
            .map(|b| OrderItem {
                book_id: b.id,
                title: b.title.clone(),
                price: b.selling_price,
                cover_image: Some(b.cover_image.clone()).filter(|c| !c.is_empty()),
                access_granted: false,
            })
            .collect();
        if items.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        let total = items
            .iter()
            .try_fold(0i64, |acc, i| acc.checked_add(i.price))
            .ok_or_else(|| anyhow::anyhow!("order total overflow"))?;

        let order = self.orders.create(user_id, &items, total).await?;
        let purchased: Vec<Uuid> = items.iter().map(|i| i.book_id).collect();
        self.carts.remove_items(user_id, &purchased).await?;
        tracing::info!(order_id = %order.id, user_id = %user_id, items = items.len(), total, "order_created");
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::cart_repository::CartRepository;
    use crate::application::testing::MemStore;
    use crate::domain::users::user::Role;

    #[tokio::test]
    async fn checks_out_cart_with_catalog_prices() {
        let store = MemStore::new();
        let user = store.seed_user("buyer@example.com", Role::Customer);
        let a = store.seed_book("Dune", 49_900, "drive-a");
        let b = store.seed_book("Emma", 19_900, "drive-b");
        store.add_item(user.id, a.id).await.unwrap();
        store.add_item(user.id, b.id).await.unwrap();

        let order = CreateOrder {
            orders: &store,
            books: &store,
            carts: &store,
        }
        .execute(user.id, None)
        .await
        .unwrap();

        assert_eq!(order.total_price, 69_800);
        assert_eq!(order.items.len(), 2);
        assert!(order.items.iter().all(|i| !i.access_granted));
        assert!(!order.is_paid);
        assert!(store.list_cart(user.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn explicit_ids_are_deduplicated_and_leave_rest_of_cart() {
        let store = MemStore::new();
        let user = store.seed_user("buyer@example.com", Role::Customer);
        let a = store.seed_book("Dune", 49_900, "drive-a");
        let b = store.seed_book("Emma", 19_900, "drive-b");
        store.add_item(user.id, a.id).await.unwrap();
        store.add_item(user.id, b.id).await.unwrap();

        let order = CreateOrder {
            orders: &store,
            books: &store,
            carts: &store,
        }
        .execute(user.id, Some(vec![a.id, a.id, Uuid::new_v4()]))
        .await
        .unwrap();

        assert_eq!(order.items.len(), 1);
        assert_eq!(order.total_price, 49_900);
        let cart = store.list_cart(user.id).await.unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].book.id, b.id);
    }

    #[tokio::test]
    async fn empty_cart_is_rejected() {
        let store = MemStore::new();
        let user = store.seed_user("buyer@example.com", Role::Customer);
        let create = CreateOrder {
            orders: &store,
            books: &store,
            carts: &store,
        };
        let err = create.execute(user.id, None).await.unwrap_err();
        assert!(matches!(err, OrderError::EmptyCart));
        let err = create
            .execute(user.id, Some(vec![Uuid::new_v4()]))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No items in cart");
    }
}
