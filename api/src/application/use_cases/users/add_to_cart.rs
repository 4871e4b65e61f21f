use uuid::Uuid;

use super::UserError;
use crate::application::ports::book_repository::BookRepository;
use crate::application::ports::cart_repository::CartRepository;
use crate::domain::users::user::CartLine;

pub struct AddToCart<'a, C, B>
where
    C: CartRepository + ?Sized,
    B: BookRepository + ?Sized,
{
    pub carts: &'a C,
    pub books: &'a B,
}

impl<'a, C, B> AddToCart<'a, C, B>
where
    C: CartRepository + ?Sized,
    B: BookRepository + ?Sized,
{
    pub async fn execute(&self, user_id: Uuid, book_id: Uuid) -> Result<Vec<CartLine>, UserError> {
        if self.books.get(book_id).await?.is_none() {
            return Err(UserError::BookNotFound);
        }
        if !self.carts.add_item(user_id, book_id).await? {
            return Err(UserError::AlreadyInCart);
        }
        Ok(self.carts.list_cart(user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::MemStore;
    use crate::domain::users::user::Role;

    #[tokio::test]
    async fn second_add_of_same_book_is_rejected() {
        let store = MemStore::new();
        let user = store.seed_user("reader@example.com", Role::Customer);
        let book = store.seed_book("Dune", 49_900, "drive-dune");
        let add = AddToCart {
            carts: &store,
            books: &store,
        };

        let cart = add.execute(user.id, book.id).await.unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].qty, 1);

        let err = add.execute(user.id, book.id).await.unwrap_err();
        assert_eq!(err.to_string(), "Item already in cart");
        let err = add.execute(user.id, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, UserError::BookNotFound));
    }
}
