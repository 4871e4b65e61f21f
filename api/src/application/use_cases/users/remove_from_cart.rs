use uuid::Uuid;

use crate::application::ports::cart_repository::CartRepository;
use crate::domain::users::user::CartLine;

pub struct RemoveFromCart<'a, C: CartRepository + ?Sized> {
    pub carts: &'a C,
}

impl<'a, C: CartRepository + ?Sized> RemoveFromCart<'a, C> {
    pub async fn execute(&self, user_id: Uuid, book_id: Uuid) -> anyhow::Result<Vec<CartLine>> {
        self.carts.remove_items(user_id, &[book_id]).await?;
        self.carts.list_cart(user_id).await
    }
}
