use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::users::user::CartLine;

#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn list_cart(&self, user_id: Uuid) -> anyhow::Result<Vec<CartLine>>;
    /// Cart lines for many users at once, as (user_id, line) pairs.
    async fn list_carts_for(&self, user_ids: &[Uuid]) -> anyhow::Result<Vec<(Uuid, CartLine)>>;
    /// Returns false when the book was already in the cart.
    async fn add_item(&self, user_id: Uuid, book_id: Uuid) -> anyhow::Result<bool>;
    async fn remove_items(&self, user_id: Uuid, book_ids: &[Uuid]) -> anyhow::Result<u64>;
}
