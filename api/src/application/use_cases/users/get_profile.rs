use uuid::Uuid;

use super::UserError;
use crate::application::ports::cart_repository::CartRepository;
use crate::application::ports::order_repository::OrderRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::orders::order::Order;
use crate::domain::users::user::{CartLine, User};

pub struct Profile {
    pub user: User,
    pub cart: Vec<CartLine>,
    pub orders: Vec<Order>,
}

pub struct GetProfile<'a, U, C, O>
where
    U: UserRepository + ?Sized,
    C: CartRepository + ?Sized,
    O: OrderRepository + ?Sized,
{
    pub users: &'a U,
    pub carts: &'a C,
    pub orders: &'a O,
}

impl<'a, U, C, O> GetProfile<'a, U, C, O>
where
    U: UserRepository + ?Sized,
    C: CartRepository + ?Sized,
    O: OrderRepository + ?Sized,
{
    pub async fn execute(&self, user_id: Uuid) -> Result<Profile, UserError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound)?;
        let cart = self.carts.list_cart(user_id).await?;
        let orders = self.orders.list_for_user(user_id).await?;
        Ok(Profile { user, cart, orders })
    }
}
