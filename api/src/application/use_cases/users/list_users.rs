use std::collections::HashMap;

use uuid::Uuid;

use crate::application::ports::cart_repository::CartRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::{CartLine, User};

pub struct ListUsers<'a, U, C>
where
    U: UserRepository + ?Sized,
    C: CartRepository + ?Sized,
{
    pub users: &'a U,
    pub carts: &'a C,
}

impl<'a, U, C> ListUsers<'a, U, C>
where
    U: UserRepository + ?Sized,
    C: CartRepository + ?Sized,
{
    pub async fn execute(&self) -> anyhow::Result<Vec<(User, Vec<CartLine>)>> {
        let users = self.users.list_users().await?;
        let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
        let mut carts: HashMap<Uuid, Vec<CartLine>> = HashMap::new();
        for (user_id, line) in self.carts.list_carts_for(&ids).await? {
            carts.entry(user_id).or_default().push(line);
        }
        Ok(users
            .into_iter()
            .map(|u| {
                let cart = carts.remove(&u.id).unwrap_or_default();
                (u, cart)
            })
            .collect())
    }
}
