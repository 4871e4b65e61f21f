use uuid::Uuid;

use super::UserError;
use super::get_profile::{GetProfile, Profile};
use crate::application::ports::cart_repository::CartRepository;
use crate::application::ports::order_repository::OrderRepository;
use crate::application::ports::sample_download_repository::SampleDownloadRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::downloads::sample_download::SampleDownload;

pub struct UserDetail {
    pub profile: Profile,
    pub sample_downloads: Vec<SampleDownload>,
}

/// Admin view of a customer.
pub struct GetUser<'a, U, C, O, S>
where
    U: UserRepository + ?Sized,
    C: CartRepository + ?Sized,
    O: OrderRepository + ?Sized,
    S: SampleDownloadRepository + ?Sized,
{
    pub users: &'a U,
    pub carts: &'a C,
    pub orders: &'a O,
    pub downloads: &'a S,
}

impl<'a, U, C, O, S> GetUser<'a, U, C, O, S>
where
    U: UserRepository + ?Sized,
    C: CartRepository + ?Sized,
    O: OrderRepository + ?Sized,
    S: SampleDownloadRepository + ?Sized,
{
    pub async fn execute(&self, user_id: Uuid) -> Result<UserDetail, UserError> {
        let profile = GetProfile {
            users: self.users,
            carts: self.carts,
            orders: self.orders,
        }
        .execute(user_id)
        .await?;
        let sample_downloads = self.downloads.list_for_user(user_id).await?;
        Ok(UserDetail {
            profile,
            sample_downloads,
        })
    }
}
