pub mod add_to_cart;
pub mod get_profile;
pub mod get_user;
pub mod list_users;
pub mod remove_from_cart;

#[derive(thiserror::Error, Debug)]
pub enum UserError {
    #[error("User not found")]
    NotFound,
    #[error("Book not found")]
    BookNotFound,
    #[error("Item already in cart")]
    AlreadyInCart,
    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}
