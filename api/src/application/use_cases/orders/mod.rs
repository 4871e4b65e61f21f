pub mod confirm_payment;
pub mod create_order;
pub mod get_order;
pub mod list_my_orders;
pub mod list_orders;
pub mod retry_grants;
pub mod submit_payment_proof;

use crate::application::services::payments::ProofError;

#[derive(thiserror::Error, Debug)]
pub enum OrderError {
    #[error("Order not found")]
    NotFound,
    #[error("No items in cart")]
    EmptyCart,
    #[error("Order already paid")]
    AlreadyPaid,
    #[error("Order is not paid")]
    NotPaid,
    #[error(transparent)]
    InvalidProof(#[from] ProofError),
    #[error("Transaction already used")]
    TransactionUsed,
    #[error("Transaction amount does not match order total")]
    AmountMismatch,
    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}
