pub mod fulfillment;
pub mod payments;
