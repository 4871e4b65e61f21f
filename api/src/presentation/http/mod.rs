pub mod admin;
pub mod auth;
pub mod books;
pub mod error;
pub mod health;
pub mod orders;
pub mod payments;
pub mod settings;
pub mod uploads;
pub mod users;
