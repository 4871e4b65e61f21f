pub mod admin;
pub mod auth;
pub mod books;
pub mod files;
pub mod orders;
pub mod payments;
pub mod settings;
pub mod users;
