pub mod books;
pub mod downloads;
pub mod orders;
pub mod payments;
pub mod settings;
pub mod users;
