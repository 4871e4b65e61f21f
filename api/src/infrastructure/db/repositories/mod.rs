pub mod book_repository_sqlx;
pub mod cart_repository_sqlx;
pub mod order_repository_sqlx;
pub mod sample_download_repository_sqlx;
pub mod settings_repository_sqlx;
pub mod stats_repository_sqlx;
pub mod transaction_repository_sqlx;
pub mod user_repository_sqlx;
