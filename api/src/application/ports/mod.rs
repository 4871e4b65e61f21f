pub mod book_repository;
pub mod cart_repository;
pub mod drive_access_port;
pub mod order_repository;
pub mod sample_download_repository;
pub mod settings_repository;
pub mod stats_repository;
pub mod storage_port;
pub mod transaction_repository;
pub mod user_repository;
