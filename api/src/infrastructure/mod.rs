pub mod db;
pub mod drive;
pub mod storage;
