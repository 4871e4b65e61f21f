pub mod create_book;
pub mod delete_book;
pub mod get_book;
pub mod list_books;
pub mod record_sample_download;
pub mod related_books;
pub mod top_books;
pub mod update_book;

use crate::domain::books::book::BookValidationError;

pub const TOP_BOOKS_LIMIT: i64 = 3;
pub const RELATED_BOOKS_LIMIT: i64 = 3;

#[derive(thiserror::Error, Debug)]
pub enum BookError {
    #[error("Book not found")]
    NotFound,
    #[error("No sample available for this book")]
    NoSample,
    #[error(transparent)]
    Invalid(#[from] BookValidationError),
    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}
