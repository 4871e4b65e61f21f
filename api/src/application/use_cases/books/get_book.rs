use uuid::Uuid;

use super::BookError;
use crate::application::ports::book_repository::BookRepository;
use crate::domain::books::book::Book;

pub struct GetBook<'a, R: BookRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BookRepository + ?Sized> GetBook<'a, R> {
    pub async fn execute(&self, id: Uuid) -> Result<Book, BookError> {
        self.repo.get(id).await?.ok_or(BookError::NotFound)
    }
}
