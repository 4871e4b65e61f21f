use uuid::Uuid;

use super::{BookError, RELATED_BOOKS_LIMIT};
use crate::application::ports::book_repository::BookRepository;
use crate::domain::books::book::Book;

pub struct RelatedBooks<'a, R: BookRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BookRepository + ?Sized> RelatedBooks<'a, R> {
    pub async fn execute(&self, id: Uuid) -> Result<Vec<Book>, BookError> {
        let book = self.repo.get(id).await?.ok_or(BookError::NotFound)?;
        Ok(self
            .repo
            .related(book.id, &book.category, RELATED_BOOKS_LIMIT)
            .await?)
    }
}
