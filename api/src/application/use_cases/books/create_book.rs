use uuid::Uuid;

use super::BookError;
use crate::application::ports::book_repository::BookRepository;
use crate::domain::books::book::{Book, BookDraft};

pub struct CreateBook<'a, R: BookRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BookRepository + ?Sized> CreateBook<'a, R> {
    pub async fn execute(&self, admin_id: Uuid, draft: &BookDraft) -> Result<Book, BookError> {
        draft.validate()?;
        let book = self.repo.create(draft, admin_id).await?;
        tracing::info!(book_id = %book.id, admin_id = %admin_id, "book_created");
        Ok(book)
    }
}
