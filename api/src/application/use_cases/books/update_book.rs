use uuid::Uuid;

use super::BookError;
use crate::application::ports::book_repository::BookRepository;
use crate::domain::books::book::{Book, BookDraft};

pub struct UpdateBook<'a, R: BookRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BookRepository + ?Sized> UpdateBook<'a, R> {
    pub async fn execute(&self, id: Uuid, draft: &BookDraft) -> Result<Book, BookError> {
        draft.validate()?;
        self.repo
            .update(id, draft)
            .await?
            .ok_or(BookError::NotFound)
    }
}
