use uuid::Uuid;

use super::BookError;
use crate::application::ports::book_repository::BookRepository;

pub struct DeleteBook<'a, R: BookRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BookRepository + ?Sized> DeleteBook<'a, R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), BookError> {
        if !self.repo.delete(id).await? {
            return Err(BookError::NotFound);
        }
        tracing::info!(book_id = %id, "book_deleted");
        Ok(())
    }
}
