use super::TOP_BOOKS_LIMIT;
use crate::application::ports::book_repository::BookRepository;
use crate::domain::books::book::Book;

pub struct TopBooks<'a, R: BookRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BookRepository + ?Sized> TopBooks<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<Book>> {
        self.repo.top_selling(TOP_BOOKS_LIMIT).await
    }
}
