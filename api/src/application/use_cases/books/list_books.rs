use crate::application::ports::book_repository::BookRepository;
use crate::domain::books::book::{Book, BookFilter};

pub struct ListBooks<'a, R: BookRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BookRepository + ?Sized> ListBooks<'a, R> {
    pub async fn execute(
        &self,
        keyword: Option<String>,
        category: Option<String>,
    ) -> anyhow::Result<Vec<Book>> {
        let filter = BookFilter {
            keyword: keyword.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()),
            category: category
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
        };
        self.repo.list(&filter).await
    }
}
