use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::books::book::{Book, BookDraft, BookFilter};

#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn list(&self, filter: &BookFilter) -> anyhow::Result<Vec<Book>>;
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Book>>;
    async fn get_many(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Book>>;
    async fn create(&self, draft: &BookDraft, created_by: Uuid) -> anyhow::Result<Book>;
    async fn update(&self, id: Uuid, draft: &BookDraft) -> anyhow::Result<Option<Book>>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
    async fn top_selling(&self, limit: i64) -> anyhow::Result<Vec<Book>>;
    async fn related(&self, book_id: Uuid, category: &str, limit: i64)
    -> anyhow::Result<Vec<Book>>;
}
