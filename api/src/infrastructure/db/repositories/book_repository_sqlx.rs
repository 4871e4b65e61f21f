use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::book_repository::BookRepository;
use crate::domain::books::book::{Book, BookDraft, BookFilter};
use crate::infrastructure::db::PgPool;

pub struct SqlxBookRepository {
    pub pool: PgPool,
}

impl SqlxBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(crate) const BOOK_COLUMNS: &str = "b.id, b.title, b.author, b.description, b.detailed_description, \
     b.category, b.cover_image, b.book_images, b.original_price, b.discount_percent, \
     b.selling_price, b.offer_expires_at, b.future_price, b.google_drive_file_id, \
     b.sample_pdf_url, b.sales_count, b.created_at, b.updated_at";

pub(crate) fn map_book(r: &PgRow) -> Book {
    Book {
        id: r.get("id"),
        title: r.get("title"),
        author: r.get("author"),
        description: r.get("description"),
        detailed_description: r.try_get("detailed_description").ok().flatten(),
        category: r.get("category"),
        cover_image: r.get("cover_image"),
        book_images: r.get("book_images"),
        original_price: r.get("original_price"),
        discount_percent: r.get("discount_percent"),
        selling_price: r.get("selling_price"),
        offer_expires_at: r.try_get("offer_expires_at").ok().flatten(),
        future_price: r.try_get("future_price").ok().flatten(),
        google_drive_file_id: r.get("google_drive_file_id"),
        sample_pdf_url: r.try_get("sample_pdf_url").ok().flatten(),
        sales_count: r.get("sales_count"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

/// Escapes LIKE metacharacters so the keyword matches literally.
fn like_pattern(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len() + 2);
    escaped.push('%');
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl BookRepository for SqlxBookRepository {
    async fn list(&self, filter: &BookFilter) -> anyhow::Result<Vec<Book>> {
        let pattern = filter.keyword.as_deref().map(like_pattern);
        let rows = sqlx::query(&format!(
            r#"SELECT {BOOK_COLUMNS} FROM books b
               WHERE ($1::text IS NULL OR b.title ILIKE $1 ESCAPE '\')
                 AND ($2::text IS NULL OR b.category = $2)
               ORDER BY b.created_at DESC"#
        ))
        .bind(pattern)
        .bind(filter.category.as_deref())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_book).collect())
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Book>> {
        let row = sqlx::query(&format!("SELECT {BOOK_COLUMNS} FROM books b WHERE b.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_book))
    }

    async fn get_many(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Book>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query(&format!(
            "SELECT {BOOK_COLUMNS} FROM books b WHERE b.id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_book).collect())
    }

    async fn create(&self, draft: &BookDraft, created_by: Uuid) -> anyhow::Result<Book> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO books AS b (
                    title, author, description, detailed_description, category,
                    cover_image, book_images, original_price, discount_percent, selling_price,
                    offer_expires_at, future_price, google_drive_file_id, sample_pdf_url, created_by
               ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15)
               RETURNING {BOOK_COLUMNS}"#
        ))
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(&draft.description)
        .bind(&draft.detailed_description)
        .bind(&draft.category)
        .bind(&draft.cover_image)
        .bind(&draft.book_images)
        .bind(draft.original_price)
        .bind(draft.discount_percent)
        .bind(draft.selling_price)
        .bind(draft.offer_expires_at)
        .bind(draft.future_price)
        .bind(&draft.google_drive_file_id)
        .bind(&draft.sample_pdf_url)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_book(&row))
    }

    async fn update(&self, id: Uuid, draft: &BookDraft) -> anyhow::Result<Option<Book>> {
        let row = sqlx::query(&format!(
            r#"UPDATE books AS b SET
                    title = $2, author = $3, description = $4, detailed_description = $5,
                    category = $6, cover_image = $7, book_images = $8, original_price = $9,
                    discount_percent = $10, selling_price = $11, offer_expires_at = $12,
                    future_price = $13, google_drive_file_id = $14, sample_pdf_url = $15,
                    updated_at = now()
               WHERE b.id = $1
               RETURNING {BOOK_COLUMNS}"#
        ))
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(&draft.description)
        .bind(&draft.detailed_description)
        .bind(&draft.category)
        .bind(&draft.cover_image)
        .bind(&draft.book_images)
        .bind(draft.original_price)
        .bind(draft.discount_percent)
        .bind(draft.selling_price)
        .bind(draft.offer_expires_at)
        .bind(draft.future_price)
        .bind(&draft.google_drive_file_id)
        .bind(&draft.sample_pdf_url)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_book))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn top_selling(&self, limit: i64) -> anyhow::Result<Vec<Book>> {
        let rows = sqlx::query(&format!(
            "SELECT {BOOK_COLUMNS} FROM books b ORDER BY b.sales_count DESC, b.created_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_book).collect())
    }

    async fn related(
        &self,
        book_id: Uuid,
        category: &str,
        limit: i64,
    ) -> anyhow::Result<Vec<Book>> {
        let rows = sqlx::query(&format!(
            r#"SELECT {BOOK_COLUMNS} FROM books b
               WHERE b.category = $1 AND b.id <> $2
               ORDER BY b.created_at DESC LIMIT $3"#
        ))
        .bind(category)
        .bind(book_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_book).collect())
    }
}
