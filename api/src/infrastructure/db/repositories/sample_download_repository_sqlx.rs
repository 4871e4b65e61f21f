use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::sample_download_repository::SampleDownloadRepository;
use crate::domain::downloads::sample_download::SampleDownload;
use crate::infrastructure::db::PgPool;

pub struct SqlxSampleDownloadRepository {
    pub pool: PgPool,
}

impl SqlxSampleDownloadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_download(r: &PgRow) -> SampleDownload {
    SampleDownload {
        id: r.get("id"),
        user_id: r.get("user_id"),
        book_id: r.get("book_id"),
        book_title: r.try_get("book_title").ok().flatten(),
        downloaded_at: r.get("downloaded_at"),
    }
}

#[async_trait]
impl SampleDownloadRepository for SqlxSampleDownloadRepository {
    async fn record(
        &self,
        user_id: Uuid,
        book_id: Uuid,
        book_title: Option<&str>,
    ) -> anyhow::Result<SampleDownload> {
        let row = sqlx::query(
            r#"INSERT INTO sample_downloads (user_id, book_id, book_title) VALUES ($1, $2, $3)
               RETURNING id, user_id, book_id, book_title, downloaded_at"#,
        )
        .bind(user_id)
        .bind(book_id)
        .bind(book_title)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_download(&row))
    }

    async fn list_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<SampleDownload>> {
        let rows = sqlx::query(
            r#"SELECT id, user_id, book_id, book_title, downloaded_at
               FROM sample_downloads WHERE user_id = $1
               ORDER BY downloaded_at DESC"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_download).collect())
    }
}
