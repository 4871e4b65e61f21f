use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct SampleDownload {
    pub id: Uuid,
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub book_title: Option<String>,
    pub downloaded_at: chrono::DateTime<chrono::Utc>,
}
