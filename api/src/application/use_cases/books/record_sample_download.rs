use uuid::Uuid;

use super::BookError;
use crate::application::ports::book_repository::BookRepository;
use crate::application::ports::sample_download_repository::SampleDownloadRepository;

pub struct RecordSampleDownload<'a, B, S>
where
    B: BookRepository + ?Sized,
    S: SampleDownloadRepository + ?Sized,
{
    pub books: &'a B,
    pub downloads: &'a S,
}

impl<'a, B, S> RecordSampleDownload<'a, B, S>
where
    B: BookRepository + ?Sized,
    S: SampleDownloadRepository + ?Sized,
{
    /// Returns the sample URL after logging who fetched it.
    pub async fn execute(&self, user_id: Uuid, book_id: Uuid) -> Result<String, BookError> {
        let book = self.books.get(book_id).await?.ok_or(BookError::NotFound)?;
        let url = book
            .sample_pdf_url
            .filter(|u| !u.trim().is_empty())
            .ok_or(BookError::NoSample)?;
        self.downloads
            .record(user_id, book.id, Some(&book.title))
            .await?;
        Ok(url)
    }
}
