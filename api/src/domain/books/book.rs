use uuid::Uuid;

pub const MAX_BOOK_IMAGES: usize = 7;

/// Catalog entry. Prices are in paise.
#[derive(Debug, Clone)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub description: String,
    pub detailed_description: Option<String>,
    pub category: String,
    pub cover_image: String,
    pub book_images: Vec<String>,
    pub original_price: i64,
    pub discount_percent: i32,
    pub selling_price: i64,
    pub offer_expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub future_price: Option<i64>,
    pub google_drive_file_id: String,
    pub sample_pdf_url: Option<String>,
    pub sales_count: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Writable fields of a book, as sent by the admin panel.
#[derive(Debug, Clone, Default)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub description: String,
    pub detailed_description: Option<String>,
    pub category: String,
    pub cover_image: String,
    pub book_images: Vec<String>,
    pub original_price: i64,
    pub discount_percent: i32,
    pub selling_price: i64,
    pub offer_expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub future_price: Option<i64>,
    pub google_drive_file_id: String,
    pub sample_pdf_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookValidationError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("You can upload a maximum of 7 images.")]
    TooManyImages,
    #[error("{0} must not be negative")]
    NegativePrice(&'static str),
    #[error("discount percent must be between 0 and 100")]
    DiscountOutOfRange,
}

impl BookDraft {
    pub fn validate(&self) -> Result<(), BookValidationError> {
        let required = [
            ("title", &self.title),
            ("author", &self.author),
            ("description", &self.description),
            ("category", &self.category),
            ("cover image", &self.cover_image),
            ("google drive file id", &self.google_drive_file_id),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(BookValidationError::Missing(name));
            }
        }
        if self.book_images.len() > MAX_BOOK_IMAGES {
            return Err(BookValidationError::TooManyImages);
        }
        if self.original_price < 0 {
            return Err(BookValidationError::NegativePrice("original price"));
        }
        if self.selling_price < 0 {
            return Err(BookValidationError::NegativePrice("selling price"));
        }
        if self.future_price.is_some_and(|p| p < 0) {
            return Err(BookValidationError::NegativePrice("future price"));
        }
        if !(0..=100).contains(&self.discount_percent) {
            return Err(BookValidationError::DiscountOutOfRange);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    pub keyword: Option<String>,
    pub category: Option<String>,
}
