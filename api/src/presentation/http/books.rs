use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::application::use_cases::books::create_book::CreateBook;
use crate::application::use_cases::books::delete_book::DeleteBook;
use crate::application::use_cases::books::get_book::GetBook;
use crate::application::use_cases::books::list_books::ListBooks;
use crate::application::use_cases::books::record_sample_download::RecordSampleDownload;
use crate::application::use_cases::books::related_books::RelatedBooks;
use crate::application::use_cases::books::top_books::TopBooks;
use crate::application::use_cases::books::update_book::UpdateBook;
use crate::bootstrap::app_context::AppContext;
use crate::domain::books::book::{Book, BookDraft};
use crate::presentation::http::auth::{AdminUser, AuthUser};
use crate::presentation::http::error::{ApiResult, MessageResponse};

#[derive(Debug, Serialize, ToSchema)]
pub struct BookResponse {
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
    pub offer_expires_at: Option<DateTime<Utc>>,
    pub future_price: Option<i64>,
    /// Only shown to admins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_drive_file_id: Option<String>,
    pub sample_pdf_url: Option<String>,
    pub sales_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookResponse {
    pub fn public(book: Book) -> Self {
        Self::build(book, false)
    }

    pub fn for_admin(book: Book) -> Self {
        Self::build(book, true)
    }

    pub fn for_viewer(book: Book, viewer: Option<&AuthUser>) -> Self {
        let admin = viewer.is_some_and(|v| v.0.is_admin());
        Self::build(book, admin)
    }

    fn build(b: Book, with_drive_file: bool) -> Self {
        Self {
            id: b.id,
            title: b.title,
            author: b.author,
            description: b.description,
            detailed_description: b.detailed_description,
            category: b.category,
            cover_image: b.cover_image,
            book_images: b.book_images,
            original_price: b.original_price,
            discount_percent: b.discount_percent,
            selling_price: b.selling_price,
            offer_expires_at: b.offer_expires_at,
            future_price: b.future_price,
            google_drive_file_id: with_drive_file.then_some(b.google_drive_file_id),
            sample_pdf_url: b.sample_pdf_url,
            sales_count: b.sales_count,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

/// Admin payload for create and update. Missing text fields arrive blank and
/// are reported by validation.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct BookRequest {
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
    pub offer_expires_at: Option<DateTime<Utc>>,
    pub future_price: Option<i64>,
    pub google_drive_file_id: String,
    pub sample_pdf_url: Option<String>,
}

fn blank_to_none(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl From<BookRequest> for BookDraft {
    fn from(r: BookRequest) -> Self {
        BookDraft {
            title: r.title.trim().to_string(),
            author: r.author.trim().to_string(),
            description: r.description,
            detailed_description: blank_to_none(r.detailed_description),
            category: r.category.trim().to_string(),
            cover_image: r.cover_image.trim().to_string(),
            book_images: r
                .book_images
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            original_price: r.original_price,
            discount_percent: r.discount_percent,
            selling_price: r.selling_price,
            offer_expires_at: r.offer_expires_at,
            future_price: r.future_price,
            google_drive_file_id: r.google_drive_file_id.trim().to_string(),
            sample_pdf_url: blank_to_none(r.sample_pdf_url),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListBooksQuery {
    pub keyword: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SampleResponse {
    pub sample_pdf_url: String,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/top", get(top_books))
        .route("/books/related/:id", get(related_books))
        .route(
            "/books/:id",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/books/:id/sample", post(download_sample))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/books", tag = "Books", params(ListBooksQuery), responses(
    (status = 200, body = [BookResponse])
))]
pub async fn list_books(
    State(ctx): State<AppContext>,
    viewer: Option<AuthUser>,
    Query(q): Query<ListBooksQuery>,
) -> ApiResult<Json<Vec<BookResponse>>> {
    let repo = ctx.book_repo();
    let uc = ListBooks {
        repo: repo.as_ref(),
    };
    let books = uc.execute(q.keyword, q.category).await?;
    Ok(Json(
        books
            .into_iter()
            .map(|b| BookResponse::for_viewer(b, viewer.as_ref()))
            .collect(),
    ))
}

#[utoipa::path(get, path = "/api/books/top", tag = "Books", responses(
    (status = 200, body = [BookResponse])
))]
pub async fn top_books(State(ctx): State<AppContext>) -> ApiResult<Json<Vec<BookResponse>>> {
    let repo = ctx.book_repo();
    let uc = TopBooks {
        repo: repo.as_ref(),
    };
    let books = uc.execute().await?;
    Ok(Json(books.into_iter().map(BookResponse::public).collect()))
}

#[utoipa::path(get, path = "/api/books/related/{id}", tag = "Books",
    params(("id" = Uuid, Path, description = "Book id")),
    responses((status = 200, body = [BookResponse]), (status = 404, body = MessageResponse))
)]
pub async fn related_books(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<BookResponse>>> {
    let repo = ctx.book_repo();
    let uc = RelatedBooks {
        repo: repo.as_ref(),
    };
    let books = uc.execute(id).await?;
    Ok(Json(books.into_iter().map(BookResponse::public).collect()))
}

#[utoipa::path(get, path = "/api/books/{id}", tag = "Books",
    params(("id" = Uuid, Path, description = "Book id")),
    responses((status = 200, body = BookResponse), (status = 404, body = MessageResponse))
)]
pub async fn get_book(
    State(ctx): State<AppContext>,
    viewer: Option<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<BookResponse>> {
    let repo = ctx.book_repo();
    let uc = GetBook {
        repo: repo.as_ref(),
    };
    let book = uc.execute(id).await?;
    Ok(Json(BookResponse::for_viewer(book, viewer.as_ref())))
}

#[utoipa::path(post, path = "/api/books", tag = "Books", request_body = BookRequest, responses(
    (status = 201, body = BookResponse),
    (status = 400, body = MessageResponse)
))]
pub async fn create_book(
    State(ctx): State<AppContext>,
    AdminUser(admin): AdminUser,
    Json(req): Json<BookRequest>,
) -> ApiResult<(StatusCode, Json<BookResponse>)> {
    let repo = ctx.book_repo();
    let uc = CreateBook {
        repo: repo.as_ref(),
    };
    let draft = BookDraft::from(req);
    let book = uc.execute(admin.id, &draft).await?;
    Ok((StatusCode::CREATED, Json(BookResponse::for_admin(book))))
}

#[utoipa::path(put, path = "/api/books/{id}", tag = "Books", request_body = BookRequest,
    params(("id" = Uuid, Path, description = "Book id")),
    responses((status = 200, body = BookResponse), (status = 404, body = MessageResponse))
)]
pub async fn update_book(
    State(ctx): State<AppContext>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(req): Json<BookRequest>,
) -> ApiResult<Json<BookResponse>> {
    let repo = ctx.book_repo();
    let uc = UpdateBook {
        repo: repo.as_ref(),
    };
    let draft = BookDraft::from(req);
    let book = uc.execute(id, &draft).await?;
    Ok(Json(BookResponse::for_admin(book)))
}

#[utoipa::path(delete, path = "/api/books/{id}", tag = "Books",
    params(("id" = Uuid, Path, description = "Book id")),
    responses((status = 200, body = MessageResponse), (status = 404, body = MessageResponse))
)]
pub async fn delete_book(
    State(ctx): State<AppContext>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let repo = ctx.book_repo();
    let uc = DeleteBook {
        repo: repo.as_ref(),
    };
    uc.execute(id).await?;
    Ok(Json(MessageResponse {
        message: "Book removed".into(),
    }))
}

#[utoipa::path(post, path = "/api/books/{id}/sample", tag = "Books",
    params(("id" = Uuid, Path, description = "Book id")),
    responses((status = 200, body = SampleResponse), (status = 404, body = MessageResponse))
)]
pub async fn download_sample(
    State(ctx): State<AppContext>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SampleResponse>> {
    let books = ctx.book_repo();
    let downloads = ctx.sample_download_repo();
    let uc = RecordSampleDownload {
        books: books.as_ref(),
        downloads: downloads.as_ref(),
    };
    let sample_pdf_url = uc.execute(user.id, id).await?;
    Ok(Json(SampleResponse { sample_pdf_url }))
}
