use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::use_cases::auth::login::LoginError;
use crate::application::use_cases::auth::register::RegisterError;
use crate::application::use_cases::books::BookError;
use crate::application::use_cases::files::upload_file::UploadError;
use crate::application::use_cases::orders::OrderError;
use crate::application::use_cases::payments::ingest_transaction::IngestError;
use crate::application::use_cases::users::UserError;

/// Error body shared by every endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(err: anyhow::Error) -> Self {
        tracing::error!(error = ?err, "request_failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Server Error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(MessageResponse {
                message: self.message,
            }),
        )
            .into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(err)
    }
}

impl From<RegisterError> for ApiError {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::Repository(e) => Self::internal(e),
            other => Self::bad_request(other.to_string()),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::InvalidCredentials => Self::unauthorized(err.to_string()),
            LoginError::Disabled => Self::new(StatusCode::SERVICE_UNAVAILABLE, err.to_string()),
            LoginError::Repository(e) => Self::internal(e),
        }
    }
}

impl From<BookError> for ApiError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::NotFound | BookError::NoSample => Self::not_found(err.to_string()),
            BookError::Invalid(_) => Self::bad_request(err.to_string()),
            BookError::Repository(e) => Self::internal(e),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound | UserError::BookNotFound => Self::not_found(err.to_string()),
            UserError::AlreadyInCart => Self::bad_request(err.to_string()),
            UserError::Repository(e) => Self::internal(e),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound => Self::not_found(err.to_string()),
            OrderError::Repository(e) => Self::internal(e),
            other => Self::bad_request(other.to_string()),
        }
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Repository(e) => Self::internal(e),
            other => Self::bad_request(other.to_string()),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::UnsupportedType => Self::bad_request(err.to_string()),
            UploadError::Storage(e) => Self::internal(e),
        }
    }
}
