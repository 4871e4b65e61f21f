use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    routing::post,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::use_cases::files::upload_file::UploadFile;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::AdminUser;
use crate::presentation::http::error::{ApiError, ApiResult, MessageResponse};

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Public URL of the stored file.
    pub image: String,
    pub message: String,
}

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadMultipart {
    /// jpg, jpeg, png, webp or pdf
    #[schema(value_type = String, format = Binary)]
    image: String,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/upload", post(upload))
        .with_state(ctx)
}

#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "Uploads",
    request_body(content = UploadMultipart, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = UploadResponse),
        (status = 400, body = MessageResponse),
        (status = 413, body = MessageResponse)
    )
)]
pub async fn upload(
    State(ctx): State<AppContext>,
    AdminUser(admin): AdminUser,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut orig_filename: Option<String> = None;
    let mut content_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::new(e.status(), e.body_text()))?
    {
        if field.name() != Some("image") {
            continue;
        }
        orig_filename = field.file_name().map(|s| s.to_string());
        content_type = field.content_type().map(|s| s.to_string()).or_else(|| {
            orig_filename
                .as_deref()
                .and_then(|n| mime_guess::from_path(n).first_raw())
                .map(str::to_string)
        });
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
        if data.len() > ctx.cfg.upload_max_bytes {
            return Err(ApiError::new(
                StatusCode::PAYLOAD_TOO_LARGE,
                "File too large",
            ));
        }
        file_bytes = Some(data.to_vec());
    }

    let bytes = file_bytes.ok_or_else(|| ApiError::bad_request("No file uploaded"))?;
    let storage = ctx.storage_port();
    let uc = UploadFile {
        storage: storage.as_ref(),
        public_base_url: ctx.cfg.public_base_url.clone(),
    };
    let stored = uc.execute(bytes, orig_filename, content_type).await?;
    tracing::debug!(admin_id = %admin.id, filename = %stored.filename, "upload_accepted");
    Ok(Json(UploadResponse {
        image: stored.url,
        message: "File uploaded successfully".into(),
    }))
}
