use axum::{Json, extract::State};
use chrono::Utc;

use super::JsonBody;
use crate::{
    AppState,
    error::AppError,
    media::{self, MediaKind},
    models::{
        HomeUploadRequest, ImageUploadRequest, PresignedUrlRequest, PresignedUrlResponse,
        ResumeUploadRequest, UploadResponse,
    },
};

/// Decodes one data URL, stores it and builds the response. Resumes also get
/// a forced-download link.
async fn store(
    state: &AppState,
    kind: MediaKind,
    raw: Option<&str>,
) -> Result<Json<UploadResponse>, AppError> {
    let upload = media::decode_upload(kind, raw)?;
    let key = upload.object_key();
    let size = upload.bytes.len();
    let url = state
        .storage
        .upload_object(&key, &upload.content_type, upload.bytes)
        .await?;
    tracing::info!(key = %key, size, kind = ?kind, "media uploaded");

    let download_url = kind
        .is_document()
        .then(|| media::resume_download_url(&url, &state.config.resume_filename, Utc::now()));

    Ok(Json(UploadResponse {
        url,
        public_id: key,
        download_url,
    }))
}

/// upload_home_media
///
/// [Admin Route] `type: "resume"` stores a PDF resume, anything else the
/// hero photo.
#[utoipa::path(
    post,
    path = "/api/home/upload",
    request_body = HomeUploadRequest,
    responses(
        (status = 200, description = "Stored", body = UploadResponse),
        (status = 400, description = "Missing or invalid file"),
        (status = 413, description = "File too large")
    )
)]
pub async fn upload_home_media(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<HomeUploadRequest>,
) -> Result<Json<UploadResponse>, AppError> {
    let kind = match payload.kind.as_deref() {
        Some("resume") => MediaKind::HomeResume,
        _ => MediaKind::HomePhoto,
    };
    store(&state, kind, payload.image.as_deref()).await
}

#[utoipa::path(
    post,
    path = "/api/home/upload-resume",
    request_body = ResumeUploadRequest,
    responses(
        (status = 200, description = "Stored", body = UploadResponse),
        (status = 400, description = "Missing or invalid file"),
        (status = 413, description = "File too large")
    )
)]
pub async fn upload_resume(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ResumeUploadRequest>,
) -> Result<Json<UploadResponse>, AppError> {
    store(&state, MediaKind::Resume, payload.file.as_deref()).await
}

#[utoipa::path(
    post,
    path = "/api/about/upload",
    request_body = ImageUploadRequest,
    responses((status = 200, description = "Stored", body = UploadResponse))
)]
pub async fn upload_about_image(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ImageUploadRequest>,
) -> Result<Json<UploadResponse>, AppError> {
    store(&state, MediaKind::AboutPhoto, payload.image.as_deref()).await
}

/// upload_project_cover
///
/// [Admin Route] JPEG, PNG, GIF or WebP. A bare base64 string without the
/// `data:` prefix is accepted as JPEG.
#[utoipa::path(
    post,
    path = "/api/projects/upload",
    request_body = ImageUploadRequest,
    responses((status = 200, description = "Stored", body = UploadResponse))
)]
pub async fn upload_project_cover(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ImageUploadRequest>,
) -> Result<Json<UploadResponse>, AppError> {
    store(&state, MediaKind::ProjectCover, payload.image.as_deref()).await
}

#[utoipa::path(
    post,
    path = "/api/skills/upload",
    request_body = ImageUploadRequest,
    responses((status = 200, description = "Stored", body = UploadResponse))
)]
pub async fn upload_skill_icon(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ImageUploadRequest>,
) -> Result<Json<UploadResponse>, AppError> {
    store(&state, MediaKind::SkillIcon, payload.image.as_deref()).await
}

/// upload_certificate_image
///
/// [Admin Route] Limited to 4 MB.
#[utoipa::path(
    post,
    path = "/api/certificates/upload",
    request_body = ImageUploadRequest,
    responses(
        (status = 200, description = "Stored", body = UploadResponse),
        (status = 413, description = "File too large")
    )
)]
pub async fn upload_certificate_image(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ImageUploadRequest>,
) -> Result<Json<UploadResponse>, AppError> {
    store(&state, MediaKind::Certificate, payload.image.as_deref()).await
}

/// get_presigned_url
///
/// [Admin Route] Issues a 10-minute signed URL so the browser can `PUT` a
/// large file straight to the media bucket, bypassing the JSON upload path.
/// The signature is bound to `file_type`.
#[utoipa::path(
    post,
    path = "/api/admin/uploads/presigned",
    request_body = PresignedUrlRequest,
    responses(
        (status = 200, description = "URL", body = PresignedUrlResponse),
        (status = 400, description = "Missing filename or type")
    )
)]
pub async fn get_presigned_url(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<PresignedUrlRequest>,
) -> Result<Json<PresignedUrlResponse>, AppError> {
    if payload.filename.trim().is_empty() || payload.file_type.trim().is_empty() {
        return Err(AppError::bad_request("filename and file_type are required"));
    }

    let object_key = media::presigned_object_key(&payload.filename);
    let upload_url = state
        .storage
        .get_presigned_upload_url(&object_key, &payload.file_type)
        .await?;

    Ok(Json(PresignedUrlResponse {
        upload_url,
        resource_key: object_key,
    }))
}
