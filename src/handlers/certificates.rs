use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;

use super::JsonBody;
use crate::{
    AppState,
    error::AppError,
    models::{Certificate, CertificateRequest, CertificateUpdateRequest, MessageResponse},
};

/// list_certificates
///
/// [Public Route] Most recently issued first.
#[utoipa::path(
    get,
    path = "/api/certificates",
    responses((status = 200, description = "All certificates", body = [Certificate]))
)]
pub async fn list_certificates(
    State(state): State<AppState>,
) -> Result<Json<Vec<Certificate>>, AppError> {
    Ok(Json(state.repo.list_certificates().await?))
}

/// create_certificate
///
/// [Admin Route] The image is checked before anything else, since it is
/// uploaded separately and is the field most often forgotten. `issueDate`
/// may not lie in the future.
#[utoipa::path(
    post,
    path = "/api/certificates",
    request_body = CertificateRequest,
    responses(
        (status = 201, description = "Created", body = Certificate),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Duplicate id")
    )
)]
pub async fn create_certificate(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CertificateRequest>,
) -> Result<(StatusCode, Json<Certificate>), AppError> {
    let draft = payload.validate(Utc::now())?;
    let certificate = state.repo.create_certificate(draft).await?;
    tracing::info!(certificate_id = %certificate.id, "certificate created");
    Ok((StatusCode::CREATED, Json(certificate)))
}

#[utoipa::path(
    get,
    path = "/api/certificates/{id}",
    params(("id" = String, Path, description = "Certificate ID")),
    responses(
        (status = 200, description = "Found", body = Certificate),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_certificate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Certificate>, AppError> {
    state
        .repo
        .get_certificate(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Certificate not found"))
}

#[utoipa::path(
    put,
    path = "/api/certificates/{id}",
    params(("id" = String, Path, description = "Certificate ID")),
    request_body = CertificateUpdateRequest,
    responses(
        (status = 200, description = "Updated", body = Certificate),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_certificate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<CertificateUpdateRequest>,
) -> Result<Json<Certificate>, AppError> {
    let patch = payload.validate(Utc::now())?;
    state
        .repo
        .update_certificate(&id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Certificate not found"))
}

#[utoipa::path(
    delete,
    path = "/api/certificates/{id}",
    params(("id" = String, Path, description = "Certificate ID")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_certificate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.repo.delete_certificate(&id).await? {
        return Err(AppError::not_found("Certificate not found"));
    }
    tracing::info!(certificate_id = %id, "certificate deleted");
    Ok(Json(MessageResponse::new("Certificate deleted successfully")))
}
