use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::JsonBody;
use crate::{
    AppState,
    error::AppError,
    models::{MessageResponse, Skill, SkillRequest, SkillUpdateRequest},
};

/// list_skills
///
/// [Public Route] Every skill, newest first. The page groups them by category.
#[utoipa::path(
    get,
    path = "/api/skills",
    responses((status = 200, description = "All skills", body = [Skill]))
)]
pub async fn list_skills(State(state): State<AppState>) -> Result<Json<Vec<Skill>>, AppError> {
    Ok(Json(state.repo.list_skills().await?))
}

/// create_skill
///
/// [Admin Route] The numeric `id` is chosen by the admin and must be unique.
#[utoipa::path(
    post,
    path = "/api/skills",
    request_body = SkillRequest,
    responses(
        (status = 201, description = "Created", body = Skill),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Duplicate id")
    )
)]
pub async fn create_skill(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<SkillRequest>,
) -> Result<(StatusCode, Json<Skill>), AppError> {
    let draft = payload.validate()?;
    let skill = state.repo.create_skill(draft).await?;
    tracing::info!(skill_id = skill.id, "skill created");
    Ok((StatusCode::CREATED, Json(skill)))
}

#[utoipa::path(
    get,
    path = "/api/skills/{id}",
    params(("id" = i64, Path, description = "Skill ID")),
    responses(
        (status = 200, description = "Found", body = Skill),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_skill(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Skill>, AppError> {
    state
        .repo
        .get_skill(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Skill not found"))
}

/// update_skill
///
/// [Admin Route] Partial update; only the supplied fields change.
#[utoipa::path(
    put,
    path = "/api/skills/{id}",
    params(("id" = i64, Path, description = "Skill ID")),
    request_body = SkillUpdateRequest,
    responses(
        (status = 200, description = "Updated", body = Skill),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_skill(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<SkillUpdateRequest>,
) -> Result<Json<Skill>, AppError> {
    let patch = payload.validate()?;
    state
        .repo
        .update_skill(id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Skill not found"))
}

#[utoipa::path(
    delete,
    path = "/api/skills/{id}",
    params(("id" = i64, Path, description = "Skill ID")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_skill(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.repo.delete_skill(id).await? {
        return Err(AppError::not_found("Skill not found"));
    }
    tracing::info!(skill_id = id, "skill deleted");
    Ok(Json(MessageResponse::new("Skill deleted successfully")))
}
