use std::collections::HashSet;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;

use super::JsonBody;
use crate::{
    AppState,
    error::AppError,
    models::{
        MessageResponse, Project, ProjectRequest, ProjectUpdateRequest, ReorderRequest,
        ReorderResponse,
    },
};

/// list_projects
///
/// [Public Route] Projects in display order: `order` ascending, newest first
/// among equal positions.
#[utoipa::path(
    get,
    path = "/api/projects",
    responses((status = 200, description = "All projects", body = [Project]))
)]
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>, AppError> {
    Ok(Json(state.repo.list_projects().await?))
}

/// create_project
///
/// [Admin Route] The new project is placed after the current last one. A
/// missing `date` defaults to the current month.
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = ProjectRequest,
    responses(
        (status = 201, description = "Created", body = Project),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Duplicate id")
    )
)]
pub async fn create_project(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ProjectRequest>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    let draft = payload.validate(Utc::now())?;
    let project = state.repo.create_project(draft).await?;
    tracing::info!(project_id = %project.id, order = project.order, "project created");
    Ok((StatusCode::CREATED, Json(project)))
}

#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(("id" = String, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Found", body = Project),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, AppError> {
    state
        .repo
        .get_project(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Project not found"))
}

#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    params(("id" = String, Path, description = "Project ID")),
    request_body = ProjectUpdateRequest,
    responses(
        (status = 200, description = "Updated", body = Project),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<ProjectUpdateRequest>,
) -> Result<Json<Project>, AppError> {
    let patch = payload.validate()?;
    state
        .repo
        .update_project(&id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Project not found"))
}

#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(("id" = String, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.repo.delete_project(&id).await? {
        return Err(AppError::not_found("Project not found"));
    }
    tracing::info!(project_id = %id, "project deleted");
    Ok(Json(MessageResponse::new("Project deleted successfully")))
}

/// reorder_projects
///
/// [Admin Route] Persists the sequence produced by drag-and-drop in the admin
/// panel: every listed project gets `order = its index`. Ids that no longer
/// exist are skipped, and the response reports how many were written.
#[utoipa::path(
    put,
    path = "/api/projects/reorder",
    request_body = ReorderRequest,
    responses(
        (status = 200, description = "Order saved", body = ReorderResponse),
        (status = 400, description = "Invalid projects data")
    )
)]
pub async fn reorder_projects(
    State(state): State<AppState>,
    payload: Result<Json<ReorderRequest>, JsonRejection>,
) -> Result<Json<ReorderResponse>, AppError> {
    let Ok(Json(ReorderRequest { projects: Some(ids) })) = payload else {
        return Err(AppError::bad_request("Invalid projects data"));
    };

    let mut seen = HashSet::with_capacity(ids.len());
    if let Some(duplicate) = ids.iter().find(|id| !seen.insert(id.as_str())) {
        return Err(AppError::bad_request(format!(
            "Project `{duplicate}` appears more than once"
        )));
    }

    let updated = state.repo.reorder_projects(&ids).await?;
    tracing::info!(requested = ids.len(), updated, "projects reordered");
    Ok(Json(ReorderResponse {
        message: "Projects reordered successfully".to_string(),
        updated,
    }))
}
