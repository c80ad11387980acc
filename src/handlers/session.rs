use axum::{
    Json,
    extract::State,
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse},
};
use chrono::Utc;

use super::JsonBody;
use crate::{
    AppState,
    auth::{self, AuthAdmin},
    error::AppError,
    markup::format_text,
    models::{
        ContentOverview, LoginRequest, MessageResponse, PreviewRequest, PreviewResponse,
        SettingsRequest, SettingsResponse,
    },
    repository::RepositoryError,
};

/// login
///
/// [Public Route] Exchanges admin credentials for a session token, delivered
/// as the `admin_token` HttpOnly cookie.
#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; session cookie set", body = MessageResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.username.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::bad_request("Username and password are required"));
    }

    let admin = state
        .repo
        .find_admin_by_username(payload.username.trim())
        .await?
        .filter(|admin| auth::verify_password(admin, &payload.password));
    let Some(admin) = admin else {
        tracing::warn!(username = %payload.username, "failed admin login");
        return Err(AppError::InvalidCredentials("Invalid credentials".to_string()));
    };

    let token = auth::issue_token(&state.config, &admin, Utc::now())?;
    tracing::info!(username = %admin.username, "admin logged in");

    Ok((
        AppendHeaders([(SET_COOKIE, auth::session_cookie(&state.config, &token))]),
        Json(MessageResponse::new("Login successful")),
    ))
}

/// logout
///
/// [Public Route] Expires the session cookie. Works with or without a valid
/// session so a stale cookie can always be cleared.
#[utoipa::path(
    post,
    path = "/api/admin/logout",
    responses((status = 200, description = "Session cookie cleared", body = MessageResponse))
)]
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        AppendHeaders([(SET_COOKIE, auth::clear_session_cookie(&state.config))]),
        Json(MessageResponse::new("Logged out successfully")),
    )
}

/// check_auth
///
/// [Admin Route] Lets the admin panel probe whether its session is still valid.
#[utoipa::path(
    get,
    path = "/api/admin/check-auth",
    responses(
        (status = 200, description = "Authenticated", body = MessageResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn check_auth(_admin: AuthAdmin) -> Json<MessageResponse> {
    Json(MessageResponse::new("Authenticated"))
}

/// update_settings
///
/// [Admin Route] Changes the admin username and/or password. Either change
/// requires the current password. A request with nothing to change still
/// answers 200. The session cookie is reissued so the token carries the new
/// username.
#[utoipa::path(
    put,
    path = "/api/admin/settings",
    request_body = SettingsRequest,
    responses(
        (status = 200, description = "Updated", body = SettingsResponse),
        (status = 400, description = "Username taken"),
        (status = 401, description = "Current password is incorrect")
    )
)]
pub async fn update_settings(
    AuthAdmin { id, .. }: AuthAdmin,
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<SettingsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut admin = state.repo.get_admin(id).await?.ok_or(AppError::Unauthorized)?;

    let requested_username = payload
        .new_username
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty());
    let new_password = payload.new_password.filter(|p| !p.is_empty());

    if requested_username.is_some() || new_password.is_some() {
        let current = payload.current_password.unwrap_or_default();
        if !auth::verify_password(&admin, &current) {
            return Err(AppError::InvalidCredentials(
                "Current password is incorrect".to_string(),
            ));
        }
    }

    // Resubmitting the current name is not a rename.
    if let Some(username) = requested_username.filter(|u| *u != admin.username) {
        if state.repo.find_admin_by_username(&username).await?.is_some() {
            return Err(AppError::bad_request("Username already exists"));
        }
        admin.username = username;
    }
    if let Some(password) = new_password {
        auth::set_password(&mut admin, &password);
    }

    let admin = match state.repo.update_admin(admin).await {
        Ok(Some(admin)) => admin,
        Ok(None) => return Err(AppError::Unauthorized),
        Err(RepositoryError::Conflict(msg)) => return Err(AppError::BadRequest(msg)),
        Err(e) => return Err(e.into()),
    };

    let token = auth::issue_token(&state.config, &admin, Utc::now())?;
    tracing::info!(username = %admin.username, "admin settings updated");

    Ok((
        AppendHeaders([(SET_COOKIE, auth::session_cookie(&state.config, &token))]),
        Json(SettingsResponse {
            message: "Settings updated successfully".to_string(),
            username: admin.username,
        }),
    ))
}

/// preview_markup
///
/// [Admin Route] Renders the `[[highlight]]` / `**bold**` markup exactly as
/// the public pages will.
#[utoipa::path(
    post,
    path = "/api/admin/preview",
    request_body = PreviewRequest,
    responses((status = 200, description = "Rendered HTML", body = PreviewResponse))
)]
pub async fn preview_markup(JsonBody(payload): JsonBody<PreviewRequest>) -> Json<PreviewResponse> {
    Json(PreviewResponse {
        html: format_text(&payload.text),
    })
}

/// content_overview
///
/// [Admin Route] Document counts for the dashboard cards.
#[utoipa::path(
    get,
    path = "/api/admin/overview",
    responses((status = 200, description = "Counts", body = ContentOverview))
)]
pub async fn content_overview(
    State(state): State<AppState>,
) -> Result<Json<ContentOverview>, AppError> {
    Ok(Json(state.repo.content_overview().await?))
}
