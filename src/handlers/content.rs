use std::collections::BTreeMap;

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::JsonBody;
use crate::{
    AppState,
    error::AppError,
    markup::format_text,
    models::{About, AboutContent, AboutView, Home, HomeContent, HomeView},
};

fn home_view(content: HomeContent, home: Option<&Home>) -> HomeView {
    HomeView {
        intro_html: format_text(&content.intro),
        status_html: content.status.iter().map(|line| format_text(line)).collect(),
        created_at: home.map(|h| h.created_at),
        updated_at: home.map(|h| h.updated_at),
        content,
    }
}

impl From<About> for AboutView {
    fn from(about: About) -> Self {
        let html: BTreeMap<String, String> = about
            .content
            .sections()
            .into_iter()
            .map(|(field, text)| (field.to_string(), format_text(text)))
            .collect();
        AboutView { about, html }
    }
}

/// get_home
///
/// [Public Route] The hero section, with `intro` and `status` also rendered
/// to HTML. Until the admin saves it, placeholder content with the expected
/// shape is served.
#[utoipa::path(
    get,
    path = "/api/home",
    responses((status = 200, description = "Home section", body = HomeView))
)]
pub async fn get_home(State(state): State<AppState>) -> Result<Json<HomeView>, AppError> {
    let view = match state.repo.get_home().await? {
        Some(home) => home_view(home.content.clone(), Some(&home)),
        None => home_view(HomeContent::placeholder(&state.config.site_owner_name), None),
    };
    Ok(Json(view))
}

/// update_home
///
/// [Admin Route] Replaces the hero section, creating it on first save.
#[utoipa::path(
    put,
    path = "/api/home",
    request_body = HomeContent,
    responses(
        (status = 200, description = "Saved", body = Home),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn update_home(
    State(state): State<AppState>,
    JsonBody(content): JsonBody<HomeContent>,
) -> Result<Json<Home>, AppError> {
    content.validate()?;
    let home = state.repo.upsert_home(content).await?;
    tracing::info!("home section updated");
    Ok(Json(home))
}

/// get_about
///
/// [Public Route] The about page with every text section rendered to HTML,
/// or `{}` before it has been written.
#[utoipa::path(
    get,
    path = "/api/about",
    responses((status = 200, description = "About section", body = AboutView))
)]
pub async fn get_about(State(state): State<AppState>) -> Result<Response, AppError> {
    Ok(match state.repo.get_about().await? {
        Some(about) => Json(AboutView::from(about)).into_response(),
        None => Json(json!({})).into_response(),
    })
}

/// update_about
///
/// [Admin Route]
#[utoipa::path(
    put,
    path = "/api/about",
    request_body = AboutContent,
    responses(
        (status = 200, description = "Saved", body = About),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn update_about(
    State(state): State<AppState>,
    JsonBody(content): JsonBody<AboutContent>,
) -> Result<Json<About>, AppError> {
    content.validate()?;
    let about = state.repo.upsert_about(content).await?;
    tracing::info!("about section updated");
    Ok(Json(about))
}
