use crate::{
    AppState,
    handlers::{certificates, content, projects, session, skills, uploads, visitors},
    media::UPLOAD_BODY_LIMIT,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{MethodRouter, delete, get, post, put},
};

/// Upload endpoints carry base64 files in JSON, so they get a larger body
/// limit than the default 2 MB.
fn upload<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: axum::handler::Handler<T, AppState>,
    T: 'static,
{
    post(handler).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}

/// Admin Router Module
///
/// Every route here edits site content or exposes the raw visit log. The
/// whole router is wrapped in the authentication layer, so handlers can
/// assume a valid admin session.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // --- Home / About ---
        .route("/api/home", put(content::update_home))
        .route("/api/home/upload", upload(uploads::upload_home_media))
        .route("/api/home/upload-resume", upload(uploads::upload_resume))
        .route("/api/about", put(content::update_about))
        .route("/api/about/upload", upload(uploads::upload_about_image))
        // --- Skills ---
        .route("/api/skills", post(skills::create_skill))
        .route("/api/skills/upload", upload(uploads::upload_skill_icon))
        .route(
            "/api/skills/{id}",
            get(skills::get_skill)
                .put(skills::update_skill)
                .delete(skills::delete_skill),
        )
        // --- Projects ---
        .route("/api/projects", post(projects::create_project))
        // PUT /api/projects/reorder
        // Persists the drag-and-drop sequence from the admin panel.
        .route("/api/projects/reorder", put(projects::reorder_projects))
        .route("/api/projects/upload", upload(uploads::upload_project_cover))
        .route(
            "/api/projects/{id}",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        // --- Certificates ---
        .route("/api/certificates", post(certificates::create_certificate))
        .route(
            "/api/certificates/upload",
            upload(uploads::upload_certificate_image),
        )
        .route(
            "/api/certificates/{id}",
            get(certificates::get_certificate)
                .put(certificates::update_certificate)
                .delete(certificates::delete_certificate),
        )
        // --- Visitor Log ---
        .route("/api/visitors/list", get(visitors::list_visitors))
        .route("/api/visitors/reset", delete(visitors::reset_visitors))
        // --- Account & Tools ---
        .route("/api/admin/check-auth", get(session::check_auth))
        .route("/api/admin/settings", put(session::update_settings))
        .route("/api/admin/preview", post(session::preview_markup))
        .route("/api/admin/overview", get(session::content_overview))
        .route("/api/admin/uploads/presigned", post(uploads::get_presigned_url))
}
