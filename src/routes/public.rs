use crate::{
    AppState,
    handlers::{certificates, content, projects, session, skills, visitors},
};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Read-only content for the portfolio pages, the visit tracking hit and the
/// login/logout pair. Nothing here can change site content.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe for the load balancer.
        .route("/health", get(|| async { "ok" }))
        // --- Page Content ---
        .route("/api/home", get(content::get_home))
        .route("/api/about", get(content::get_about))
        .route("/api/skills", get(skills::list_skills))
        .route("/api/projects", get(projects::list_projects))
        .route("/api/certificates", get(certificates::list_certificates))
        // --- Analytics ---
        // GET /api/visitor-count?pageVisited=/projects&source=linkedin
        // Sent by every public page on load.
        .route("/api/visitor-count", get(visitors::record_visit))
        .route("/api/visitors/stats", get(visitors::visitor_stats))
        // --- Session ---
        .route("/api/admin/login", post(session::login))
        .route("/api/admin/logout", post(session::logout))
}
