use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod analytics;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod markup;
pub mod media;
pub mod models;
pub mod repository;
pub mod storage;
pub mod validation;

// Routing segregated by access level (Public, Admin).
pub mod routes;
use auth::AuthAdmin;
use handlers::{certificates, content, projects, session, skills, uploads, visitors};
use routes::{admin, public};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use error::AppError;
pub use repository::{MemoryRepository, PostgresRepository, RepositoryState};
pub use storage::{MockStorageService, S3StorageClient, StorageState};

/// ApiDoc
///
/// OpenAPI document aggregated from the `#[utoipa::path]` handlers and the
/// `ToSchema` models, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        content::get_home, content::update_home, content::get_about, content::update_about,
        skills::list_skills, skills::create_skill, skills::get_skill, skills::update_skill,
        skills::delete_skill,
        projects::list_projects, projects::create_project, projects::get_project,
        projects::update_project, projects::delete_project, projects::reorder_projects,
        certificates::list_certificates, certificates::create_certificate,
        certificates::get_certificate, certificates::update_certificate,
        certificates::delete_certificate,
        visitors::record_visit, visitors::visitor_stats, visitors::list_visitors,
        visitors::reset_visitors,
        session::login, session::logout, session::check_auth, session::update_settings,
        session::preview_markup, session::content_overview,
        uploads::upload_home_media, uploads::upload_resume, uploads::upload_about_image,
        uploads::upload_project_cover, uploads::upload_skill_icon,
        uploads::upload_certificate_image, uploads::get_presigned_url,
    ),
    components(
        schemas(
            models::HomeContent, models::HomePhoto, models::SocialLink, models::Home,
            models::HomeView, models::AboutContent, models::About, models::AboutView,
            models::Skill, models::SkillCategory, models::SkillRequest, models::SkillUpdateRequest,
            models::Project, models::ProjectCategory, models::Technology, models::ProjectLinks,
            models::ProjectDetails, models::ProjectRequest, models::ProjectUpdateRequest,
            models::ReorderRequest, models::ReorderResponse,
            models::Certificate, models::CertificateRequest, models::CertificateUpdateRequest,
            models::Visitor, models::VisitRecorded, models::VisitorPage, models::VisitorStats,
            models::CountBucket,
            models::LoginRequest, models::SettingsRequest, models::SettingsResponse,
            models::ContentOverview, models::PreviewRequest, models::PreviewResponse,
            models::ImageUploadRequest, models::HomeUploadRequest, models::ResumeUploadRequest,
            models::UploadResponse, models::PresignedUrlRequest, models::PresignedUrlResponse,
            models::MessageResponse,
        )
    ),
    tags(
        (name = "portfolio-cms", description = "Portfolio content and admin API")
    )
)]
pub struct ApiDoc;

/// AppState
///
/// The single shared container for the application's services and
/// configuration, cloned into every request.
#[derive(Clone)]
pub struct AppState {
    /// Persistence layer (Postgres in production, in-memory in tests).
    pub repo: RepositoryState,
    /// Media store (S3/MinIO, or the mock in tests).
    pub storage: StorageState,
    /// The loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// Let extractors such as `AuthAdmin` pull single components from AppState.

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for StorageState {
    fn from_ref(app_state: &AppState) -> StorageState {
        app_state.storage.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// Guards the admin router. Extracting `AuthAdmin` runs the full session
/// check; on failure the extractor's 401 rejection is returned and the
/// handler never runs.
async fn auth_middleware(_admin: AuthAdmin, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles the routing structure, applies global and scoped middleware,
/// and registers the application state.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        // Admin routes share paths with public reads; `route_layer` only wraps
        // the admin method handlers.
        .merge(
            admin::admin_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware)),
        )
        .with_state(state);

    // 3. Observability and Correlation Layers
    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS Layer
        .layer(cors)
}

/// trace_span_logger
///
/// Builds the per-request span so every log line of a request carries its
/// `x-request-id`.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
