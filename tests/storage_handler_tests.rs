use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use portfolio_cms::{
    AppConfig, AppState, MemoryRepository, create_router,
    auth,
    models::{PresignedUrlRequest, PresignedUrlResponse, UploadResponse},
    repository::RepositoryState,
    storage::{MOCK_BASE_URL, MockStorageService},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::util::ServiceExt;

const ADMIN: &str = "owner";

/// Router over an in-memory repository holding one admin. Requests
/// authenticate through the local-mode username header.
async fn app(mock_storage: MockStorageService) -> axum::Router {
    let repo = Arc::new(MemoryRepository::new()) as RepositoryState;
    repo.create_admin(auth::new_admin(ADMIN, "pw")).await.unwrap();

    let state = AppState {
        repo,
        storage: Arc::new(mock_storage),
        config: AppConfig::default(),
    };
    create_router(state)
}

fn admin_post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .header("x-admin-username", ADMIN)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", BASE64.encode(bytes))
}

async fn json_body(response: axum::response::Response) -> Value {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

#[tokio::test]
async fn test_skill_icon_upload_is_stored() {
    let storage = MockStorageService::new();
    let app = app(storage.clone()).await;

    let response = app
        .oneshot(admin_post(
            "/api/skills/upload",
            json!({ "image": data_url("image/svg+xml", b"<svg/>") }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: UploadResponse = serde_json::from_value(json_body(response).await).unwrap();
    assert!(body.public_id.starts_with("portfolio/skills/"));
    assert!(body.public_id.ends_with(".svg"));
    assert_eq!(body.url, format!("{MOCK_BASE_URL}/{}", body.public_id));
    assert!(body.download_url.is_none());

    let uploads = storage.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].content_type, "image/svg+xml");
    assert_eq!(uploads[0].size, 6);
}

#[tokio::test]
async fn test_upload_requires_session() {
    let app = app(MockStorageService::new()).await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/about/upload")
        .header("Content-Type", "application/json")
        .body(Body::from(
            json!({ "image": data_url("image/png", b"png") }).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_home_resume_upload_gets_download_link() {
    let app = app(MockStorageService::new()).await;
    let response = app
        .oneshot(admin_post(
            "/api/home/upload",
            json!({ "image": data_url("application/pdf", b"%PDF-1.4"), "type": "resume" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: UploadResponse = serde_json::from_value(json_body(response).await).unwrap();
    assert!(body.public_id.starts_with("portfolio/resumes/"));
    let download = body.download_url.unwrap();
    assert!(download.starts_with(&format!("{}?dl=", body.url)));
    assert!(download.ends_with("-resume.pdf"));
}

#[tokio::test]
async fn test_resume_endpoint_rejects_images() {
    let app = app(MockStorageService::new()).await;
    let response = app
        .oneshot(admin_post(
            "/api/home/upload-resume",
            json!({ "file": data_url("image/png", b"png") }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["message"], "Invalid file format");
}

#[tokio::test]
async fn test_project_cover_accepts_bare_base64() {
    let storage = MockStorageService::new();
    let app = app(storage.clone()).await;
    let response = app
        .oneshot(admin_post(
            "/api/projects/upload",
            json!({ "image": BASE64.encode(b"jpeg bytes") }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(storage.uploads()[0].content_type, "image/jpeg");
}

#[tokio::test]
async fn test_missing_image_is_bad_request() {
    let app = app(MockStorageService::new()).await;
    let response = app
        .oneshot(admin_post("/api/certificates/upload", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["message"], "No image provided");
}

#[tokio::test]
async fn test_certificate_image_size_limit() {
    let app = app(MockStorageService::new()).await;
    let oversized = vec![0u8; 4 * 1024 * 1024 + 1];
    let response = app
        .oneshot(admin_post(
            "/api/certificates/upload",
            json!({ "image": data_url("image/png", &oversized) }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        json_body(response).await["message"],
        "File too large. Maximum size is 4MB"
    );
}

#[tokio::test]
async fn test_upload_storage_failure() {
    let app = app(MockStorageService::new_failing()).await;
    let response = app
        .oneshot(admin_post(
            "/api/about/upload",
            json!({ "image": data_url("image/png", b"png") }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await["message"], "Error uploading file");
}

// --- Presigned URLs ---

async fn request_presigned(app: axum::Router, payload: &PresignedUrlRequest) -> axum::response::Response {
    app.oneshot(admin_post(
        "/api/admin/uploads/presigned",
        serde_json::to_value(payload).unwrap(),
    ))
    .await
    .unwrap()
}

#[tokio::test]
async fn test_presigned_url_success() {
    let app = app(MockStorageService::new()).await;
    let payload = PresignedUrlRequest {
        filename: "Portfolio Demo.MP4".to_string(),
        file_type: "video/mp4".to_string(),
    };

    let response = request_presigned(app, &payload).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body_json: PresignedUrlResponse =
        serde_json::from_value(json_body(response).await).unwrap();
    assert!(body_json.upload_url.contains("signature=fake"));
    assert!(body_json.resource_key.ends_with(".mp4"));
    assert!(body_json.resource_key.starts_with("uploads/"));
}

#[tokio::test]
async fn test_presigned_url_sanitization() {
    let app = app(MockStorageService::new()).await;
    let payload = PresignedUrlRequest {
        filename: "../../etc/passwd.exe".to_string(),
        file_type: "application/octet-stream".to_string(),
    };

    let response = request_presigned(app, &payload).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body_json: PresignedUrlResponse =
        serde_json::from_value(json_body(response).await).unwrap();
    assert!(body_json.resource_key.ends_with(".exe"));
    assert!(!body_json.resource_key.contains(".."));
}

#[tokio::test]
async fn test_presigned_url_requires_type() {
    let app = app(MockStorageService::new()).await;
    let payload = PresignedUrlRequest {
        filename: "a.pdf".to_string(),
        file_type: String::new(),
    };

    let response = request_presigned(app, &payload).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_presigned_url_storage_failure() {
    let app = app(MockStorageService::new_failing()).await;
    let payload = PresignedUrlRequest {
        filename: "valid.mp4".to_string(),
        file_type: "video/mp4".to_string(),
    };

    let response = request_presigned(app, &payload).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
