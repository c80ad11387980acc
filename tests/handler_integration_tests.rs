use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use chrono::{Duration, Utc};
use portfolio_cms::{
    AppError, AppState,
    auth::{self, AuthAdmin},
    config::AppConfig,
    handlers::{JsonBody, certificates, content, projects, session, skills, visitors},
    models::{
        AboutContent, CertificateRequest, CertificateUpdateRequest, HomeContent, HomePhoto,
        LoginRequest, PreviewRequest, ProjectCategory, ProjectRequest, ProjectUpdateRequest,
        ReorderRequest, SettingsRequest, SkillCategory, SkillRequest, SkillUpdateRequest,
        VisitQuery, VisitorListQuery,
    },
    repository::MemoryRepository,
    storage::MockStorageService,
};
use std::sync::Arc;

// --- Helpers ---

fn test_state() -> AppState {
    AppState {
        repo: Arc::new(MemoryRepository::new()),
        storage: Arc::new(MockStorageService::new()),
        config: AppConfig {
            site_owner_name: "Jane Doe".to_string(),
            ..AppConfig::default()
        },
    }
}

fn skill_request(id: i64, name: &str) -> SkillRequest {
    SkillRequest {
        id: Some(id),
        name: name.to_string(),
        icon: format!("https://cdn.example.com/{name}.svg"),
        category: "proficient".to_string(),
    }
}

fn project_request(id: &str) -> ProjectRequest {
    ProjectRequest {
        id: id.to_string(),
        category: "fullstack".to_string(),
        cover: "https://cdn.example.com/cover.png".to_string(),
        name: format!("Project {id}"),
        desc: "A thing I built".to_string(),
        ..ProjectRequest::default()
    }
}

fn certificate_request(id: &str) -> CertificateRequest {
    CertificateRequest {
        id: id.to_string(),
        title: "Cloud Practitioner".to_string(),
        image: "https://cdn.example.com/cert.png".to_string(),
        issuer: "AWS".to_string(),
        issue_date: Some("2024-03-01".to_string()),
        ..CertificateRequest::default()
    }
}

async fn seed_projects(state: &AppState, ids: &[&str]) {
    for id in ids {
        let _ = projects::create_project(State(state.clone()), JsonBody(project_request(id)))
            .await
            .unwrap();
    }
}

async fn project_ids(state: &AppState) -> Vec<String> {
    let Json(list) = projects::list_projects(State(state.clone())).await.unwrap();
    list.into_iter().map(|p| p.id).collect()
}

fn validation_errors(err: AppError) -> Vec<String> {
    match err {
        AppError::Validation(errors) => errors,
        other => panic!("expected validation error, got {other:?}"),
    }
}

// --- Home / About ---

#[tokio::test]
async fn test_home_placeholder_before_first_save() {
    let state = test_state();
    let Json(view) = content::get_home(State(state)).await.unwrap();

    assert_eq!(view.content.photo.alt, "Jane Doe");
    assert_eq!(view.content.status.len(), 3);
    let socials: Vec<_> = view.content.socials.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(socials, ["instagram", "linkedin", "github"]);
    assert!(view.created_at.is_none());
}

#[tokio::test]
async fn test_home_update_renders_markup_on_read() {
    let state = test_state();
    let home = HomeContent {
        photo: HomePhoto {
            url: "https://cdn.example.com/me.jpg".to_string(),
            alt: "Me".to_string(),
        },
        tagline: "Hi".to_string(),
        tagline2: "there".to_string(),
        intro: "I build **fast** [[things]]".to_string(),
        status: vec!["Open to [[work]]".to_string()],
        socials: vec![],
        resumelink: "https://cdn.example.com/cv.pdf".to_string(),
    };

    let _ = content::update_home(State(state.clone()), JsonBody(home))
        .await
        .unwrap();
    let Json(view) = content::get_home(State(state)).await.unwrap();

    assert_eq!(
        view.intro_html,
        r#"I build <strong class="font-bold">fast</strong> <span class="gradient_text">things</span>"#
    );
    assert_eq!(
        view.status_html,
        [r#"Open to <span class="gradient_text">work</span>"#]
    );
    assert!(view.created_at.is_some());
}

#[tokio::test]
async fn test_home_update_requires_every_field() {
    let state = test_state();
    let err = content::update_home(State(state), JsonBody(HomeContent::default()))
        .await
        .unwrap_err();

    let errors = validation_errors(err);
    assert!(errors.contains(&"photo.url is required".to_string()));
    assert!(errors.contains(&"status is required".to_string()));
}

#[tokio::test]
async fn test_about_empty_object_until_saved() {
    let state = test_state();
    let response = content::get_about(State(state)).await.unwrap();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"{}");
}

#[tokio::test]
async fn test_about_profile_image_checked_first() {
    let state = test_state();
    let err = content::update_about(State(state), JsonBody(AboutContent::default()))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Profile image is required");
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

// --- Skills ---

#[tokio::test]
async fn test_skill_crud_lifecycle() {
    let state = test_state();

    let (status, Json(created)) =
        skills::create_skill(State(state.clone()), JsonBody(skill_request(1, "rust")))
            .await
            .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.category, SkillCategory::Proficient);

    let Json(updated) = skills::update_skill(
        State(state.clone()),
        Path(1),
        JsonBody(SkillUpdateRequest {
            category: Some("comfortable".to_string()),
            ..SkillUpdateRequest::default()
        }),
    )
    .await
    .unwrap();
    assert_eq!(updated.category, SkillCategory::Comfortable);
    assert_eq!(updated.name, "rust");

    let Json(deleted) = skills::delete_skill(State(state.clone()), Path(1))
        .await
        .unwrap();
    assert_eq!(deleted.message, "Skill deleted successfully");

    let err = skills::get_skill(State(state), Path(1)).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_skill_duplicate_id_conflicts() {
    let state = test_state();
    let _ = skills::create_skill(State(state.clone()), JsonBody(skill_request(7, "go")))
        .await
        .unwrap();

    let err = skills::create_skill(State(state), JsonBody(skill_request(7, "zig")))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_skill_invalid_category_rejected() {
    let state = test_state();
    let mut request = skill_request(2, "css");
    request.category = "expert".to_string();

    let err = skills::create_skill(State(state.clone()), JsonBody(request))
        .await
        .unwrap_err();
    assert_eq!(
        validation_errors(err),
        ["`expert` is not a valid skill category"]
    );

    let err = skills::update_skill(
        State(state),
        Path(2),
        JsonBody(SkillUpdateRequest {
            category: Some("expert".to_string()),
            ..SkillUpdateRequest::default()
        }),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

// --- Projects ---

#[tokio::test]
async fn test_project_created_with_defaults() {
    let state = test_state();
    let (status, Json(project)) =
        projects::create_project(State(state), JsonBody(project_request("portfolio")))
            .await
            .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(project.category, ProjectCategory::Fullstack);
    assert_eq!(project.order, 0);
    assert_eq!(project.date, Utc::now().format("%B %Y").to_string());
}

#[tokio::test]
async fn test_new_projects_append_to_display_order() {
    let state = test_state();
    seed_projects(&state, &["a", "b", "c"]).await;

    assert_eq!(project_ids(&state).await, ["a", "b", "c"]);
}

#[tokio::test]
async fn test_reorder_persists_sequence() {
    let state = test_state();
    seed_projects(&state, &["a", "b", "c"]).await;

    let Json(response) = projects::reorder_projects(
        State(state.clone()),
        Ok(Json(ReorderRequest {
            projects: Some(vec!["c".to_string(), "a".to_string(), "b".to_string()]),
        })),
    )
    .await
    .unwrap();

    assert_eq!(response.updated, 3);
    assert_eq!(project_ids(&state).await, ["c", "a", "b"]);

    let Json(c) = projects::get_project(State(state), Path("c".to_string()))
        .await
        .unwrap();
    assert_eq!(c.order, 0);
}

#[tokio::test]
async fn test_reorder_skips_unknown_ids() {
    let state = test_state();
    seed_projects(&state, &["a", "b"]).await;

    let Json(response) = projects::reorder_projects(
        State(state.clone()),
        Ok(Json(ReorderRequest {
            projects: Some(vec!["ghost".to_string(), "b".to_string(), "a".to_string()]),
        })),
    )
    .await
    .unwrap();

    assert_eq!(response.updated, 2);
    assert_eq!(project_ids(&state).await, ["b", "a"]);
}

#[tokio::test]
async fn test_reorder_rejects_missing_and_duplicate_lists() {
    let state = test_state();
    seed_projects(&state, &["a", "b"]).await;

    let err = projects::reorder_projects(
        State(state.clone()),
        Ok(Json(ReorderRequest { projects: None })),
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "Invalid projects data");

    let err = projects::reorder_projects(
        State(state.clone()),
        Ok(Json(ReorderRequest {
            projects: Some(vec!["a".to_string(), "a".to_string()]),
        })),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    // Nothing was written by the rejected requests.
    assert_eq!(project_ids(&state).await, ["a", "b"]);
}

#[tokio::test]
async fn test_project_partial_update_keeps_order() {
    let state = test_state();
    seed_projects(&state, &["a", "b"]).await;

    let Json(updated) = projects::update_project(
        State(state.clone()),
        Path("b".to_string()),
        JsonBody(ProjectUpdateRequest {
            name: Some("Renamed".to_string()),
            category: Some("backend".to_string()),
            ..ProjectUpdateRequest::default()
        }),
    )
    .await
    .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.category, ProjectCategory::Backend);
    assert_eq!(updated.order, 1);
    assert_eq!(updated.desc, "A thing I built");
}

#[tokio::test]
async fn test_project_delete_missing_is_not_found() {
    let state = test_state();
    let err = projects::delete_project(State(state), Path("nope".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

// --- Certificates ---

#[tokio::test]
async fn test_certificate_image_checked_first() {
    let state = test_state();
    let request = CertificateRequest {
        title: "x".to_string(),
        ..CertificateRequest::default()
    };

    let err = certificates::create_certificate(State(state), JsonBody(request))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(err.into_response().into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, serde_json::json!({ "message": "Image is required" }));
}

#[tokio::test]
async fn test_certificate_future_issue_date_rejected() {
    let state = test_state();
    let mut request = certificate_request("aws");
    request.issue_date = Some((Utc::now() + Duration::days(10)).to_rfc3339());

    let err = certificates::create_certificate(State(state), JsonBody(request))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Issue date cannot be in the future");
}

#[tokio::test]
async fn test_certificates_listed_newest_issue_first() {
    let state = test_state();
    let mut older = certificate_request("older");
    older.issue_date = Some("2021-06-15".to_string());
    let _ = certificates::create_certificate(State(state.clone()), JsonBody(older))
        .await
        .unwrap();
    let _ = certificates::create_certificate(State(state.clone()), JsonBody(certificate_request("newer")))
        .await
        .unwrap();

    let Json(list) = certificates::list_certificates(State(state.clone()))
        .await
        .unwrap();
    let ids: Vec<_> = list.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["newer", "older"]);

    let Json(updated) = certificates::update_certificate(
        State(state),
        Path("older".to_string()),
        JsonBody(CertificateUpdateRequest {
            tags: Some(vec!["cloud".to_string()]),
            ..CertificateUpdateRequest::default()
        }),
    )
    .await
    .unwrap();
    assert_eq!(updated.tags, ["cloud"]);
    assert_eq!(updated.issuer, "AWS");
}

// --- Visitors ---

fn browser_headers(user_agent: &str, forwarded_for: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::USER_AGENT, HeaderValue::from_str(user_agent).unwrap());
    if let Some(ip) = forwarded_for {
        headers.insert("x-forwarded-for", HeaderValue::from_str(ip).unwrap());
    }
    headers
}

fn visit(page: &str, source: Option<&str>) -> Query<VisitQuery> {
    Query(VisitQuery {
        page_visited: Some(page.to_string()),
        source: source.map(str::to_string),
    })
}

#[tokio::test]
async fn test_record_visit_stores_request_details() {
    let state = test_state();
    let (status, Json(recorded)) = visitors::record_visit(
        State(state.clone()),
        visit("/projects", None),
        browser_headers("Mozilla/5.0 Firefox/120.0", Some("203.0.113.7, 10.0.0.1")),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    let visitor = recorded.visitor.unwrap();
    assert_eq!(visitor.ip_address, "203.0.113.7");
    assert_eq!(visitor.source, "unknown");
    assert_eq!(visitor.page_visited, "/projects");
}

#[tokio::test]
async fn test_record_visit_excludes_admin_and_404() {
    let state = test_state();
    for page in ["/admin", "/admin/projects", "/404"] {
        let (status, Json(recorded)) = visitors::record_visit(
            State(state.clone()),
            visit(page, Some("direct")),
            browser_headers("Mozilla/5.0 Chrome/120.0", None),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::OK);
        assert!(recorded.visitor.is_none());
    }

    let Json(stats) = visitors::visitor_stats(State(state)).await.unwrap();
    assert_eq!(stats.total_visitors, 0);
}

#[tokio::test]
async fn test_record_visit_requires_page_and_user_agent() {
    let state = test_state();
    let err = visitors::record_visit(
        State(state),
        Query(VisitQuery::default()),
        HeaderMap::new(),
    )
    .await
    .unwrap_err();

    assert_eq!(
        validation_errors(err),
        ["pageVisited is required", "userAgent is required"]
    );
}

#[tokio::test]
async fn test_visitor_list_pagination_and_reset() {
    let state = test_state();
    for i in 0..12 {
        let _ = visitors::record_visit(
            State(state.clone()),
            visit(&format!("/page-{i}"), Some("google")),
            browser_headers("Mozilla/5.0 Safari/605.1.15", None),
        )
        .await
        .unwrap();
    }

    let Json(first) = visitors::list_visitors(
        State(state.clone()),
        Query(VisitorListQuery::default()),
    )
    .await
    .unwrap();
    assert_eq!(first.visitors.len(), 10);
    assert_eq!(first.total, 12);
    assert_eq!(first.total_pages, 2);
    assert_eq!(first.visitors[0].page_visited, "/page-11");

    let Json(second) = visitors::list_visitors(
        State(state.clone()),
        Query(VisitorListQuery {
            page: Some(2),
            limit: Some(10),
        }),
    )
    .await
    .unwrap();
    assert_eq!(second.visitors.len(), 2);
    assert_eq!(second.page, 2);

    let Json(reset) = visitors::reset_visitors(State(state.clone())).await.unwrap();
    assert_eq!(reset.message, "Deleted 12 visitor records");

    let Json(stats) = visitors::visitor_stats(State(state)).await.unwrap();
    assert_eq!(stats.total_visitors, 0);
}

#[tokio::test]
async fn test_visitor_list_page_far_past_the_end() {
    let state = test_state();
    let _ = visitors::record_visit(
        State(state.clone()),
        visit("/", Some("google")),
        browser_headers("Mozilla/5.0 Chrome/120.0", None),
    )
    .await
    .unwrap();

    let Json(listed) = visitors::list_visitors(
        State(state),
        Query(VisitorListQuery {
            page: Some(i64::MAX),
            limit: Some(10),
        }),
    )
    .await
    .unwrap();
    assert!(listed.visitors.is_empty());
    assert_eq!(listed.total, 1);
    assert_eq!(listed.page, i64::MAX);
    assert_eq!(listed.total_pages, 1);
}

// --- Session & Settings ---

async fn state_with_admin() -> (AppState, AuthAdmin) {
    let state = test_state();
    let admin = state
        .repo
        .create_admin(auth::new_admin("owner", "old-password"))
        .await
        .unwrap();
    (state, admin.into())
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let (state, _) = state_with_admin().await;
    let response = session::login(
        State(state),
        JsonBody(LoginRequest {
            username: "owner".to_string(),
            password: "old-password".to_string(),
        }),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("admin_token="));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_login_wrong_password_is_unauthorized() {
    let (state, _) = state_with_admin().await;
    let err = session::login(
        State(state),
        JsonBody(LoginRequest {
            username: "owner".to_string(),
            password: "guess".to_string(),
        }),
    )
    .await
    .err()
    .unwrap();

    assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(err.to_string(), "Invalid credentials");
}

#[tokio::test]
async fn test_settings_require_current_password() {
    let (state, admin) = state_with_admin().await;
    let err = session::update_settings(
        admin,
        State(state),
        JsonBody(SettingsRequest {
            new_username: Some("renamed".to_string()),
            current_password: Some("wrong".to_string()),
            new_password: None,
        }),
    )
    .await
    .err()
    .unwrap();

    assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_settings_change_username_and_password() {
    let (state, admin) = state_with_admin().await;
    let response = session::update_settings(
        admin,
        State(state.clone()),
        JsonBody(SettingsRequest {
            new_username: Some("renamed".to_string()),
            current_password: Some("old-password".to_string()),
            new_password: Some("new-password".to_string()),
        }),
    )
    .await
    .unwrap()
    .into_response();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(header::SET_COOKIE));

    let stored = state
        .repo
        .find_admin_by_username("renamed")
        .await
        .unwrap()
        .unwrap();
    assert!(auth::verify_password(&stored, "new-password"));
    assert!(state.repo.find_admin_by_username("owner").await.unwrap().is_none());
}

async fn settings_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_settings_without_changes_still_succeeds() {
    let (state, admin) = state_with_admin().await;
    let response = session::update_settings(
        admin,
        State(state),
        JsonBody(SettingsRequest::default()),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        settings_body(response).await,
        serde_json::json!({ "message": "Settings updated successfully", "username": "owner" })
    );
}

#[tokio::test]
async fn test_settings_same_username_is_not_a_rename() {
    let (state, admin) = state_with_admin().await;
    let err = session::update_settings(
        admin.clone(),
        State(state.clone()),
        JsonBody(SettingsRequest {
            new_username: Some("owner".to_string()),
            current_password: Some("wrong".to_string()),
            new_password: None,
        }),
    )
    .await
    .err()
    .unwrap();
    assert_eq!(err.status(), StatusCode::UNAUTHORIZED);

    let response = session::update_settings(
        admin,
        State(state.clone()),
        JsonBody(SettingsRequest {
            new_username: Some(" owner ".to_string()),
            current_password: Some("old-password".to_string()),
            new_password: None,
        }),
    )
    .await
    .unwrap()
    .into_response();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(settings_body(response).await["username"], "owner");
    assert!(state.repo.find_admin_by_username("owner").await.unwrap().is_some());
}

#[tokio::test]
async fn test_settings_taken_username_is_bad_request() {
    let (state, admin) = state_with_admin().await;
    state
        .repo
        .create_admin(auth::new_admin("other", "pw"))
        .await
        .unwrap();

    let err = session::update_settings(
        admin,
        State(state),
        JsonBody(SettingsRequest {
            new_username: Some("other".to_string()),
            current_password: Some("old-password".to_string()),
            new_password: None,
        }),
    )
    .await
    .err()
    .unwrap();

    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(err.to_string(), "Username already exists");
}

#[tokio::test]
async fn test_preview_uses_site_markup() {
    let Json(preview) = session::preview_markup(JsonBody(PreviewRequest {
        text: "<b>hi</b>\n**there**".to_string(),
    }))
    .await;

    assert_eq!(
        preview.html,
        r#"&lt;b&gt;hi&lt;/b&gt;<br /><strong class="font-bold">there</strong>"#
    );
}

#[tokio::test]
async fn test_content_overview_counts() {
    let state = test_state();
    seed_projects(&state, &["a", "b"]).await;
    let _ = skills::create_skill(State(state.clone()), JsonBody(skill_request(1, "rust")))
        .await
        .unwrap();

    let Json(overview) = session::content_overview(State(state)).await.unwrap();
    assert_eq!(overview.projects, 2);
    assert_eq!(overview.skills, 1);
    assert_eq!(overview.certificates, 0);
}
