use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
};
use chrono::Utc;

use crate::{
    AppState,
    analytics::{self, is_excluded_page},
    error::{AppError, FieldErrors},
    models::{
        MessageResponse, NewVisit, VisitQuery, VisitRecorded, VisitorListQuery, VisitorPage,
        VisitorStats,
    },
};

const UNKNOWN: &str = "unknown";

/// Client address: first `x-forwarded-for` hop when behind a proxy.
fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .unwrap_or(UNKNOWN)
        .to_string()
}

/// record_visit
///
/// [Public Route] Tracking hit sent by every public page on load. Admin pages
/// and the 404 page are acknowledged but not stored.
#[utoipa::path(
    get,
    path = "/api/visitor-count",
    params(VisitQuery),
    responses(
        (status = 201, description = "Visit recorded", body = VisitRecorded),
        (status = 200, description = "Page excluded from tracking", body = VisitRecorded),
        (status = 400, description = "Missing page or user agent")
    )
)]
pub async fn record_visit(
    State(state): State<AppState>,
    Query(query): Query<VisitQuery>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<VisitRecorded>), AppError> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let page_visited = query.page_visited.unwrap_or_default();

    let mut errors = FieldErrors::new();
    errors
        .require("pageVisited", &page_visited)
        .require("userAgent", &user_agent);
    errors.into_result()?;

    if is_excluded_page(&page_visited) {
        return Ok((
            StatusCode::OK,
            Json(VisitRecorded {
                success: true,
                message: "Page excluded from tracking".to_string(),
                visitor: None,
            }),
        ));
    }

    let visit = NewVisit {
        ip_address: client_ip(&headers),
        user_agent,
        page_visited,
        source: query
            .source
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN.to_string()),
    };
    let visitor = state.repo.record_visit(visit).await?;
    tracing::debug!(page = %visitor.page_visited, source = %visitor.source, "visit recorded");

    Ok((
        StatusCode::CREATED,
        Json(VisitRecorded {
            success: true,
            message: "Visit recorded".to_string(),
            visitor: Some(visitor),
        }),
    ))
}

/// visitor_stats
///
/// [Public Route] Aggregates for the analytics dashboard: total, daily counts
/// over the last 30 days, top pages, browser families and top sources.
#[utoipa::path(
    get,
    path = "/api/visitors/stats",
    responses((status = 200, description = "Statistics", body = VisitorStats))
)]
pub async fn visitor_stats(State(state): State<AppState>) -> Result<Json<VisitorStats>, AppError> {
    Ok(Json(state.repo.visitor_stats(Utc::now()).await?))
}

/// list_visitors
///
/// [Admin Route] Raw visit log, newest first, paginated.
#[utoipa::path(
    get,
    path = "/api/visitors/list",
    params(VisitorListQuery),
    responses((status = 200, description = "Page of visits", body = VisitorPage))
)]
pub async fn list_visitors(
    State(state): State<AppState>,
    Query(query): Query<VisitorListQuery>,
) -> Result<Json<VisitorPage>, AppError> {
    let (page, limit) = analytics::normalize_paging(query.page, query.limit);
    let (visitors, total) = state.repo.list_visitors(page, limit).await?;
    Ok(Json(VisitorPage {
        visitors,
        total,
        page,
        total_pages: analytics::total_pages(total, limit),
    }))
}

/// reset_visitors
///
/// [Admin Route] Deletes the entire visit log.
#[utoipa::path(
    delete,
    path = "/api/visitors/reset",
    responses((status = 200, description = "Log cleared", body = MessageResponse))
)]
pub async fn reset_visitors(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    let removed = state.repo.reset_visitors().await?;
    tracing::warn!(removed, "visitor log reset");
    Ok(Json(MessageResponse::new(format!(
        "Deleted {removed} visitor records"
    ))))
}
