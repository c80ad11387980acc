//! Visitor statistics.
//!
//! `PostgresRepository` computes these with SQL aggregates; the functions
//! here are the in-process equivalent used by `MemoryRepository`, and they
//! define the reference semantics both must agree on.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::models::{CountBucket, Visitor, VisitorStats};

/// Length of the daily-visits window.
pub const DAILY_WINDOW_DAYS: i64 = 30;
/// Number of entries kept for the page and source rankings.
pub const TOP_N: usize = 5;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Browser families in match priority order. A user agent is assigned to the
/// first family whose marker it contains.
pub const BROWSER_FAMILIES: [&str; 4] = ["Chrome", "Firefox", "Safari", "Edge"];
pub const OTHER_BROWSER: &str = "Other";

/// Paths that are never recorded as page views.
pub fn is_excluded_page(page: &str) -> bool {
    page.starts_with("/admin") || page == "/404"
}

pub fn classify_browser(user_agent: &str) -> &'static str {
    BROWSER_FAMILIES
        .into_iter()
        .find(|family| user_agent.contains(family))
        .unwrap_or(OTHER_BROWSER)
}

/// Start of the daily-visits window relative to `now`.
pub fn window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(DAILY_WINDOW_DAYS)
}

/// Normalizes `page`/`limit` query values: anything below 1 falls back to
/// the defaults, and the page size is capped.
pub fn normalize_paging(page: Option<i64>, limit: Option<i64>) -> (i64, i64) {
    let page = page.filter(|p| *p >= 1).unwrap_or(1);
    let limit = limit
        .filter(|l| *l >= 1)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .min(MAX_PAGE_SIZE);
    (page, limit)
}

/// Row offset for a normalized page, or `None` when it does not fit in `i64`.
pub fn page_offset(page: i64, limit: i64) -> Option<i64> {
    page.checked_sub(1)?.checked_mul(limit)
}

pub fn total_pages(total: i64, limit: i64) -> i64 {
    if limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

/// Sorts buckets by count (descending), breaking ties by label.
pub fn rank(counts: HashMap<String, i64>, keep: Option<usize>) -> Vec<CountBucket> {
    let mut buckets: Vec<CountBucket> = counts
        .into_iter()
        .map(|(label, count)| CountBucket { label, count })
        .collect();
    buckets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    if let Some(n) = keep {
        buckets.truncate(n);
    }
    buckets
}

/// summarize
///
/// Builds the dashboard statistics from raw visit records.
pub fn summarize(visitors: &[Visitor], now: DateTime<Utc>) -> VisitorStats {
    let since = window_start(now);

    let mut daily: HashMap<String, i64> = HashMap::new();
    let mut pages: HashMap<String, i64> = HashMap::new();
    let mut browsers: HashMap<String, i64> = HashMap::new();
    let mut sources: HashMap<String, i64> = HashMap::new();

    for visit in visitors {
        if visit.timestamp >= since {
            *daily
                .entry(visit.timestamp.format("%Y-%m-%d").to_string())
                .or_default() += 1;
        }
        *pages.entry(visit.page_visited.clone()).or_default() += 1;
        *browsers
            .entry(classify_browser(&visit.user_agent).to_string())
            .or_default() += 1;
        *sources.entry(visit.source.clone()).or_default() += 1;
    }

    let mut last_30_days: Vec<CountBucket> = daily
        .into_iter()
        .map(|(label, count)| CountBucket { label, count })
        .collect();
    last_30_days.sort_by(|a, b| a.label.cmp(&b.label));

    VisitorStats {
        total_visitors: visitors.len() as i64,
        last_30_days,
        page_visits: rank(pages, Some(TOP_N)),
        user_agents: rank(browsers, None),
        sources: rank(sources, Some(TOP_N)),
    }
}
