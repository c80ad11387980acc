use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    About, AboutContent, Admin, Certificate, CertificatePatch, ContentOverview, Home, HomeContent,
    NewCertificate, NewProject, NewSkill, NewVisit, Project, ProjectPatch, Skill, SkillPatch,
    Visitor, VisitorStats,
};

mod memory;
mod postgres;

pub use memory::MemoryRepository;
pub use postgres::PostgresRepository;

/// RepositoryError
///
/// Failures surfaced by the persistence layer. `Conflict` is the only one a
/// client can cause (a duplicate admin-assigned id or username).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{0}")]
    Conflict(String),

    #[error("stored row is invalid: {0}")]
    Corrupt(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type RepoResult<T> = Result<T, RepositoryError>;

/// Repository Trait
///
/// The persistence contract for every content collection, the visitor log
/// and the admin account. Handlers only ever see `Arc<dyn Repository>`, so
/// the Postgres store and the in-memory store are interchangeable.
///
/// Lookups return `Ok(None)` for a missing document; update/delete return
/// `Ok(None)`/`Ok(false)` when the id does not exist.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Home / About (singletons) ---
    async fn get_home(&self) -> RepoResult<Option<Home>>;
    /// Replaces the stored home document, creating it on first save.
    async fn upsert_home(&self, content: HomeContent) -> RepoResult<Home>;
    async fn get_about(&self) -> RepoResult<Option<About>>;
    async fn upsert_about(&self, content: AboutContent) -> RepoResult<About>;

    // --- Skills ---
    /// Newest first.
    async fn list_skills(&self) -> RepoResult<Vec<Skill>>;
    async fn get_skill(&self, id: i64) -> RepoResult<Option<Skill>>;
    async fn create_skill(&self, skill: NewSkill) -> RepoResult<Skill>;
    async fn update_skill(&self, id: i64, patch: SkillPatch) -> RepoResult<Option<Skill>>;
    async fn delete_skill(&self, id: i64) -> RepoResult<bool>;

    // --- Projects ---
    /// Display order: `order` ascending, then newest first.
    async fn list_projects(&self) -> RepoResult<Vec<Project>>;
    async fn get_project(&self, id: &str) -> RepoResult<Option<Project>>;
    /// Inserts the project after the current last position.
    async fn create_project(&self, project: NewProject) -> RepoResult<Project>;
    async fn update_project(&self, id: &str, patch: ProjectPatch) -> RepoResult<Option<Project>>;
    async fn delete_project(&self, id: &str) -> RepoResult<bool>;
    /// Writes `order = index` for every listed id in a single atomic step.
    /// Unknown ids are skipped; returns how many projects were updated.
    async fn reorder_projects(&self, ids: &[String]) -> RepoResult<u64>;

    // --- Certificates ---
    /// Most recent `issue_date` first.
    async fn list_certificates(&self) -> RepoResult<Vec<Certificate>>;
    async fn get_certificate(&self, id: &str) -> RepoResult<Option<Certificate>>;
    async fn create_certificate(&self, certificate: NewCertificate) -> RepoResult<Certificate>;
    async fn update_certificate(
        &self,
        id: &str,
        patch: CertificatePatch,
    ) -> RepoResult<Option<Certificate>>;
    async fn delete_certificate(&self, id: &str) -> RepoResult<bool>;

    // --- Visitors ---
    async fn record_visit(&self, visit: NewVisit) -> RepoResult<Visitor>;
    /// Newest first, `page` is 1-based. Returns the page and the total count.
    async fn list_visitors(&self, page: i64, limit: i64) -> RepoResult<(Vec<Visitor>, i64)>;
    async fn visitor_stats(&self, now: DateTime<Utc>) -> RepoResult<VisitorStats>;
    /// Deletes every visit record and returns how many were removed.
    async fn reset_visitors(&self) -> RepoResult<u64>;

    // --- Admin ---
    async fn get_admin(&self, id: Uuid) -> RepoResult<Option<Admin>>;
    async fn find_admin_by_username(&self, username: &str) -> RepoResult<Option<Admin>>;
    async fn count_admins(&self) -> RepoResult<i64>;
    async fn create_admin(&self, admin: Admin) -> RepoResult<Admin>;
    /// Persists a new username and/or credential pair for an existing admin.
    async fn update_admin(&self, admin: Admin) -> RepoResult<Option<Admin>>;

    async fn content_overview(&self) -> RepoResult<ContentOverview>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer across the application state.
pub type RepositoryState = Arc<dyn Repository>;
