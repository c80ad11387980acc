use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

// --- Enumerations ---

/// SkillCategory
///
/// Groups skills into the three columns of the public skills page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SkillCategory {
    Proficient,
    Comfortable,
    #[default]
    Other,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 3] = [
        SkillCategory::Proficient,
        SkillCategory::Comfortable,
        SkillCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::Proficient => "proficient",
            SkillCategory::Comfortable => "comfortable",
            SkillCategory::Other => "other",
        }
    }
}

impl FromStr for SkillCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkillCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("`{s}` is not a valid skill category"))
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ProjectCategory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ProjectCategory {
    Frontend,
    Backend,
    Fullstack,
    #[default]
    Misc,
}

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 4] = [
        ProjectCategory::Frontend,
        ProjectCategory::Backend,
        ProjectCategory::Fullstack,
        ProjectCategory::Misc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectCategory::Frontend => "frontend",
            ProjectCategory::Backend => "backend",
            ProjectCategory::Fullstack => "fullstack",
            ProjectCategory::Misc => "misc",
        }
    }
}

impl FromStr for ProjectCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("`{s}` is not a valid project category"))
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Home Section (singleton) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct HomePhoto {
    pub url: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct SocialLink {
    pub name: String,
    pub link: String,
}

/// HomeContent
///
/// The editable body of the hero section. `intro` and every `status` line may
/// use the `[[highlight]]` / `**bold**` markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct HomeContent {
    pub photo: HomePhoto,
    pub tagline: String,
    pub tagline2: String,
    pub intro: String,
    pub status: Vec<String>,
    pub socials: Vec<SocialLink>,
    pub resumelink: String,
}

impl HomeContent {
    /// Content served before the admin has saved anything, so the hero
    /// section always renders with the expected shape.
    pub fn placeholder(owner_name: &str) -> Self {
        Self {
            photo: HomePhoto {
                url: String::new(),
                alt: owner_name.to_string(),
            },
            status: vec![String::new(); 3],
            socials: ["instagram", "linkedin", "github"]
                .into_iter()
                .map(|name| SocialLink {
                    name: name.to_string(),
                    link: String::new(),
                })
                .collect(),
            ..Self::default()
        }
    }
}

/// Home
///
/// A stored home document.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Home {
    #[serde(flatten)]
    pub content: HomeContent,
    #[serde(rename = "createdAt")]
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// HomeView
///
/// Public read model: the stored content plus its markup rendered to HTML.
/// Timestamps are absent while the placeholder is being served.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct HomeView {
    #[serde(flatten)]
    pub content: HomeContent,
    #[serde(rename = "introHtml")]
    pub intro_html: String,
    #[serde(rename = "statusHtml")]
    pub status_html: Vec<String>,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    pub updated_at: Option<DateTime<Utc>>,
}

// --- About Section (singleton) ---

/// AboutContent
///
/// Field names follow the keys the admin panel already posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct AboutContent {
    pub name: String,
    #[serde(rename = "profileImage")]
    pub profile_image: String,
    pub about_1: String,
    pub what_i_love: String,
    pub my_hobbies: String,
    pub apps_i_use: String,
    pub my_journey: String,
    pub fun_fact: String,
}

impl AboutContent {
    /// The free-text sections, keyed by their JSON field name.
    pub fn sections(&self) -> [(&'static str, &str); 6] {
        [
            ("about_1", &self.about_1),
            ("what_i_love", &self.what_i_love),
            ("my_hobbies", &self.my_hobbies),
            ("apps_i_use", &self.apps_i_use),
            ("my_journey", &self.my_journey),
            ("fun_fact", &self.fun_fact),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct About {
    #[serde(flatten)]
    pub content: AboutContent,
    #[serde(rename = "createdAt")]
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// AboutView
///
/// Public read model for the about page; `html` maps each text section name
/// to its rendered markup.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct AboutView {
    #[serde(flatten)]
    pub about: About,
    pub html: BTreeMap<String, String>,
}

// --- Skills ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Skill {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub category: SkillCategory,
    #[serde(rename = "createdAt")]
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// SkillRequest
///
/// Raw create payload. Fields are loose (`Option`/`String`) so missing or
/// mistyped values surface as validation messages instead of a body
/// rejection.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct SkillRequest {
    pub id: Option<i64>,
    pub name: String,
    pub icon: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct SkillUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A validated skill ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSkill {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub category: SkillCategory,
}

/// A validated partial skill update; `None` leaves the stored value alone.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SkillPatch {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub category: Option<SkillCategory>,
}

// --- Projects ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct Technology {
    pub name: String,
    pub style: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct ProjectLinks {
    pub github: Option<String>,
    pub live: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct ProjectDetails {
    pub title: Option<String>,
    pub desc: Option<String>,
    pub features: Vec<String>,
}

/// Project
///
/// A portfolio project. `order` is the display position written by the
/// drag-and-drop reorder endpoint; lower values are shown first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Project {
    pub id: String,
    pub category: ProjectCategory,
    pub cover: String,
    pub name: String,
    pub desc: String,
    pub technologies: Vec<Technology>,
    pub links: ProjectLinks,
    pub details: ProjectDetails,
    pub date: String,
    pub order: i32,
    #[serde(rename = "createdAt")]
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct ProjectRequest {
    pub id: String,
    pub category: String,
    pub cover: String,
    pub name: String,
    pub desc: String,
    pub technologies: Vec<Technology>,
    pub links: ProjectLinks,
    pub details: ProjectDetails,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct ProjectUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<Technology>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<ProjectLinks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ProjectDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub id: String,
    pub category: ProjectCategory,
    pub cover: String,
    pub name: String,
    pub desc: String,
    pub technologies: Vec<Technology>,
    pub links: ProjectLinks,
    pub details: ProjectDetails,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectPatch {
    pub category: Option<ProjectCategory>,
    pub cover: Option<String>,
    pub name: Option<String>,
    pub desc: Option<String>,
    pub technologies: Option<Vec<Technology>>,
    pub links: Option<ProjectLinks>,
    pub details: Option<ProjectDetails>,
    pub date: Option<String>,
}

/// ReorderRequest
///
/// Project ids in their new display sequence.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ReorderRequest {
    pub projects: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ReorderResponse {
    pub message: String,
    /// Number of projects whose position was written.
    pub updated: u64,
}

// --- Certificates ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Certificate {
    pub id: String,
    pub title: String,
    pub image: String,
    pub issuer: String,
    #[serde(rename = "issueDate")]
    #[ts(type = "string")]
    pub issue_date: DateTime<Utc>,
    #[serde(rename = "credentialLink")]
    pub credential_link: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    #[serde(rename = "createdAt")]
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// CertificateRequest
///
/// `issueDate` is accepted either as RFC 3339 or as a plain `YYYY-MM-DD`
/// date (what an HTML date input produces).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct CertificateRequest {
    pub id: String,
    pub title: String,
    pub image: String,
    pub issuer: String,
    #[serde(rename = "issueDate")]
    pub issue_date: Option<String>,
    #[serde(rename = "credentialLink")]
    pub credential_link: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct CertificateUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(rename = "issueDate", skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<String>,
    #[serde(rename = "credentialLink", skip_serializing_if = "Option::is_none")]
    pub credential_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCertificate {
    pub id: String,
    pub title: String,
    pub image: String,
    pub issuer: String,
    pub issue_date: DateTime<Utc>,
    pub credential_link: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CertificatePatch {
    pub title: Option<String>,
    pub image: Option<String>,
    pub issuer: Option<String>,
    pub issue_date: Option<DateTime<Utc>>,
    pub credential_link: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

// --- Visitors ---

/// Visitor
///
/// One recorded page view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Visitor {
    pub id: Uuid,
    #[serde(rename = "ipAddress")]
    pub ip_address: String,
    #[serde(rename = "userAgent")]
    pub user_agent: String,
    #[serde(rename = "pageVisited")]
    pub page_visited: String,
    pub source: String,
    #[ts(type = "string")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewVisit {
    pub ip_address: String,
    pub user_agent: String,
    pub page_visited: String,
    pub source: String,
}

#[derive(Debug, Clone, Deserialize, IntoParams, Default)]
#[into_params(parameter_in = Query)]
pub struct VisitQuery {
    #[serde(rename = "pageVisited")]
    pub page_visited: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct VisitRecorded {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visitor: Option<Visitor>,
}

#[derive(Debug, Clone, Deserialize, IntoParams, Default)]
#[into_params(parameter_in = Query)]
pub struct VisitorListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct VisitorPage {
    pub visitors: Vec<Visitor>,
    pub total: i64,
    pub page: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

/// CountBucket
///
/// One bar/slice of a statistics chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CountBucket {
    pub label: String,
    pub count: i64,
}

impl CountBucket {
    pub fn new(label: impl Into<String>, count: i64) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct VisitorStats {
    #[serde(rename = "totalVisitors")]
    pub total_visitors: i64,
    /// Daily counts (`YYYY-MM-DD`, UTC) over the last 30 days, oldest first.
    #[serde(rename = "last30Days")]
    pub last_30_days: Vec<CountBucket>,
    #[serde(rename = "pageVisits")]
    pub page_visits: Vec<CountBucket>,
    #[serde(rename = "userAgents")]
    pub user_agents: Vec<CountBucket>,
    pub sources: Vec<CountBucket>,
}

// --- Admin Account & Session ---

/// Admin
///
/// Stored admin account. Never serialized into a response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Admin {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub password_salt: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct SettingsRequest {
    #[serde(rename = "newUsername", skip_serializing_if = "Option::is_none")]
    pub new_username: Option<String>,
    #[serde(rename = "currentPassword", skip_serializing_if = "Option::is_none")]
    pub current_password: Option<String>,
    #[serde(rename = "newPassword", skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SettingsResponse {
    pub message: String,
    pub username: String,
}

/// ContentOverview
///
/// Document counts shown on the admin dashboard cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ContentOverview {
    pub skills: i64,
    pub projects: i64,
    pub certificates: i64,
    pub visitors: i64,
}

// --- Markup Preview ---

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct PreviewRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct PreviewResponse {
    pub html: String,
}

// --- Media Uploads ---

/// ImageUploadRequest
///
/// A base64 data URL (`data:image/png;base64,...`).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct ImageUploadRequest {
    pub image: Option<String>,
}

/// HomeUploadRequest
///
/// `type` selects between the hero `photo` and the `resume` PDF.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct HomeUploadRequest {
    pub image: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct ResumeUploadRequest {
    pub file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UploadResponse {
    /// Public URL of the stored object.
    pub url: String,
    /// Object key inside the media bucket.
    pub public_id: String,
    /// Forced-download URL, only set for resumes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

/// PresignedUrlRequest
///
/// Input payload for requesting a short-lived upload URL for large files the
/// browser sends straight to the media bucket.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, TS, Default)]
#[ts(export)]
pub struct PresignedUrlRequest {
    #[schema(example = "resume.pdf")]
    pub filename: String,
    #[schema(example = "application/pdf")]
    pub file_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, TS, Default)]
#[ts(export)]
pub struct PresignedUrlResponse {
    pub upload_url: String,
    pub resource_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
