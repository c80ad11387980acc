use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, types::Json};
use uuid::Uuid;

use super::{RepoResult, Repository, RepositoryError};
use crate::{
    analytics::{self, BROWSER_FAMILIES, OTHER_BROWSER, TOP_N},
    models::{
        About, AboutContent, Admin, Certificate, CertificatePatch, ContentOverview, CountBucket,
        Home, HomeContent, HomePhoto, NewCertificate, NewProject, NewSkill, NewVisit, Project,
        ProjectDetails, ProjectLinks, ProjectPatch, Skill, SkillPatch, SocialLink, Technology,
        Visitor, VisitorStats,
    },
};

// --- Column Lists ---

const HOME_COLUMNS: &str = "photo_url, photo_alt, tagline, tagline2, intro, status, socials, \
                            resume_link, created_at, updated_at";
const ABOUT_COLUMNS: &str = "name, profile_image, about_1, what_i_love, my_hobbies, apps_i_use, \
                             my_journey, fun_fact, created_at, updated_at";
const SKILL_COLUMNS: &str = "id, name, icon, category, created_at, updated_at";
const PROJECT_COLUMNS: &str = "id, category, cover, name, description, technologies, links, \
                               details, display_date, display_order, created_at, updated_at";
const CERTIFICATE_COLUMNS: &str = "id, title, image, issuer, issue_date, credential_link, \
                                   description, tags, created_at, updated_at";
const VISITOR_COLUMNS: &str = "id, ip_address, user_agent, page_visited, source, visited_at";
const ADMIN_COLUMNS: &str = "id, username, password_hash, password_salt, created_at";

// --- Row Types ---
//
// Rows mirror the table layout; JSONB columns decode through `sqlx::types::Json`
// and enum columns are stored as text and parsed on the way out.

#[derive(FromRow)]
struct HomeRow {
    photo_url: String,
    photo_alt: String,
    tagline: String,
    tagline2: String,
    intro: String,
    status: Json<Vec<String>>,
    socials: Json<Vec<SocialLink>>,
    resume_link: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<HomeRow> for Home {
    fn from(row: HomeRow) -> Self {
        Home {
            content: HomeContent {
                photo: HomePhoto {
                    url: row.photo_url,
                    alt: row.photo_alt,
                },
                tagline: row.tagline,
                tagline2: row.tagline2,
                intro: row.intro,
                status: row.status.0,
                socials: row.socials.0,
                resumelink: row.resume_link,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(FromRow)]
struct AboutRow {
    name: String,
    profile_image: String,
    about_1: String,
    what_i_love: String,
    my_hobbies: String,
    apps_i_use: String,
    my_journey: String,
    fun_fact: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AboutRow> for About {
    fn from(row: AboutRow) -> Self {
        About {
            content: AboutContent {
                name: row.name,
                profile_image: row.profile_image,
                about_1: row.about_1,
                what_i_love: row.what_i_love,
                my_hobbies: row.my_hobbies,
                apps_i_use: row.apps_i_use,
                my_journey: row.my_journey,
                fun_fact: row.fun_fact,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(FromRow)]
struct SkillRow {
    id: i64,
    name: String,
    icon: String,
    category: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SkillRow> for Skill {
    type Error = RepositoryError;

    fn try_from(row: SkillRow) -> Result<Self, Self::Error> {
        Ok(Skill {
            category: row.category.parse().map_err(RepositoryError::Corrupt)?,
            id: row.id,
            name: row.name,
            icon: row.icon,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(FromRow)]
struct ProjectRow {
    id: String,
    category: String,
    cover: String,
    name: String,
    description: String,
    technologies: Json<Vec<Technology>>,
    links: Json<ProjectLinks>,
    details: Json<ProjectDetails>,
    display_date: String,
    display_order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProjectRow> for Project {
    type Error = RepositoryError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        Ok(Project {
            category: row.category.parse().map_err(RepositoryError::Corrupt)?,
            id: row.id,
            cover: row.cover,
            name: row.name,
            desc: row.description,
            technologies: row.technologies.0,
            links: row.links.0,
            details: row.details.0,
            date: row.display_date,
            order: row.display_order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(FromRow)]
struct CertificateRow {
    id: String,
    title: String,
    image: String,
    issuer: String,
    issue_date: DateTime<Utc>,
    credential_link: Option<String>,
    description: Option<String>,
    tags: Json<Vec<String>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CertificateRow> for Certificate {
    fn from(row: CertificateRow) -> Self {
        Certificate {
            id: row.id,
            title: row.title,
            image: row.image,
            issuer: row.issuer,
            issue_date: row.issue_date,
            credential_link: row.credential_link,
            description: row.description,
            tags: row.tags.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(FromRow)]
struct VisitorRow {
    id: Uuid,
    ip_address: String,
    user_agent: String,
    page_visited: String,
    source: String,
    visited_at: DateTime<Utc>,
}

impl From<VisitorRow> for Visitor {
    fn from(row: VisitorRow) -> Self {
        Visitor {
            id: row.id,
            ip_address: row.ip_address,
            user_agent: row.user_agent,
            page_visited: row.page_visited,
            source: row.source,
            timestamp: row.visited_at,
        }
    }
}

#[derive(FromRow)]
struct AdminRow {
    id: Uuid,
    username: String,
    password_hash: String,
    password_salt: String,
    created_at: DateTime<Utc>,
}

impl From<AdminRow> for Admin {
    fn from(row: AdminRow) -> Self {
        Admin {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            password_salt: row.password_salt,
            created_at: row.created_at,
        }
    }
}

#[derive(FromRow)]
struct CountRow {
    label: String,
    count: i64,
}

impl From<CountRow> for CountBucket {
    fn from(row: CountRow) -> Self {
        CountBucket::new(row.label, row.count)
    }
}

#[derive(FromRow)]
struct OverviewRow {
    skills: i64,
    projects: i64,
    certificates: i64,
    visitors: i64,
}

/// Maps a unique-key violation to `Conflict`, everything else to `Database`.
fn insert_error(e: sqlx::Error, conflict_message: &str) -> RepositoryError {
    let unique_violation = e
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());
    if unique_violation {
        RepositoryError::Conflict(conflict_message.to_string())
    } else {
        RepositoryError::Database(e)
    }
}

/// `CASE` expression bucketing `user_agent` into browser families, in the
/// same priority order as `analytics::classify_browser`.
fn browser_case_sql() -> String {
    let arms: String = BROWSER_FAMILIES
        .iter()
        .map(|family| format!("WHEN user_agent LIKE '%{family}%' THEN '{family}' "))
        .collect();
    format!("CASE {arms}ELSE '{OTHER_BROWSER}' END")
}

/// PostgresRepository
///
/// The production `Repository`, backed by the PostgreSQL schema in
/// `migrations/`.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }

    async fn count(&self, table: &str) -> RepoResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {table}");
        Ok(sqlx::query_scalar::<_, i64>(&sql).fetch_one(&self.pool).await?)
    }

    async fn ranked(&self, label_expr: &str, limit: Option<usize>) -> RepoResult<Vec<CountBucket>> {
        let mut sql = format!(
            "SELECT {label_expr} AS label, COUNT(*) AS count FROM visitors \
             GROUP BY 1 ORDER BY 2 DESC, 1 ASC"
        );
        if let Some(n) = limit {
            sql.push_str(&format!(" LIMIT {n}"));
        }
        let rows = sqlx::query_as::<_, CountRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(CountBucket::from).collect())
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    // --- HOME / ABOUT ---

    async fn get_home(&self) -> RepoResult<Option<Home>> {
        let sql = format!("SELECT {HOME_COLUMNS} FROM home_content WHERE slot = 1");
        let row = sqlx::query_as::<_, HomeRow>(&sql)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Home::from))
    }

    /// upsert_home
    ///
    /// The singleton row is pinned to `slot = 1`, so the insert either creates
    /// the document or overwrites it in place while keeping `created_at`.
    async fn upsert_home(&self, content: HomeContent) -> RepoResult<Home> {
        let sql = format!(
            r#"
            INSERT INTO home_content
                (slot, photo_url, photo_alt, tagline, tagline2, intro, status, socials, resume_link)
            VALUES (1, $1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (slot) DO UPDATE SET
                photo_url = EXCLUDED.photo_url,
                photo_alt = EXCLUDED.photo_alt,
                tagline = EXCLUDED.tagline,
                tagline2 = EXCLUDED.tagline2,
                intro = EXCLUDED.intro,
                status = EXCLUDED.status,
                socials = EXCLUDED.socials,
                resume_link = EXCLUDED.resume_link,
                updated_at = NOW()
            RETURNING {HOME_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, HomeRow>(&sql)
            .bind(&content.photo.url)
            .bind(&content.photo.alt)
            .bind(&content.tagline)
            .bind(&content.tagline2)
            .bind(&content.intro)
            .bind(Json(&content.status))
            .bind(Json(&content.socials))
            .bind(&content.resumelink)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn get_about(&self) -> RepoResult<Option<About>> {
        let sql = format!("SELECT {ABOUT_COLUMNS} FROM about_content WHERE slot = 1");
        let row = sqlx::query_as::<_, AboutRow>(&sql)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(About::from))
    }

    async fn upsert_about(&self, content: AboutContent) -> RepoResult<About> {
        let sql = format!(
            r#"
            INSERT INTO about_content
                (slot, name, profile_image, about_1, what_i_love, my_hobbies, apps_i_use, my_journey, fun_fact)
            VALUES (1, $1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (slot) DO UPDATE SET
                name = EXCLUDED.name,
                profile_image = EXCLUDED.profile_image,
                about_1 = EXCLUDED.about_1,
                what_i_love = EXCLUDED.what_i_love,
                my_hobbies = EXCLUDED.my_hobbies,
                apps_i_use = EXCLUDED.apps_i_use,
                my_journey = EXCLUDED.my_journey,
                fun_fact = EXCLUDED.fun_fact,
                updated_at = NOW()
            RETURNING {ABOUT_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, AboutRow>(&sql)
            .bind(&content.name)
            .bind(&content.profile_image)
            .bind(&content.about_1)
            .bind(&content.what_i_love)
            .bind(&content.my_hobbies)
            .bind(&content.apps_i_use)
            .bind(&content.my_journey)
            .bind(&content.fun_fact)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    // --- SKILLS ---

    async fn list_skills(&self) -> RepoResult<Vec<Skill>> {
        let sql = format!("SELECT {SKILL_COLUMNS} FROM skills ORDER BY created_at DESC, id DESC");
        let rows = sqlx::query_as::<_, SkillRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Skill::try_from).collect()
    }

    async fn get_skill(&self, id: i64) -> RepoResult<Option<Skill>> {
        let sql = format!("SELECT {SKILL_COLUMNS} FROM skills WHERE id = $1");
        let row = sqlx::query_as::<_, SkillRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Skill::try_from).transpose()
    }

    async fn create_skill(&self, skill: NewSkill) -> RepoResult<Skill> {
        let sql = format!(
            "INSERT INTO skills (id, name, icon, category) VALUES ($1, $2, $3, $4) \
             RETURNING {SKILL_COLUMNS}"
        );
        let row = sqlx::query_as::<_, SkillRow>(&sql)
            .bind(skill.id)
            .bind(&skill.name)
            .bind(&skill.icon)
            .bind(skill.category.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| insert_error(e, "A skill with this id already exists"))?;
        row.try_into()
    }

    /// update_skill
    ///
    /// Partial update: `COALESCE` keeps the stored value for every `None` field.
    async fn update_skill(&self, id: i64, patch: SkillPatch) -> RepoResult<Option<Skill>> {
        let sql = format!(
            r#"
            UPDATE skills
            SET name = COALESCE($2, name),
                icon = COALESCE($3, icon),
                category = COALESCE($4, category),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {SKILL_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, SkillRow>(&sql)
            .bind(id)
            .bind(patch.name)
            .bind(patch.icon)
            .bind(patch.category.map(|c| c.as_str()))
            .fetch_optional(&self.pool)
            .await?;
        row.map(Skill::try_from).transpose()
    }

    async fn delete_skill(&self, id: i64) -> RepoResult<bool> {
        let res = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    // --- PROJECTS ---

    async fn list_projects(&self) -> RepoResult<Vec<Project>> {
        let sql = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY display_order ASC, created_at DESC"
        );
        let rows = sqlx::query_as::<_, ProjectRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Project::try_from).collect()
    }

    async fn get_project(&self, id: &str) -> RepoResult<Option<Project>> {
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1");
        let row = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Project::try_from).transpose()
    }

    async fn create_project(&self, project: NewProject) -> RepoResult<Project> {
        let sql = format!(
            r#"
            INSERT INTO projects
                (id, category, cover, name, description, technologies, links, details,
                 display_date, display_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9,
                    (SELECT COALESCE(MAX(display_order) + 1, 0) FROM projects))
            RETURNING {PROJECT_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(&project.id)
            .bind(project.category.as_str())
            .bind(&project.cover)
            .bind(&project.name)
            .bind(&project.desc)
            .bind(Json(&project.technologies))
            .bind(Json(&project.links))
            .bind(Json(&project.details))
            .bind(&project.date)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| insert_error(e, "A project with this id already exists"))?;
        row.try_into()
    }

    async fn update_project(&self, id: &str, patch: ProjectPatch) -> RepoResult<Option<Project>> {
        let sql = format!(
            r#"
            UPDATE projects
            SET category = COALESCE($2, category),
                cover = COALESCE($3, cover),
                name = COALESCE($4, name),
                description = COALESCE($5, description),
                technologies = COALESCE($6, technologies),
                links = COALESCE($7, links),
                details = COALESCE($8, details),
                display_date = COALESCE($9, display_date),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PROJECT_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(id)
            .bind(patch.category.map(|c| c.as_str()))
            .bind(patch.cover)
            .bind(patch.name)
            .bind(patch.desc)
            .bind(patch.technologies.map(Json))
            .bind(patch.links.map(Json))
            .bind(patch.details.map(Json))
            .bind(patch.date)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Project::try_from).transpose()
    }

    async fn delete_project(&self, id: &str) -> RepoResult<bool> {
        let res = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    /// reorder_projects
    ///
    /// One `UPDATE` per id inside a transaction: either the whole new sequence
    /// is visible or none of it is.
    async fn reorder_projects(&self, ids: &[String]) -> RepoResult<u64> {
        let mut tx = self.pool.begin().await?;
        let mut updated = 0;
        for (position, id) in ids.iter().enumerate() {
            let res = sqlx::query(
                "UPDATE projects SET display_order = $1, updated_at = NOW() WHERE id = $2",
            )
            .bind(position as i32)
            .bind(id)
            .execute(&mut *tx)
            .await?;
            updated += res.rows_affected();
        }
        tx.commit().await?;
        Ok(updated)
    }

    // --- CERTIFICATES ---

    async fn list_certificates(&self) -> RepoResult<Vec<Certificate>> {
        let sql = format!(
            "SELECT {CERTIFICATE_COLUMNS} FROM certificates ORDER BY issue_date DESC, created_at DESC"
        );
        let rows = sqlx::query_as::<_, CertificateRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Certificate::from).collect())
    }

    async fn get_certificate(&self, id: &str) -> RepoResult<Option<Certificate>> {
        let sql = format!("SELECT {CERTIFICATE_COLUMNS} FROM certificates WHERE id = $1");
        let row = sqlx::query_as::<_, CertificateRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Certificate::from))
    }

    async fn create_certificate(&self, certificate: NewCertificate) -> RepoResult<Certificate> {
        let sql = format!(
            r#"
            INSERT INTO certificates
                (id, title, image, issuer, issue_date, credential_link, description, tags)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {CERTIFICATE_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, CertificateRow>(&sql)
            .bind(&certificate.id)
            .bind(&certificate.title)
            .bind(&certificate.image)
            .bind(&certificate.issuer)
            .bind(certificate.issue_date)
            .bind(&certificate.credential_link)
            .bind(&certificate.description)
            .bind(Json(&certificate.tags))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| insert_error(e, "A certificate with this id already exists"))?;
        Ok(row.into())
    }

    async fn update_certificate(
        &self,
        id: &str,
        patch: CertificatePatch,
    ) -> RepoResult<Option<Certificate>> {
        let sql = format!(
            r#"
            UPDATE certificates
            SET title = COALESCE($2, title),
                image = COALESCE($3, image),
                issuer = COALESCE($4, issuer),
                issue_date = COALESCE($5, issue_date),
                credential_link = COALESCE($6, credential_link),
                description = COALESCE($7, description),
                tags = COALESCE($8, tags),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {CERTIFICATE_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, CertificateRow>(&sql)
            .bind(id)
            .bind(patch.title)
            .bind(patch.image)
            .bind(patch.issuer)
            .bind(patch.issue_date)
            .bind(patch.credential_link)
            .bind(patch.description)
            .bind(patch.tags.map(Json))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Certificate::from))
    }

    async fn delete_certificate(&self, id: &str) -> RepoResult<bool> {
        let res = sqlx::query("DELETE FROM certificates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    // --- VISITORS ---

    async fn record_visit(&self, visit: NewVisit) -> RepoResult<Visitor> {
        let sql = format!(
            "INSERT INTO visitors (id, ip_address, user_agent, page_visited, source) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {VISITOR_COLUMNS}"
        );
        let row = sqlx::query_as::<_, VisitorRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&visit.ip_address)
            .bind(&visit.user_agent)
            .bind(&visit.page_visited)
            .bind(&visit.source)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn list_visitors(&self, page: i64, limit: i64) -> RepoResult<(Vec<Visitor>, i64)> {
        let total = self.count("visitors").await?;
        let Some(offset) = analytics::page_offset(page, limit) else {
            return Ok((Vec::new(), total));
        };
        let sql = format!(
            "SELECT {VISITOR_COLUMNS} FROM visitors ORDER BY visited_at DESC LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query_as::<_, VisitorRow>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok((rows.into_iter().map(Visitor::from).collect(), total))
    }

    /// visitor_stats
    ///
    /// SQL rendition of `analytics::summarize`: one aggregate query per chart.
    async fn visitor_stats(&self, now: DateTime<Utc>) -> RepoResult<VisitorStats> {
        let total_visitors = self.count("visitors").await?;

        let daily = sqlx::query_as::<_, CountRow>(
            r#"
            SELECT to_char(visited_at AT TIME ZONE 'UTC', 'YYYY-MM-DD') AS label, COUNT(*) AS count
            FROM visitors
            WHERE visited_at >= $1
            GROUP BY 1
            ORDER BY 1 ASC
            "#,
        )
        .bind(analytics::window_start(now))
        .fetch_all(&self.pool)
        .await?;

        Ok(VisitorStats {
            total_visitors,
            last_30_days: daily.into_iter().map(CountBucket::from).collect(),
            page_visits: self.ranked("page_visited", Some(TOP_N)).await?,
            user_agents: self.ranked(&browser_case_sql(), None).await?,
            sources: self.ranked("source", Some(TOP_N)).await?,
        })
    }

    async fn reset_visitors(&self) -> RepoResult<u64> {
        let res = sqlx::query("DELETE FROM visitors").execute(&self.pool).await?;
        Ok(res.rows_affected())
    }

    // --- ADMIN ---

    async fn get_admin(&self, id: Uuid) -> RepoResult<Option<Admin>> {
        let sql = format!("SELECT {ADMIN_COLUMNS} FROM admins WHERE id = $1");
        let row = sqlx::query_as::<_, AdminRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Admin::from))
    }

    async fn find_admin_by_username(&self, username: &str) -> RepoResult<Option<Admin>> {
        let sql = format!("SELECT {ADMIN_COLUMNS} FROM admins WHERE username = $1");
        let row = sqlx::query_as::<_, AdminRow>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Admin::from))
    }

    async fn count_admins(&self) -> RepoResult<i64> {
        self.count("admins").await
    }

    async fn create_admin(&self, admin: Admin) -> RepoResult<Admin> {
        let sql = format!(
            "INSERT INTO admins (id, username, password_hash, password_salt) \
             VALUES ($1, $2, $3, $4) RETURNING {ADMIN_COLUMNS}"
        );
        let row = sqlx::query_as::<_, AdminRow>(&sql)
            .bind(admin.id)
            .bind(&admin.username)
            .bind(&admin.password_hash)
            .bind(&admin.password_salt)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| insert_error(e, "Username already exists"))?;
        Ok(row.into())
    }

    async fn update_admin(&self, admin: Admin) -> RepoResult<Option<Admin>> {
        let sql = format!(
            "UPDATE admins SET username = $2, password_hash = $3, password_salt = $4 \
             WHERE id = $1 RETURNING {ADMIN_COLUMNS}"
        );
        let row = sqlx::query_as::<_, AdminRow>(&sql)
            .bind(admin.id)
            .bind(&admin.username)
            .bind(&admin.password_hash)
            .bind(&admin.password_salt)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| insert_error(e, "Username already exists"))?;
        Ok(row.map(Admin::from))
    }

    async fn content_overview(&self) -> RepoResult<ContentOverview> {
        let row = sqlx::query_as::<_, OverviewRow>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM skills) AS skills,
                (SELECT COUNT(*) FROM projects) AS projects,
                (SELECT COUNT(*) FROM certificates) AS certificates,
                (SELECT COUNT(*) FROM visitors) AS visitors
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(ContentOverview {
            skills: row.skills,
            projects: row.projects,
            certificates: row.certificates,
            visitors: row.visitors,
        })
    }
}
