use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{RepoResult, Repository, RepositoryError};
use crate::{
    analytics,
    models::{
        About, AboutContent, Admin, Certificate, CertificatePatch, ContentOverview, Home,
        HomeContent, NewCertificate, NewProject, NewSkill, NewVisit, Project, ProjectPatch, Skill,
        SkillPatch, Visitor, VisitorStats,
    },
};

#[derive(Default)]
struct Store {
    home: Option<Home>,
    about: Option<About>,
    skills: HashMap<i64, Skill>,
    projects: HashMap<String, Project>,
    certificates: HashMap<String, Certificate>,
    visitors: Vec<Visitor>,
    admins: HashMap<Uuid, Admin>,
}

/// MemoryRepository
///
/// A process-local `Repository` with the same ordering and conflict rules as
/// `PostgresRepository`. Used by the test suites and for running the API
/// without a database (`APP_ENV=local` with no `DATABASE_URL`).
#[derive(Default)]
pub struct MemoryRepository {
    store: RwLock<Store>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn apply<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    // --- HOME / ABOUT ---

    async fn get_home(&self) -> RepoResult<Option<Home>> {
        Ok(self.store.read().await.home.clone())
    }

    async fn upsert_home(&self, content: HomeContent) -> RepoResult<Home> {
        let now = Utc::now();
        let mut store = self.store.write().await;
        let created_at = store.home.as_ref().map_or(now, |h| h.created_at);
        let home = Home {
            content,
            created_at,
            updated_at: now,
        };
        store.home = Some(home.clone());
        Ok(home)
    }

    async fn get_about(&self) -> RepoResult<Option<About>> {
        Ok(self.store.read().await.about.clone())
    }

    async fn upsert_about(&self, content: AboutContent) -> RepoResult<About> {
        let now = Utc::now();
        let mut store = self.store.write().await;
        let created_at = store.about.as_ref().map_or(now, |a| a.created_at);
        let about = About {
            content,
            created_at,
            updated_at: now,
        };
        store.about = Some(about.clone());
        Ok(about)
    }

    // --- SKILLS ---

    async fn list_skills(&self) -> RepoResult<Vec<Skill>> {
        let store = self.store.read().await;
        let mut skills: Vec<Skill> = store.skills.values().cloned().collect();
        skills.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(skills)
    }

    async fn get_skill(&self, id: i64) -> RepoResult<Option<Skill>> {
        Ok(self.store.read().await.skills.get(&id).cloned())
    }

    async fn create_skill(&self, skill: NewSkill) -> RepoResult<Skill> {
        let mut store = self.store.write().await;
        if store.skills.contains_key(&skill.id) {
            return Err(RepositoryError::Conflict(
                "A skill with this id already exists".to_string(),
            ));
        }
        let now = Utc::now();
        let created = Skill {
            id: skill.id,
            name: skill.name,
            icon: skill.icon,
            category: skill.category,
            created_at: now,
            updated_at: now,
        };
        store.skills.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_skill(&self, id: i64, patch: SkillPatch) -> RepoResult<Option<Skill>> {
        let mut store = self.store.write().await;
        let Some(skill) = store.skills.get_mut(&id) else {
            return Ok(None);
        };
        apply(&mut skill.name, patch.name);
        apply(&mut skill.icon, patch.icon);
        apply(&mut skill.category, patch.category);
        skill.updated_at = Utc::now();
        Ok(Some(skill.clone()))
    }

    async fn delete_skill(&self, id: i64) -> RepoResult<bool> {
        Ok(self.store.write().await.skills.remove(&id).is_some())
    }

    // --- PROJECTS ---

    async fn list_projects(&self) -> RepoResult<Vec<Project>> {
        let store = self.store.read().await;
        let mut projects: Vec<Project> = store.projects.values().cloned().collect();
        projects.sort_by(|a, b| {
            a.order
                .cmp(&b.order)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(projects)
    }

    async fn get_project(&self, id: &str) -> RepoResult<Option<Project>> {
        Ok(self.store.read().await.projects.get(id).cloned())
    }

    async fn create_project(&self, project: NewProject) -> RepoResult<Project> {
        let mut store = self.store.write().await;
        if store.projects.contains_key(&project.id) {
            return Err(RepositoryError::Conflict(
                "A project with this id already exists".to_string(),
            ));
        }
        let order = store
            .projects
            .values()
            .map(|p| p.order + 1)
            .max()
            .unwrap_or(0);
        let now = Utc::now();
        let created = Project {
            id: project.id,
            category: project.category,
            cover: project.cover,
            name: project.name,
            desc: project.desc,
            technologies: project.technologies,
            links: project.links,
            details: project.details,
            date: project.date,
            order,
            created_at: now,
            updated_at: now,
        };
        store.projects.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn update_project(&self, id: &str, patch: ProjectPatch) -> RepoResult<Option<Project>> {
        let mut store = self.store.write().await;
        let Some(project) = store.projects.get_mut(id) else {
            return Ok(None);
        };
        apply(&mut project.category, patch.category);
        apply(&mut project.cover, patch.cover);
        apply(&mut project.name, patch.name);
        apply(&mut project.desc, patch.desc);
        apply(&mut project.technologies, patch.technologies);
        apply(&mut project.links, patch.links);
        apply(&mut project.details, patch.details);
        apply(&mut project.date, patch.date);
        project.updated_at = Utc::now();
        Ok(Some(project.clone()))
    }

    async fn delete_project(&self, id: &str) -> RepoResult<bool> {
        Ok(self.store.write().await.projects.remove(id).is_some())
    }

    async fn reorder_projects(&self, ids: &[String]) -> RepoResult<u64> {
        // The write lock is held for the whole sequence, so readers never see
        // a partially applied order.
        let mut store = self.store.write().await;
        let now = Utc::now();
        let mut updated = 0;
        for (position, id) in ids.iter().enumerate() {
            if let Some(project) = store.projects.get_mut(id) {
                project.order = position as i32;
                project.updated_at = now;
                updated += 1;
            }
        }
        Ok(updated)
    }

    // --- CERTIFICATES ---

    async fn list_certificates(&self) -> RepoResult<Vec<Certificate>> {
        let store = self.store.read().await;
        let mut certificates: Vec<Certificate> = store.certificates.values().cloned().collect();
        certificates.sort_by(|a, b| {
            b.issue_date
                .cmp(&a.issue_date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(certificates)
    }

    async fn get_certificate(&self, id: &str) -> RepoResult<Option<Certificate>> {
        Ok(self.store.read().await.certificates.get(id).cloned())
    }

    async fn create_certificate(&self, certificate: NewCertificate) -> RepoResult<Certificate> {
        let mut store = self.store.write().await;
        if store.certificates.contains_key(&certificate.id) {
            return Err(RepositoryError::Conflict(
                "A certificate with this id already exists".to_string(),
            ));
        }
        let now = Utc::now();
        let created = Certificate {
            id: certificate.id,
            title: certificate.title,
            image: certificate.image,
            issuer: certificate.issuer,
            issue_date: certificate.issue_date,
            credential_link: certificate.credential_link,
            description: certificate.description,
            tags: certificate.tags,
            created_at: now,
            updated_at: now,
        };
        store
            .certificates
            .insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn update_certificate(
        &self,
        id: &str,
        patch: CertificatePatch,
    ) -> RepoResult<Option<Certificate>> {
        let mut store = self.store.write().await;
        let Some(certificate) = store.certificates.get_mut(id) else {
            return Ok(None);
        };
        apply(&mut certificate.title, patch.title);
        apply(&mut certificate.image, patch.image);
        apply(&mut certificate.issuer, patch.issuer);
        apply(&mut certificate.issue_date, patch.issue_date);
        if patch.credential_link.is_some() {
            certificate.credential_link = patch.credential_link;
        }
        if patch.description.is_some() {
            certificate.description = patch.description;
        }
        apply(&mut certificate.tags, patch.tags);
        certificate.updated_at = Utc::now();
        Ok(Some(certificate.clone()))
    }

    async fn delete_certificate(&self, id: &str) -> RepoResult<bool> {
        Ok(self.store.write().await.certificates.remove(id).is_some())
    }

    // --- VISITORS ---

    async fn record_visit(&self, visit: NewVisit) -> RepoResult<Visitor> {
        let visitor = Visitor {
            id: Uuid::new_v4(),
            ip_address: visit.ip_address,
            user_agent: visit.user_agent,
            page_visited: visit.page_visited,
            source: visit.source,
            timestamp: Utc::now(),
        };
        self.store.write().await.visitors.push(visitor.clone());
        Ok(visitor)
    }

    async fn list_visitors(&self, page: i64, limit: i64) -> RepoResult<(Vec<Visitor>, i64)> {
        let store = self.store.read().await;
        let total = store.visitors.len() as i64;
        let Some(skip) = analytics::page_offset(page, limit) else {
            return Ok((Vec::new(), total));
        };
        // Stable sort over the reversed log keeps insertion order for equal timestamps.
        let mut visitors: Vec<Visitor> = store.visitors.iter().rev().cloned().collect();
        visitors.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        let page_items = visitors
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(limit.max(0) as usize)
            .collect();
        Ok((page_items, total))
    }

    async fn visitor_stats(&self, now: DateTime<Utc>) -> RepoResult<VisitorStats> {
        let store = self.store.read().await;
        Ok(analytics::summarize(&store.visitors, now))
    }

    async fn reset_visitors(&self) -> RepoResult<u64> {
        let mut store = self.store.write().await;
        let removed = store.visitors.len() as u64;
        store.visitors.clear();
        Ok(removed)
    }

    // --- ADMIN ---

    async fn get_admin(&self, id: Uuid) -> RepoResult<Option<Admin>> {
        Ok(self.store.read().await.admins.get(&id).cloned())
    }

    async fn find_admin_by_username(&self, username: &str) -> RepoResult<Option<Admin>> {
        let store = self.store.read().await;
        Ok(store
            .admins
            .values()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn count_admins(&self) -> RepoResult<i64> {
        Ok(self.store.read().await.admins.len() as i64)
    }

    async fn create_admin(&self, admin: Admin) -> RepoResult<Admin> {
        let mut store = self.store.write().await;
        if store.admins.values().any(|a| a.username == admin.username) {
            return Err(RepositoryError::Conflict("Username already exists".to_string()));
        }
        store.admins.insert(admin.id, admin.clone());
        Ok(admin)
    }

    async fn update_admin(&self, admin: Admin) -> RepoResult<Option<Admin>> {
        let mut store = self.store.write().await;
        if store
            .admins
            .values()
            .any(|a| a.id != admin.id && a.username == admin.username)
        {
            return Err(RepositoryError::Conflict("Username already exists".to_string()));
        }
        let Some(existing) = store.admins.get_mut(&admin.id) else {
            return Ok(None);
        };
        existing.username = admin.username;
        existing.password_hash = admin.password_hash;
        existing.password_salt = admin.password_salt;
        Ok(Some(existing.clone()))
    }

    async fn content_overview(&self) -> RepoResult<ContentOverview> {
        let store = self.store.read().await;
        Ok(ContentOverview {
            skills: store.skills.len() as i64,
            projects: store.projects.len() as i64,
            certificates: store.certificates.len() as i64,
            visitors: store.visitors.len() as i64,
        })
    }
}
