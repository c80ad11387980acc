//! Turns loosely-typed request payloads into validated drafts.
//!
//! Every collection has the same shape: a `*Request` accepted from the admin
//! panel, checked here field by field, and a `New*` / `*Patch` value handed to
//! the repository. Messages are collected so the panel can show them all at
//! once.

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    error::{AppError, FieldErrors},
    models::{
        AboutContent, CertificatePatch, CertificateRequest, CertificateUpdateRequest,
        HomeContent, NewCertificate, NewProject, NewSkill, ProjectCategory, ProjectPatch,
        ProjectRequest, ProjectUpdateRequest, SkillCategory, SkillPatch, SkillRequest,
        SkillUpdateRequest,
    },
};

/// Display date assigned to projects created without one, e.g. `October 2026`.
pub fn default_project_date(now: DateTime<Utc>) -> String {
    now.format("%B %Y").to_string()
}

/// parse_issue_date
///
/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_issue_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn non_empty_patch(errors: &mut FieldErrors, field: &str, value: Option<String>) -> Option<String> {
    match value {
        Some(v) if v.trim().is_empty() => {
            errors.push(format!("{field} cannot be empty"));
            None
        }
        other => other,
    }
}

impl HomeContent {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = FieldErrors::new();
        errors
            .require("photo.url", &self.photo.url)
            .require("photo.alt", &self.photo.alt)
            .require("tagline", &self.tagline)
            .require("tagline2", &self.tagline2)
            .require("intro", &self.intro)
            .require("resumelink", &self.resumelink);
        if self.status.is_empty() {
            errors.push("status is required");
        }
        errors.into_result()
    }
}

impl AboutContent {
    /// The profile image and name are reported on their own, ahead of the
    /// remaining sections, matching the order the admin form fills them in.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.profile_image.trim().is_empty() {
            return Err(AppError::bad_request("Profile image is required"));
        }
        if self.name.trim().is_empty() {
            return Err(AppError::bad_request("Name is required"));
        }
        let mut errors = FieldErrors::new();
        for (field, value) in self.sections() {
            errors.require(field, value);
        }
        errors.into_result()
    }
}

impl SkillRequest {
    pub fn validate(self) -> Result<NewSkill, AppError> {
        let mut errors = FieldErrors::new();
        if self.id.is_none() {
            errors.push("id is required");
        }
        errors.require("name", &self.name).require("icon", &self.icon);
        let category = match self.category.parse::<SkillCategory>() {
            Ok(c) => Some(c),
            Err(e) => {
                errors.push(e);
                None
            }
        };
        errors.into_result()?;
        let (Some(id), Some(category)) = (self.id, category) else {
            return Err(AppError::bad_request("id and category are required"));
        };
        Ok(NewSkill {
            id,
            name: self.name,
            icon: self.icon,
            category,
        })
    }
}

impl SkillUpdateRequest {
    pub fn validate(self) -> Result<SkillPatch, AppError> {
        let mut errors = FieldErrors::new();
        let name = non_empty_patch(&mut errors, "name", self.name);
        let icon = non_empty_patch(&mut errors, "icon", self.icon);
        let category = match self.category.as_deref().map(str::parse::<SkillCategory>) {
            Some(Ok(c)) => Some(c),
            Some(Err(e)) => {
                errors.push(e);
                None
            }
            None => None,
        };
        errors.into_result()?;
        Ok(SkillPatch {
            name,
            icon,
            category,
        })
    }
}

impl ProjectRequest {
    pub fn validate(self, now: DateTime<Utc>) -> Result<NewProject, AppError> {
        let mut errors = FieldErrors::new();
        errors
            .require("id", &self.id)
            .require("cover", &self.cover)
            .require("name", &self.name)
            .require("desc", &self.desc);
        let category = match self.category.parse::<ProjectCategory>() {
            Ok(c) => Some(c),
            Err(e) => {
                errors.push(e);
                None
            }
        };
        errors.into_result()?;
        let Some(category) = category else {
            return Err(AppError::bad_request("category is required"));
        };
        let date = self
            .date
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| default_project_date(now));
        Ok(NewProject {
            id: self.id,
            category,
            cover: self.cover,
            name: self.name,
            desc: self.desc,
            technologies: self.technologies,
            links: self.links,
            details: self.details,
            date,
        })
    }
}

impl ProjectUpdateRequest {
    pub fn validate(self) -> Result<ProjectPatch, AppError> {
        let mut errors = FieldErrors::new();
        let cover = non_empty_patch(&mut errors, "cover", self.cover);
        let name = non_empty_patch(&mut errors, "name", self.name);
        let desc = non_empty_patch(&mut errors, "desc", self.desc);
        let category = match self.category.as_deref().map(str::parse::<ProjectCategory>) {
            Some(Ok(c)) => Some(c),
            Some(Err(e)) => {
                errors.push(e);
                None
            }
            None => None,
        };
        errors.into_result()?;
        Ok(ProjectPatch {
            category,
            cover,
            name,
            desc,
            technologies: self.technologies,
            links: self.links,
            details: self.details,
            date: self.date,
        })
    }
}

impl CertificateRequest {
    pub fn validate(self, now: DateTime<Utc>) -> Result<NewCertificate, AppError> {
        if self.image.trim().is_empty() {
            return Err(AppError::bad_request("Image is required"));
        }
        let mut errors = FieldErrors::new();
        errors
            .require("id", &self.id)
            .require("title", &self.title)
            .require("issuer", &self.issuer);
        let issue_date = match self.issue_date.as_deref() {
            None | Some("") => {
                errors.push("issueDate is required");
                None
            }
            Some(raw) => {
                let parsed = parse_issue_date(raw);
                if parsed.is_none() {
                    errors.push("issueDate is not a valid date");
                }
                parsed
            }
        };
        errors.into_result()?;
        let Some(issue_date) = issue_date else {
            return Err(AppError::bad_request("issueDate is required"));
        };
        if issue_date > now {
            return Err(AppError::bad_request("Issue date cannot be in the future"));
        }
        Ok(NewCertificate {
            id: self.id,
            title: self.title,
            image: self.image,
            issuer: self.issuer,
            issue_date,
            credential_link: self.credential_link.filter(|l| !l.trim().is_empty()),
            description: self.description.filter(|d| !d.trim().is_empty()),
            tags: self.tags,
        })
    }
}

impl CertificateUpdateRequest {
    pub fn validate(self, now: DateTime<Utc>) -> Result<CertificatePatch, AppError> {
        let mut errors = FieldErrors::new();
        let title = non_empty_patch(&mut errors, "title", self.title);
        let image = non_empty_patch(&mut errors, "image", self.image);
        let issuer = non_empty_patch(&mut errors, "issuer", self.issuer);
        let issue_date = match self.issue_date.as_deref() {
            None => None,
            Some(raw) => {
                let parsed = parse_issue_date(raw);
                if parsed.is_none() {
                    errors.push("issueDate is not a valid date");
                }
                parsed
            }
        };
        errors.into_result()?;
        if issue_date.is_some_and(|d| d > now) {
            return Err(AppError::bad_request("Issue date cannot be in the future"));
        }
        Ok(CertificatePatch {
            title,
            image,
            issuer,
            issue_date,
            credential_link: self.credential_link,
            description: self.description,
            tags: self.tags,
        })
    }
}
