//! Decoding and placement of uploaded media.
//!
//! The admin panel posts files as base64 data URLs inside JSON. Each upload
//! endpoint maps to a [`MediaKind`], which fixes the destination folder, the
//! accepted content types and the size limit.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::AppError;

const MB: usize = 1024 * 1024;

/// Request bodies on upload routes may carry a 10 MB file, base64-encoded.
pub const UPLOAD_BODY_LIMIT: usize = 16 * MB;

const PROJECT_COVER_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    HomePhoto,
    /// Resume uploaded through the home section form.
    HomeResume,
    /// Resume uploaded through the dedicated resume endpoint.
    Resume,
    AboutPhoto,
    ProjectCover,
    SkillIcon,
    Certificate,
}

impl MediaKind {
    pub fn folder(&self) -> &'static str {
        match self {
            MediaKind::HomePhoto => "portfolio/home",
            MediaKind::HomeResume => "portfolio/resumes",
            MediaKind::Resume => "portfolio/resume",
            MediaKind::AboutPhoto => "portfolio/about",
            MediaKind::ProjectCover => "portfolio/projects",
            MediaKind::SkillIcon => "portfolio/skills",
            MediaKind::Certificate => "portfolio/certificates",
        }
    }

    pub fn max_bytes(&self) -> usize {
        match self {
            MediaKind::Certificate => 4 * MB,
            _ => 10 * MB,
        }
    }

    pub fn is_document(&self) -> bool {
        matches!(self, MediaKind::HomeResume | MediaKind::Resume)
    }

    pub fn accepts(&self, content_type: &str) -> bool {
        match self {
            MediaKind::HomeResume | MediaKind::Resume => content_type == "application/pdf",
            MediaKind::ProjectCover => PROJECT_COVER_TYPES.contains(&content_type),
            _ => content_type.starts_with("image/"),
        }
    }

    fn missing_message(&self) -> &'static str {
        if self.is_document() {
            "No file provided"
        } else {
            "No image provided"
        }
    }

    fn format_message(&self) -> &'static str {
        if self.is_document() {
            "Invalid file format"
        } else {
            "Invalid image format"
        }
    }
}

/// A decoded upload, ready for the object store.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaUpload {
    pub kind: MediaKind,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl MediaUpload {
    /// Random object key under the kind's folder, e.g. `portfolio/skills/<uuid>.png`.
    pub fn object_key(&self) -> String {
        format!(
            "{}/{}.{}",
            self.kind.folder(),
            Uuid::new_v4(),
            extension_for(&self.content_type)
        )
    }
}

/// Splits `data:<mime>;base64,<payload>` into its content type and payload.
pub fn split_data_url(raw: &str) -> Option<(&str, &str)> {
    let rest = raw.strip_prefix("data:")?;
    let (mime, payload) = rest.split_once(";base64,")?;
    if mime.is_empty() {
        return None;
    }
    Some((mime, payload))
}

/// decode_upload
///
/// Validates and decodes one upload. Project covers additionally accept a
/// bare base64 payload, which is treated as JPEG.
pub fn decode_upload(kind: MediaKind, raw: Option<&str>) -> Result<MediaUpload, AppError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(AppError::bad_request(kind.missing_message()));
    }

    let (content_type, payload) = match split_data_url(raw) {
        Some((mime, payload)) => (mime.to_ascii_lowercase(), payload),
        None if kind == MediaKind::ProjectCover && !raw.starts_with("data:") => {
            ("image/jpeg".to_string(), raw)
        }
        None => return Err(AppError::bad_request(kind.format_message())),
    };

    if !kind.accepts(&content_type) {
        return Err(AppError::bad_request(kind.format_message()));
    }

    let too_large = || {
        AppError::PayloadTooLarge(format!(
            "File too large. Maximum size is {}MB",
            kind.max_bytes() / MB
        ))
    };

    // Reject before decoding when even the smallest possible decoding is over the limit.
    if payload.len() / 4 * 3 > kind.max_bytes() + 2 {
        return Err(too_large());
    }

    let bytes = BASE64
        .decode(payload.trim())
        .map_err(|_| AppError::bad_request(kind.format_message()))?;
    if bytes.len() > kind.max_bytes() {
        return Err(too_large());
    }

    Ok(MediaUpload {
        kind,
        content_type,
        bytes,
    })
}

/// File extension used for the stored object.
pub fn extension_for(content_type: &str) -> String {
    match content_type {
        "image/jpeg" | "image/jpg" => "jpg".to_string(),
        "image/svg+xml" => "svg".to_string(),
        "image/x-icon" | "image/vnd.microsoft.icon" => "ico".to_string(),
        "application/pdf" => "pdf".to_string(),
        other => other
            .split_once('/')
            .map(|(_, subtype)| subtype)
            .filter(|subtype| !subtype.is_empty() && subtype.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(str::to_string)
            .unwrap_or_else(|| "bin".to_string()),
    }
}

/// Resume link that makes the browser download the file under `filename`
/// instead of displaying it.
pub fn resume_download_url(url: &str, filename: &str, now: DateTime<Utc>) -> String {
    format!("{url}?dl={}-{filename}", now.timestamp_millis())
}

/// Key for a browser-side upload: `uploads/<uuid>.<ext>`, the extension taken
/// from the client's file name.
pub fn presigned_object_key(filename: &str) -> String {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| "bin".to_string());
    format!("uploads/{}.{}", Uuid::new_v4(), extension)
}
