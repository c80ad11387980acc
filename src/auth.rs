use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};
use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::{
    config::{AppConfig, Env},
    error::AppError,
    models::Admin,
    repository::{RepoResult, RepositoryState},
};

/// Name of the cookie carrying the admin session token.
pub const SESSION_COOKIE: &str = "admin_token";

/// Local-only header that authenticates as the named admin without a token.
pub const LOCAL_BYPASS_HEADER: &str = "x-admin-username";

/// Claims
///
/// Payload of an admin session token (HS256).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin id.
    pub sub: Uuid,
    pub username: String,
    pub iat: usize,
    pub exp: usize,
}

/// AuthAdmin
///
/// The resolved identity of an authenticated admin request.
#[derive(Debug, Clone)]
pub struct AuthAdmin {
    pub id: Uuid,
    pub username: String,
}

impl From<Admin> for AuthAdmin {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            username: admin.username,
        }
    }
}

/// AuthAdmin Extractor Implementation
///
/// Usable as a handler argument on every admin route, and by `auth_middleware`
/// to guard the admin router as a whole.
///
/// 1. Local bypass: in `Env::Local` an `x-admin-username` header naming an
///    existing admin is accepted.
/// 2. Token extraction: the `admin_token` cookie, else `Authorization: Bearer`.
/// 3. JWT validation (signature and expiry).
/// 4. DB lookup: the admin must still exist.
///
/// Rejection: `AppError::Unauthorized` (401) on any authentication failure.
impl<S> FromRequestParts<S> for AuthAdmin
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let repo = RepositoryState::from_ref(state);
        let config = AppConfig::from_ref(state);

        if config.env == Env::Local {
            if let Some(username) = parts
                .headers
                .get(LOCAL_BYPASS_HEADER)
                .and_then(|value| value.to_str().ok())
            {
                if let Some(admin) = repo.find_admin_by_username(username).await? {
                    return Ok(admin.into());
                }
            }
        }

        let token = session_token(&parts.headers).ok_or(AppError::Unauthorized)?;
        let claims = decode_token(&config, &token).ok_or(AppError::Unauthorized)?;

        let admin = repo
            .get_admin(claims.sub)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(admin.into())
    }
}

// --- Session Tokens ---

pub fn issue_token(config: &AppConfig, admin: &Admin, now: DateTime<Utc>) -> Result<String, AppError> {
    let iat = now.timestamp().max(0) as usize;
    let claims = Claims {
        sub: admin.id,
        username: admin.username.clone(),
        iat,
        exp: iat + config.session_ttl_secs.max(0) as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("failed to sign session token: {e}")))
}

/// Returns the claims of a correctly signed, unexpired token.
pub fn decode_token(config: &AppConfig, token: &str) -> Option<Claims> {
    let mut validation = Validation::default();
    validation.validate_exp = true;

    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => Some(data.claims),
        Err(e) => {
            tracing::debug!("rejected session token: {e}");
            None
        }
    }
}

/// Reads the session token from the `admin_token` cookie, falling back to a
/// Bearer `Authorization` header.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    cookie_value(headers, SESSION_COOKIE)
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .map(str::to_string)
        })
        .filter(|token| !token.is_empty())
}

/// Looks up one cookie across every `Cookie` header of the request.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
}

/// `Set-Cookie` value installing a session token.
pub fn session_cookie(config: &AppConfig, token: &str) -> String {
    build_cookie(config, token, config.session_ttl_secs)
}

/// `Set-Cookie` value that expires the session cookie immediately.
pub fn clear_session_cookie(config: &AppConfig) -> String {
    build_cookie(config, "", 0)
}

fn build_cookie(config: &AppConfig, value: &str, max_age: i64) -> String {
    let mut cookie =
        format!("{SESSION_COOKIE}={value}; HttpOnly; SameSite=Strict; Path=/; Max-Age={max_age}");
    if config.secure_cookies() {
        cookie.push_str("; Secure");
    }
    cookie
}

// --- Passwords ---

/// Hex SHA-256 digest of `salt:password`.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn new_salt() -> String {
    Uuid::new_v4().simple().to_string()
}

pub fn verify_password(admin: &Admin, password: &str) -> bool {
    let candidate = hash_password(password, &admin.password_salt);
    // Compare without short-circuiting on the first differing byte.
    candidate.len() == admin.password_hash.len()
        && candidate
            .bytes()
            .zip(admin.password_hash.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

/// Sets a fresh salt and digest for `password`.
pub fn set_password(admin: &mut Admin, password: &str) {
    admin.password_salt = new_salt();
    admin.password_hash = hash_password(password, &admin.password_salt);
}

pub fn new_admin(username: &str, password: &str) -> Admin {
    let mut admin = Admin {
        id: Uuid::new_v4(),
        username: username.to_string(),
        created_at: Utc::now(),
        ..Admin::default()
    };
    set_password(&mut admin, password);
    admin
}

/// bootstrap_admin
///
/// Creates the initial admin from `ADMIN_USERNAME`/`ADMIN_PASSWORD` when no
/// account exists yet. Returns whether an account was created.
pub async fn bootstrap_admin(repo: &RepositoryState, config: &AppConfig) -> RepoResult<bool> {
    let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) else {
        return Ok(false);
    };
    if repo.count_admins().await? > 0 {
        return Ok(false);
    }
    repo.create_admin(new_admin(username, password)).await?;
    tracing::info!("created initial admin account `{username}`");
    Ok(true)
}
