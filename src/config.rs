use std::env;

/// AppConfig
///
/// Holds the application's entire configuration state. Loaded once at startup and
/// never mutated afterwards; handlers receive a clone through `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls the local auth bypass and cookie flags.
    pub env: Env,
    // Postgres connection string. `None` (local only) selects the in-memory repository.
    pub db_url: Option<String>,
    // HMAC secret used to sign and verify admin session tokens.
    pub jwt_secret: String,
    // Lifetime of an admin session, applied to both the JWT `exp` and the cookie `Max-Age`.
    pub session_ttl_secs: i64,
    // S3-compatible storage endpoint URL (MinIO locally).
    pub s3_endpoint: String,
    pub s3_region: String,
    pub s3_key: String,
    pub s3_secret: String,
    // The bucket holding every uploaded image and resume.
    pub s3_bucket: String,
    // Public URL prefix of stored objects, e.g. a CDN in front of the bucket.
    pub media_base_url: String,
    pub bind_addr: String,
    // Credentials of the admin account created on first start.
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    // Shown in placeholder content before the home section is saved.
    pub site_owner_name: String,
    // File name offered to visitors when the resume is downloaded.
    pub resume_filename: String,
}

/// Env
///
/// Defines the runtime context: local development (MinIO, header bypass, plain
/// HTTP cookies) or the hardened production setup.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

const LOCAL_JWT_SECRET: &str = "super-secure-test-secret-value-local";
const DEFAULT_BUCKET: &str = "portfolio-media";
const DEFAULT_SESSION_TTL_SECS: i64 = 3600;

impl Default for AppConfig {
    /// default
    ///
    /// Non-panicking configuration for test state scaffolding; no environment
    /// variables are read.
    fn default() -> Self {
        Self {
            env: Env::Local,
            db_url: None,
            jwt_secret: LOCAL_JWT_SECRET.to_string(),
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            s3_endpoint: "http://localhost:9000".to_string(),
            s3_region: "us-east-1".to_string(),
            s3_key: "admin".to_string(),
            s3_secret: "password".to_string(),
            s3_bucket: "portfolio-test".to_string(),
            media_base_url: "http://localhost:9000/portfolio-test".to_string(),
            bind_addr: "0.0.0.0:3000".to_string(),
            admin_username: None,
            admin_password: None,
            site_owner_name: "Portfolio Owner".to_string(),
            resume_filename: "resume.pdf".to_string(),
        }
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables and fails fast.
    ///
    /// # Panics
    /// Panics in production if the database URL, the JWT secret or the storage
    /// credentials are missing, so the service never starts half-configured.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let session_ttl_secs = optional("SESSION_TTL_SECS")
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|ttl| *ttl > 0)
            .unwrap_or(DEFAULT_SESSION_TTL_SECS);
        let s3_bucket = optional("S3_BUCKET_NAME").unwrap_or_else(|| DEFAULT_BUCKET.to_string());
        let bind_addr = optional("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let admin_username = optional("ADMIN_USERNAME");
        let admin_password = optional("ADMIN_PASSWORD");
        let site_owner_name =
            optional("SITE_OWNER_NAME").unwrap_or_else(|| "Portfolio Owner".to_string());
        let resume_filename =
            optional("RESUME_FILENAME").unwrap_or_else(|| "resume.pdf".to_string());

        let (db_url, jwt_secret, s3_endpoint, s3_region, s3_key, s3_secret) = match env {
            Env::Local => (
                optional("DATABASE_URL"),
                optional("JWT_SECRET").unwrap_or_else(|| LOCAL_JWT_SECRET.to_string()),
                optional("S3_ENDPOINT").unwrap_or_else(|| "http://localhost:9000".to_string()),
                optional("S3_REGION").unwrap_or_else(|| "us-east-1".to_string()),
                optional("S3_ACCESS_KEY").unwrap_or_else(|| "admin".to_string()),
                optional("S3_SECRET_KEY").unwrap_or_else(|| "password".to_string()),
            ),
            Env::Production => (
                Some(optional("DATABASE_URL").expect("FATAL: DATABASE_URL required in prod")),
                optional("JWT_SECRET").expect("FATAL: JWT_SECRET must be set in production."),
                optional("S3_ENDPOINT").expect("FATAL: S3_ENDPOINT required in prod"),
                optional("S3_REGION").unwrap_or_else(|| "auto".to_string()),
                optional("S3_ACCESS_KEY").expect("FATAL: S3_ACCESS_KEY required in prod"),
                optional("S3_SECRET_KEY").expect("FATAL: S3_SECRET_KEY required in prod"),
            ),
        };

        // Path-style addressing: objects live at <endpoint>/<bucket>/<key>.
        let media_base_url = optional("MEDIA_BASE_URL")
            .unwrap_or_else(|| format!("{}/{}", s3_endpoint.trim_end_matches('/'), s3_bucket));

        Self {
            env,
            db_url,
            jwt_secret,
            session_ttl_secs,
            s3_endpoint,
            s3_region,
            s3_key,
            s3_secret,
            s3_bucket,
            media_base_url: media_base_url.trim_end_matches('/').to_string(),
            bind_addr,
            admin_username,
            admin_password,
            site_owner_name,
            resume_filename,
        }
    }

    /// `Secure` is dropped from the session cookie only for local plain-HTTP work.
    pub fn secure_cookies(&self) -> bool {
        self.env == Env::Production
    }
}
