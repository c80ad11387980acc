use async_trait::async_trait;
use aws_sdk_s3 as s3;
use s3::{presigning::PresigningConfig, primitives::ByteStream};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

/// Presigned upload URLs expire after 10 minutes.
pub const PRESIGNED_URL_TTL: Duration = Duration::from_secs(600);

/// StorageError
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("upload of `{key}` failed: {reason}")]
    Upload { key: String, reason: String },

    #[error("could not presign `{key}`: {reason}")]
    Presign { key: String, reason: String },
}

// 1. StorageService Contract
/// StorageService
///
/// Abstract contract for the media store. Handlers only see
/// `Arc<dyn StorageService>`, so the S3 client and the test mock are
/// interchangeable.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Creates the configured bucket if needed. Only called in `Env::Local`
    /// to provision MinIO.
    async fn ensure_bucket_exists(&self);

    /// Stores `body` under `key` and returns the object's public URL.
    async fn upload_object(
        &self,
        key: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<String, StorageError>;

    /// Generates a short-lived signed URL the browser can `PUT` a file to.
    /// The signature is bound to `content_type`.
    async fn get_presigned_upload_url(
        &self,
        key: &str,
        content_type: &str,
    ) -> Result<String, StorageError>;
}

// 2. The Real Implementation (S3/MinIO)
/// S3StorageClient
///
/// `force_path_style(true)` is required for MinIO and most S3-compatible hosts.
#[derive(Clone)]
pub struct S3StorageClient {
    client: s3::Client,
    bucket_name: String,
    public_base_url: String,
}

impl S3StorageClient {
    /// new
    ///
    /// Constructs the S3 client using credentials and configuration from AppConfig.
    /// `public_base_url` is the prefix under which uploaded objects are served.
    pub async fn new(
        endpoint: &str,
        region: &str,
        access_key: &str,
        secret_key: &str,
        bucket: &str,
        public_base_url: &str,
    ) -> Self {
        let credentials =
            s3::config::Credentials::new(access_key, secret_key, None, None, "static");

        let config = s3::Config::builder()
            .credentials_provider(credentials)
            .endpoint_url(endpoint)
            .region(s3::config::Region::new(region.to_string()))
            .behavior_version_latest()
            .force_path_style(true)
            .build();

        Self {
            client: s3::Client::from_conf(config),
            bucket_name: bucket.to_string(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl StorageService for S3StorageClient {
    async fn ensure_bucket_exists(&self) {
        // CreateBucket fails harmlessly when the bucket is already there.
        if let Err(e) = self
            .client
            .create_bucket()
            .bucket(&self.bucket_name)
            .send()
            .await
        {
            tracing::debug!("create_bucket({}) skipped: {e}", self.bucket_name);
        }
    }

    async fn upload_object(
        &self,
        key: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<String, StorageError> {
        let key = sanitize_key(key);
        let size = body.len();

        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(&key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| StorageError::Upload {
                key: key.clone(),
                reason: e.to_string(),
            })?;

        tracing::info!(key = %key, size, "stored media object");
        Ok(public_url(&self.public_base_url, &key))
    }

    async fn get_presigned_upload_url(
        &self,
        key: &str,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let presign_err = |reason: String| StorageError::Presign {
            key: key.to_string(),
            reason,
        };
        let presigning =
            PresigningConfig::expires_in(PRESIGNED_URL_TTL).map_err(|e| presign_err(e.to_string()))?;

        let presigned_req = self
            .client
            .put_object()
            .bucket(&self.bucket_name)
            .key(sanitize_key(key))
            .content_type(content_type)
            .presigned(presigning)
            .await
            .map_err(|e| presign_err(e.to_string()))?;

        Ok(presigned_req.uri().to_string())
    }
}

/// sanitize_key
///
/// Strips empty, `.` and `..` segments so a key can never escape its folder.
pub fn sanitize_key(key: &str) -> String {
    key.split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".." && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Joins the public prefix and an object key.
pub fn public_url(base_url: &str, key: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), key)
}

// 3. The Mock Implementation (For Tests)
/// MockStorageService
///
/// In-memory stand-in used by the test suites. Successful uploads are
/// recorded so tests can assert on the stored keys and content types.
#[derive(Clone, Default)]
pub struct MockStorageService {
    /// When true, all operations return a simulated failure.
    pub should_fail: bool,
    uploads: Arc<Mutex<Vec<StoredObject>>>,
}

/// An upload captured by `MockStorageService`.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub key: String,
    pub content_type: String,
    pub size: usize,
}

pub const MOCK_BASE_URL: &str = "http://localhost:9000/mock-bucket";

impl MockStorageService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn uploads(&self) -> Vec<StoredObject> {
        self.uploads
            .lock()
            .map(|stored| stored.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl StorageService for MockStorageService {
    async fn ensure_bucket_exists(&self) {}

    async fn upload_object(
        &self,
        key: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<String, StorageError> {
        if self.should_fail {
            return Err(StorageError::Upload {
                key: key.to_string(),
                reason: "Mock Storage Error: Simulation requested".to_string(),
            });
        }

        let key = sanitize_key(key);
        if let Ok(mut stored) = self.uploads.lock() {
            stored.push(StoredObject {
                key: key.clone(),
                content_type: content_type.to_string(),
                size: body.len(),
            });
        }
        Ok(public_url(MOCK_BASE_URL, &key))
    }

    async fn get_presigned_upload_url(
        &self,
        key: &str,
        _content_type: &str,
    ) -> Result<String, StorageError> {
        if self.should_fail {
            return Err(StorageError::Presign {
                key: key.to_string(),
                reason: "Mock Storage Error: Simulation requested".to_string(),
            });
        }

        Ok(format!("{}?signature=fake", public_url(MOCK_BASE_URL, &sanitize_key(key))))
    }
}

/// Shared handle to whichever media backend the server was started with.
pub type StorageState = Arc<dyn StorageService>;
