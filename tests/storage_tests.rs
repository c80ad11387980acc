use portfolio_cms::storage::{
    MOCK_BASE_URL, MockStorageService, S3StorageClient, StorageService, sanitize_key,
};
use uuid::Uuid;

#[cfg(test)]
mod mock_tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_presign_success() {
        let mock = MockStorageService::new();
        let key = "uploads/resume.pdf";
        let url = mock
            .get_presigned_upload_url(key, "application/pdf")
            .await
            .unwrap();

        assert!(url.contains("signature=fake"));
        assert!(url.contains(key));
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let mock = MockStorageService::new_failing();
        assert!(mock.get_presigned_upload_url("a.pdf", "application/pdf").await.is_err());
        assert!(mock.upload_object("a.png", "image/png", vec![1]).await.is_err());
        assert!(mock.uploads().is_empty());
    }

    #[tokio::test]
    async fn test_mock_records_uploads() {
        let mock = MockStorageService::new();
        let url = mock
            .upload_object("portfolio/skills/icon.png", "image/png", vec![0u8; 42])
            .await
            .unwrap();

        assert_eq!(url, format!("{MOCK_BASE_URL}/portfolio/skills/icon.png"));
        let uploads = mock.uploads();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].content_type, "image/png");
        assert_eq!(uploads[0].size, 42);
    }

    #[tokio::test]
    async fn test_mock_sanitization() {
        let mock = MockStorageService::new();
        let url = mock
            .get_presigned_upload_url("../../etc/passwd", "text/plain")
            .await
            .unwrap();

        assert!(!url.contains(".."));
        assert_eq!(sanitize_key("portfolio//./home/../x.png"), "portfolio/home/x.png");
    }
}

#[cfg(test)]
mod s3_tests {
    use super::*;

    async fn local_client() -> S3StorageClient {
        S3StorageClient::new(
            "http://localhost:9000",
            "us-east-1",
            "testkey",
            "testsecret",
            "testbucket",
            "http://localhost:9000/testbucket/",
        )
        .await
    }

    #[tokio::test]
    async fn test_s3_client_creation() {
        // Construction must not touch the network.
        let _client = local_client().await;
    }

    #[tokio::test]
    async fn test_s3_presigned_url_format() {
        let client = local_client().await;

        let key = format!("uploads/{}.pdf", Uuid::new_v4());
        let url = client
            .get_presigned_upload_url(&key, "application/pdf")
            .await
            .unwrap();

        assert!(url.contains("localhost:9000"));
        assert!(url.contains("testbucket"));
        assert!(url.contains(&key));
        assert!(url.contains("X-Amz-Expires=600"));
    }
}
