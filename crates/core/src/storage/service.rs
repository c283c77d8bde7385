//! Storage service implementation using Apache OpenDAL.

use bytes::Bytes;
use opendal::{ErrorKind, Operator, services};
use tracing::{error, warn};
use uuid::Uuid;

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// Storage service for appointment attachments.
///
/// The service is constructed once at process start; a construction failure
/// means the process runs with uploads disabled, nothing else is affected.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        let operator = match provider {
            StorageProvider::S3 {
                bucket,
                region,
                access_key_id,
                secret_access_key,
            } => {
                let builder = services::S3::default()
                    .bucket(bucket)
                    .region(region)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::Gcs {
                bucket,
                credential_path,
            } => {
                let mut builder = services::Gcs::default().bucket(bucket);
                if let Some(path) = credential_path {
                    builder = builder.credential_path(path);
                }

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::LocalFs { root, .. } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
        };

        Ok(operator)
    }

    /// Generate a storage key for an upload.
    ///
    /// Format: `{folder}/{random token}-{sanitized filename}`. The caller
    /// never controls the final key, so two uploads of the same filename
    /// cannot collide.
    #[must_use]
    pub fn generate_storage_key(folder: &str, filename: &str) -> String {
        format!("{}/{}-{}", folder, Uuid::new_v4(), sanitize_filename(filename))
    }

    /// Upload a file and return its public URL.
    ///
    /// The extension allow-list is checked by the caller before invoking
    /// this; the adapter still re-validates size and stamps the content
    /// type explicitly where the backend records one.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is too large or the backend call fails.
    pub async fn upload(
        &self,
        data: Bytes,
        filename: &str,
        folder: &str,
    ) -> Result<String, StorageError> {
        let size = data.len() as u64;
        if size > self.config.max_file_size {
            return Err(StorageError::file_too_large(size, self.config.max_file_size));
        }

        let key = Self::generate_storage_key(folder, filename);

        let capability = self.operator.info().full_capability();
        let content_type =
            StorageConfig::content_type_for(filename).filter(|_| capability.write_with_content_type);

        match content_type {
            Some(ct) => {
                self.operator
                    .write_with(&key, data)
                    .content_type(ct)
                    .await
                    .map_err(StorageError::from)?;
            }
            None => {
                self.operator.write(&key, data).await.map_err(StorageError::from)?;
            }
        }

        Ok(self.resolve_url(&key))
    }

    /// Delete the object behind a previously returned URL.
    ///
    /// Returns `false` for a URL that does not match this backend's layout,
    /// for an object that no longer exists, and for a failed backend call.
    pub async fn delete(&self, url: &str) -> bool {
        let Some(key) = self.key_from_url(url) else {
            warn!(%url, "delete requested for a URL outside this storage backend");
            return false;
        };

        // Object stores treat deleting a missing key as success; stat first
        // so a repeated delete reports false.
        if !self.exists(&key).await {
            return false;
        }

        match self.operator.delete(&key).await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, %key, "failed to delete stored object");
                false
            }
        }
    }

    /// Public URL for a storage key. Pure string work, no network call.
    #[must_use]
    pub fn resolve_url(&self, key: &str) -> String {
        format!("{}/{key}", self.public_base())
    }

    /// URL for an image with the requested transformation applied.
    ///
    /// None of the supported backends rewrite images, so the input URL is
    /// returned unchanged.
    #[must_use]
    pub fn optimized_url(
        &self,
        url: &str,
        _width: Option<u32>,
        _height: Option<u32>,
        _quality: Option<u8>,
    ) -> String {
        url.to_string()
    }

    /// Recover the storage key from a public URL, if it matches this
    /// backend's layout.
    #[must_use]
    pub fn key_from_url(&self, url: &str) -> Option<String> {
        let base = self.public_base();
        let key = url.strip_prefix(&format!("{base}/"))?;
        if key.is_empty() {
            return None;
        }
        Some(key.to_string())
    }

    /// Check if an object exists in storage.
    pub async fn exists(&self, key: &str) -> bool {
        match self.operator.stat(key).await {
            Ok(_) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => {
                error!(error = %e, %key, "failed to stat stored object");
                false
            }
        }
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }

    /// Get the bucket/container name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        self.config.provider.bucket()
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    fn public_base(&self) -> String {
        match &self.config.provider {
            StorageProvider::S3 { bucket, .. } => {
                format!("https://{bucket}.s3.amazonaws.com")
            }
            StorageProvider::Gcs { bucket, .. } => {
                format!("https://storage.googleapis.com/{bucket}")
            }
            StorageProvider::LocalFs {
                public_base_url, ..
            } => public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Sanitize a caller-supplied filename for use inside a storage key.
///
/// Only ASCII alphanumerics, dots, hyphens, and underscores survive; path
/// separators and anything else become underscores.
fn sanitize_filename(filename: &str) -> String {
    let sanitized: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.is_empty() {
        "file".to_string()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_service(root: &std::path::Path) -> StorageService {
        let config = StorageConfig::new(StorageProvider::local_fs(root, "/uploads"));
        StorageService::from_config(config).expect("should create service")
    }

    fn s3_service() -> StorageService {
        let config = StorageConfig::new(StorageProvider::s3("fixfit-files", "us-east-1", "ak", "sk"));
        StorageService::from_config(config).expect("should create service")
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("report.pdf"), "report.pdf");
        assert_eq!(sanitize_filename("my scan (1).png"), "my_scan__1_.png");
        assert_eq!(sanitize_filename("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_filename("日本語.pdf"), "___.pdf");
        assert_eq!(sanitize_filename(""), "file");
    }

    #[test]
    fn test_generate_storage_key_shape() {
        let key = StorageService::generate_storage_key("appointments", "report.pdf");
        let (folder, rest) = key.split_once('/').expect("key should contain folder");
        assert_eq!(folder, "appointments");
        assert!(rest.ends_with("-report.pdf"));

        // Token part parses back as a UUID
        let token = rest.strip_suffix("-report.pdf").expect("token prefix");
        assert!(Uuid::parse_str(token).is_ok());
    }

    #[test]
    fn test_generate_storage_key_unique() {
        let a = StorageService::generate_storage_key("appointments", "report.pdf");
        let b = StorageService::generate_storage_key("appointments", "report.pdf");
        assert_ne!(a, b);
    }

    #[test]
    fn test_resolve_url_per_provider() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let local = local_service(tmp.path());
        assert_eq!(local.resolve_url("appointments/abc.pdf"), "/uploads/appointments/abc.pdf");

        let s3 = s3_service();
        assert_eq!(
            s3.resolve_url("appointments/abc.pdf"),
            "https://fixfit-files.s3.amazonaws.com/appointments/abc.pdf"
        );

        let config = StorageConfig::new(StorageProvider::gcs("fixfit-files", None));
        let gcs = StorageService::from_config(config).expect("should create service");
        assert_eq!(
            gcs.resolve_url("appointments/abc.pdf"),
            "https://storage.googleapis.com/fixfit-files/appointments/abc.pdf"
        );
    }

    #[test]
    fn test_key_from_url_round_trip() {
        let s3 = s3_service();
        let url = s3.resolve_url("appointments/abc-report.pdf");
        assert_eq!(
            s3.key_from_url(&url).as_deref(),
            Some("appointments/abc-report.pdf")
        );
    }

    #[test]
    fn test_key_from_url_rejects_foreign_urls() {
        let s3 = s3_service();
        assert!(s3.key_from_url("https://other-bucket.s3.amazonaws.com/x.pdf").is_none());
        assert!(s3.key_from_url("https://example.com/x.pdf").is_none());
        assert!(s3.key_from_url("https://fixfit-files.s3.amazonaws.com/").is_none());
    }

    #[test]
    fn test_optimized_url_is_identity() {
        let s3 = s3_service();
        let url = "https://fixfit-files.s3.amazonaws.com/appointments/x.png";
        assert_eq!(s3.optimized_url(url, Some(200), Some(200), Some(80)), url);
        assert_eq!(s3.optimized_url(url, None, None, None), url);
    }

    #[tokio::test]
    async fn test_upload_delete_round_trip() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let service = local_service(tmp.path());

        let url = service
            .upload(Bytes::from_static(b"%PDF-1.4 test"), "report.pdf", "appointments")
            .await
            .expect("upload should succeed");

        let key = service.key_from_url(&url).expect("url should map to a key");
        assert!(service.exists(&key).await);

        // First delete removes the object, second one reports false.
        assert!(service.delete(&url).await);
        assert!(!service.exists(&key).await);
        assert!(!service.delete(&url).await);
    }

    #[tokio::test]
    async fn test_delete_foreign_url_is_false() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let service = local_service(tmp.path());
        assert!(!service.delete("https://example.com/not-ours.pdf").await);
    }

    #[tokio::test]
    async fn test_upload_rejects_oversized_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let config = StorageConfig::new(StorageProvider::local_fs(tmp.path(), "/uploads"))
            .with_max_file_size(8);
        let service = StorageService::from_config(config).expect("should create service");

        let err = service
            .upload(Bytes::from_static(b"way past the limit"), "report.pdf", "appointments")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::FileTooLarge { .. }));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    // Sanitized filenames only ever contain key-safe characters.
    proptest! {
        #[test]
        fn prop_sanitized_filename_safe_chars(filename in ".*") {
            let sanitized = sanitize_filename(&filename);

            prop_assert!(!sanitized.is_empty());
            for c in sanitized.chars() {
                let is_safe = c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_';
                prop_assert!(is_safe, "Unexpected character in sanitized filename: {}", c);
            }
        }
    }

    // resolve_url and key_from_url invert each other for any key the
    // service itself would generate.
    proptest! {
        #[test]
        fn prop_url_key_round_trip(filename in "[a-zA-Z0-9_-]{1,40}\\.[a-z]{2,4}") {
            let config = StorageConfig::new(StorageProvider::s3(
                "fixfit-files", "us-east-1", "ak", "sk",
            ));
            let service = StorageService::from_config(config).expect("should create service");

            let key = StorageService::generate_storage_key("appointments", &filename);
            let url = service.resolve_url(&key);

            prop_assert_eq!(service.key_from_url(&url), Some(key));
        }
    }
}
