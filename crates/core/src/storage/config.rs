//! Storage configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// S3 bucket storage, authenticated with an access key pair.
    S3 {
        /// S3 bucket name.
        bucket: String,
        /// AWS region.
        region: String,
        /// AWS access key ID.
        access_key_id: String,
        /// AWS secret access key.
        secret_access_key: String,
    },
    /// GCS bucket storage, authenticated through a service identity.
    Gcs {
        /// GCS bucket name.
        bucket: String,
        /// Path to a service account credential file. `None` uses the
        /// ambient environment identity.
        credential_path: Option<String>,
    },
    /// Local filesystem (development only).
    LocalFs {
        /// Root directory path.
        root: PathBuf,
        /// Public base URL under which the root is served.
        public_base_url: String,
    },
}

impl StorageProvider {
    /// Create an S3 provider.
    #[must_use]
    pub fn s3(
        bucket: impl Into<String>,
        region: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        Self::S3 {
            bucket: bucket.into(),
            region: region.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        }
    }

    /// Create a GCS provider.
    #[must_use]
    pub fn gcs(bucket: impl Into<String>, credential_path: Option<String>) -> Self {
        Self::Gcs {
            bucket: bucket.into(),
            credential_path,
        }
    }

    /// Create a local filesystem provider (development only).
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self::LocalFs {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    /// Get the provider name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::Gcs { .. } => "gcs",
            Self::LocalFs { .. } => "local",
        }
    }

    /// Get the bucket/root name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        match self {
            Self::S3 { bucket, .. } | Self::Gcs { bucket, .. } => bucket,
            Self::LocalFs { root, .. } => root.to_str().unwrap_or("local"),
        }
    }
}

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Maximum file size in bytes.
    pub max_file_size: u64,
    /// File extensions accepted for upload.
    pub allowed_extensions: Vec<String>,
}

impl StorageConfig {
    /// Default max file size: 10MB.
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

    /// Create a new storage config with default settings.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
            allowed_extensions: Self::default_extensions(),
        }
    }

    /// Set maximum file size.
    #[must_use]
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Set allowed file extensions.
    #[must_use]
    pub fn with_allowed_extensions(mut self, extensions: Vec<String>) -> Self {
        self.allowed_extensions = extensions;
        self
    }

    /// Default allowed extensions: documents and common image formats.
    #[must_use]
    pub fn default_extensions() -> Vec<String> {
        ["pdf", "doc", "docx", "png", "jpg", "jpeg", "gif"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Check whether a filename carries an allowed extension.
    ///
    /// Filtering uploads is the caller's responsibility; the adapter only
    /// provides the shared allow-list.
    #[must_use]
    pub fn is_extension_allowed(&self, filename: &str) -> bool {
        extension_of(filename)
            .is_some_and(|ext| self.allowed_extensions.iter().any(|allowed| *allowed == ext))
    }

    /// MIME type for a filename, derived from its extension.
    #[must_use]
    pub fn content_type_for(filename: &str) -> Option<&'static str> {
        match extension_of(filename)?.as_str() {
            "pdf" => Some("application/pdf"),
            "doc" => Some("application/msword"),
            "docx" => {
                Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
            }
            "png" => Some("image/png"),
            "jpg" | "jpeg" => Some("image/jpeg"),
            "gif" => Some("image/gif"),
            _ => None,
        }
    }
}

/// Lowercased extension of a filename, if it has one.
fn extension_of(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_storage_provider_s3() {
        let provider = StorageProvider::s3("attachments", "us-east-1", "access_key", "secret_key");
        assert_eq!(provider.name(), "s3");
        assert_eq!(provider.bucket(), "attachments");
    }

    #[test]
    fn test_storage_provider_gcs() {
        let provider = StorageProvider::gcs("attachments", None);
        assert_eq!(provider.name(), "gcs");
        assert_eq!(provider.bucket(), "attachments");
    }

    #[test]
    fn test_storage_provider_local() {
        let provider = StorageProvider::local_fs("./storage", "/uploads");
        assert_eq!(provider.name(), "local");
    }

    #[test]
    fn test_storage_config_defaults() {
        let config = StorageConfig::new(StorageProvider::local_fs("./storage", "/uploads"));
        assert_eq!(config.max_file_size, StorageConfig::DEFAULT_MAX_FILE_SIZE);
        assert!(!config.allowed_extensions.is_empty());
    }

    #[rstest]
    #[case("report.pdf", true)]
    #[case("scan.JPG", true)]
    #[case("x-ray.jpeg", true)]
    #[case("notes.docx", true)]
    #[case("malware.exe", false)]
    #[case("script.sh", false)]
    #[case("no_extension", false)]
    #[case(".hidden", false)]
    fn test_extension_allow_list(#[case] filename: &str, #[case] allowed: bool) {
        let config = StorageConfig::new(StorageProvider::local_fs("./storage", "/uploads"));
        assert_eq!(config.is_extension_allowed(filename), allowed);
    }

    #[test]
    fn test_content_type_mapping() {
        assert_eq!(
            StorageConfig::content_type_for("report.pdf"),
            Some("application/pdf")
        );
        assert_eq!(
            StorageConfig::content_type_for("photo.JPEG"),
            Some("image/jpeg")
        );
        assert_eq!(StorageConfig::content_type_for("unknown.xyz"), None);
        assert_eq!(StorageConfig::content_type_for("no_extension"), None);
    }
}
