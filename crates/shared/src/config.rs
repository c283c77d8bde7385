//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Authentication and session configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Object storage configuration. Absent means uploads are disabled.
    #[serde(default)]
    pub storage: Option<StorageSettings>,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

/// Authentication and session configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Session lifetime in seconds.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,
    /// Email for the administrator account ensured at startup.
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    /// Initial password for the administrator account. Only used when the
    /// account does not exist yet.
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_secs: default_session_ttl(),
            admin_email: default_admin_email(),
            admin_password: default_admin_password(),
        }
    }
}

fn default_session_ttl() -> u64 {
    604_800 // 7 days
}

fn default_admin_email() -> String {
    "admin@fixandfit.com".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

/// Object storage settings.
///
/// All backend-specific fields are optional here; the server binary decides
/// whether the combination is complete enough to build a storage service.
/// An incomplete combination disables uploads, it never aborts startup.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Backend selector: `local`, `s3`, or `gcs`.
    pub provider: String,
    /// Bucket name (s3, gcs).
    #[serde(default)]
    pub bucket: Option<String>,
    /// Region (s3).
    #[serde(default = "default_region")]
    pub region: String,
    /// Access key id (s3).
    #[serde(default)]
    pub access_key_id: Option<String>,
    /// Secret access key (s3).
    #[serde(default)]
    pub secret_access_key: Option<String>,
    /// Path to a service account credential file (gcs). When absent the
    /// ambient environment identity is used.
    #[serde(default)]
    pub credential_path: Option<String>,
    /// Root directory (local).
    #[serde(default = "default_storage_root")]
    pub root: String,
    /// Public base URL under which local files are served.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_storage_root() -> String {
    "./uploads".to_string()
}

fn default_public_base_url() -> String {
    "/uploads".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FIXFIT").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_config_defaults() {
        let auth = AuthConfig::default();
        assert_eq!(auth.session_ttl_secs, 604_800);
        assert_eq!(auth.admin_email, "admin@fixandfit.com");
        assert!(!auth.admin_password.is_empty());
    }

    #[test]
    fn test_storage_settings_defaults() {
        let settings: StorageSettings =
            serde_json::from_str(r#"{"provider": "local"}"#).expect("should deserialize");
        assert_eq!(settings.provider, "local");
        assert_eq!(settings.root, "./uploads");
        assert_eq!(settings.public_base_url, "/uploads");
        assert!(settings.bucket.is_none());
    }
}
