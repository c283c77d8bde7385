//! Fix & Fit API Server
//!
//! Main entry point for the Fix & Fit backend service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fixfit_api::{AppState, create_router};
use fixfit_core::storage::{StorageConfig, StorageProvider, StorageService};
use fixfit_db::{AccountRepository, connect};
use fixfit_shared::{AppConfig, StorageSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fixfit=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database; an unusable URL is fatal
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Ensure the administrator bootstrap account exists
    let accounts = AccountRepository::new(db.clone());
    match accounts
        .ensure_admin(
            &config.auth.admin_email,
            &config.auth.admin_password,
            "Admin",
            "User",
        )
        .await
    {
        Ok(Some(admin)) => info!(email = %admin.email, "administrator account created"),
        Ok(None) => info!("administrator account already present"),
        Err(e) => error!(error = %e, "administrator bootstrap failed"),
    }

    // Build the storage service; any failure here only disables uploads
    let storage = init_storage(config.storage.as_ref()).map(Arc::new);

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        storage,
        auth: Arc::new(config.auth.clone()),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the storage service from optional settings.
///
/// Missing settings, an incomplete credential set, or a failing
/// constructor all land in the same place: uploads disabled, process
/// otherwise unaffected.
fn init_storage(settings: Option<&StorageSettings>) -> Option<StorageService> {
    let Some(settings) = settings else {
        warn!("no storage configured; file uploads are disabled");
        return None;
    };

    let provider = match settings.provider.as_str() {
        "local" => {
            StorageProvider::local_fs(settings.root.clone(), settings.public_base_url.clone())
        }
        "s3" => {
            let (Some(bucket), Some(access_key_id), Some(secret_access_key)) = (
                settings.bucket.clone(),
                settings.access_key_id.clone(),
                settings.secret_access_key.clone(),
            ) else {
                warn!("incomplete s3 storage settings; file uploads are disabled");
                return None;
            };
            StorageProvider::s3(bucket, settings.region.clone(), access_key_id, secret_access_key)
        }
        "gcs" => {
            let Some(bucket) = settings.bucket.clone() else {
                warn!("incomplete gcs storage settings; file uploads are disabled");
                return None;
            };
            StorageProvider::gcs(bucket, settings.credential_path.clone())
        }
        other => {
            warn!(provider = %other, "unknown storage provider; file uploads are disabled");
            return None;
        }
    };

    match StorageService::from_config(StorageConfig::new(provider)) {
        Ok(service) => {
            info!(
                provider = service.provider_name(),
                bucket = service.bucket(),
                "storage ready"
            );
            Some(service)
        }
        Err(e) => {
            warn!(error = %e, "storage initialization failed; file uploads are disabled");
            None
        }
    }
}
