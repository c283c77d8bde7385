//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - Session-cookie authentication middleware
//! - Request extractors for the authenticated principal

pub mod middleware;
pub mod routes;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use fixfit_core::storage::{StorageProvider, StorageService};
use fixfit_shared::AuthConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Storage service for file attachments. `None` runs the API with
    /// uploads disabled; everything else keeps working.
    pub storage: Option<Arc<StorageService>>,
    /// Authentication and session configuration.
    pub auth: Arc<AuthConfig>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .merge(routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // The local storage backend serves its files straight from the API
    if let Some(storage) = &state.storage
        && let StorageProvider::LocalFs { root, .. } = &storage.config().provider
    {
        router = router.nest_service("/uploads", ServeDir::new(root.clone()));
    }

    router.with_state(state)
}
