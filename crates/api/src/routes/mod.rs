//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{AppState, middleware::auth::session_auth};
use fixfit_db::entities::accounts;
use fixfit_shared::{AppError, auth::AccountInfo};

pub mod admin;
pub mod appointments;
pub mod articles;
pub mod auth;
pub mod health;

/// Creates the API router with all routes; session-protected routes need
/// state for the middleware.
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require a session; /admin handlers additionally
    // require the administrator flag through their extractor.
    let protected_routes = Router::new()
        .merge(auth::session_routes())
        .merge(appointments::routes())
        .merge(admin::routes())
        .layer(middleware::from_fn_with_state(state, session_auth));

    // Combine public and protected routes
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(articles::routes())
        .merge(protected_routes)
}

/// Renders an [`AppError`] as a JSON error response.
pub(crate) fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (
        status,
        Json(json!({
            "error": err.error_code().to_ascii_lowercase(),
            "message": err.to_string(),
        })),
    )
        .into_response()
}

/// Maps an account row to its public view.
pub(crate) fn account_info(account: &accounts::Model) -> AccountInfo {
    AccountInfo {
        id: account.id,
        email: account.email.clone(),
        first_name: account.first_name.clone(),
        last_name: account.last_name.clone(),
        phone: account.phone.clone(),
        patient_number: account.patient_number.clone(),
        is_admin: account.is_admin,
        created_at: account.created_at.with_timezone(&chrono::Utc),
    }
}
