//! Authentication routes for register, login, and logout.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::USER_AGENT},
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::json;
use tracing::{error, info};
use validator::Validate;

use crate::middleware::auth::SESSION_COOKIE;
use crate::routes::{account_info, error_response};
use crate::AppState;
use fixfit_db::repositories::{AccountError, AccountRepository, CreateAccountInput};
use fixfit_db::SessionRepository;
use fixfit_shared::auth::{LoginRequest, RegisterRequest};
use fixfit_shared::{AppError, PatientNumber};

/// Creates the public auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Creates the session-protected auth router.
pub fn session_routes() -> Router<AppState> {
    Router::new().route("/logout", get(logout))
}

/// POST /register - Create a new patient account.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return error_response(&AppError::Validation(e.to_string()));
    }

    let repo = AccountRepository::new((*state.db).clone());

    let result = repo
        .create(CreateAccountInput {
            email: payload.email,
            password: payload.password,
            first_name: payload.first_name,
            last_name: payload.last_name,
            phone: payload.phone,
            patient_number: None,
            date_of_birth: payload.date_of_birth,
            address: payload.address,
            emergency_contact: payload.emergency_contact,
            emergency_phone: payload.emergency_phone,
            is_admin: false,
        })
        .await;

    match result {
        Ok(account) => {
            info!(account_id = %account.id, "account registered");
            (StatusCode::CREATED, Json(json!({ "account": account_info(&account) })))
                .into_response()
        }
        Err(e @ (AccountError::EmailTaken | AccountError::PatientNumberTaken)) => {
            error_response(&AppError::Conflict(e.to_string()))
        }
        Err(e) => {
            error!(error = %e, "registration failed");
            error_response(&AppError::Unavailable(
                "registration could not be completed, please try again".to_string(),
            ))
        }
    }
}

/// POST /login - Authenticate and establish a session.
///
/// The identifier is an email address or a patient number. Every failure
/// path answers with the same generic message: the response never reveals
/// whether the account exists.
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let invalid_credentials = || {
        error_response(&AppError::Unauthorized(
            "invalid email, patient number, or password".to_string(),
        ))
    };

    let accounts = AccountRepository::new((*state.db).clone());

    let account = if payload.identifier.parse::<PatientNumber>().is_ok() {
        accounts.find_by_patient_number(&payload.identifier).await
    } else {
        accounts.find_by_email(&payload.identifier).await
    };

    let Some(account) = account else {
        info!("login attempt for unknown identifier");
        return invalid_credentials();
    };

    if !AccountRepository::verify_credential(&account, &payload.password) {
        info!(account_id = %account.id, "login attempt with wrong password");
        return invalid_credentials();
    }

    let sessions = SessionRepository::new((*state.db).clone());
    let ttl_secs = i64::try_from(state.auth.session_ttl_secs).unwrap_or(i64::MAX);
    let ttl = chrono::Duration::try_seconds(ttl_secs)
        .unwrap_or_else(|| chrono::Duration::days(7));
    let user_agent = headers.get(USER_AGENT).and_then(|v| v.to_str().ok());

    let Some((token, _session)) = sessions.create(account.id, ttl, user_agent, None).await else {
        error!(account_id = %account.id, "failed to establish session");
        return error_response(&AppError::Unavailable(
            "login could not be completed, please try again".to_string(),
        ));
    };

    info!(account_id = %account.id, "logged in");

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    (
        jar.add(cookie),
        (
            StatusCode::OK,
            Json(json!({ "account": account_info(&account) })),
        ),
    )
        .into_response()
}

/// GET /logout - Revoke the session and clear the cookie.
async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let sessions = SessionRepository::new((*state.db).clone());
        sessions.revoke(cookie.value()).await;
    }

    let mut removal = Cookie::from(SESSION_COOKIE);
    removal.set_path("/");

    (
        jar.remove(removal),
        (
            StatusCode::OK,
            Json(json!({ "message": "You have been logged out" })),
        ),
    )
        .into_response()
}
