//! Session-cookie authentication middleware for protected routes.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;

use crate::AppState;
use fixfit_db::SessionRepository;
use fixfit_shared::Principal;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "fixfit_session";

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "unauthorized",
            "message": "Please log in to continue"
        })),
    )
        .into_response()
}

/// Authentication middleware that resolves the session cookie.
///
/// This middleware:
/// 1. Reads the session cookie
/// 2. Resolves it to an account through the session store
/// 3. Stores a [`Principal`] in request extensions for handlers to access
pub async fn session_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return unauthorized();
    };

    let sessions = SessionRepository::new((*state.db).clone());
    let Some(account) = sessions.find_account(cookie.value()).await else {
        return unauthorized();
    };

    let principal = Principal {
        account_id: account.id,
        email: account.email,
        display_name: format!("{} {}", account.first_name, account.last_name),
        is_admin: account.is_admin,
    };

    request.extensions_mut().insert(principal);
    next.run(request).await
}

/// Extractor for the authenticated caller.
///
/// Use this in handlers behind [`session_auth`]:
///
/// ```ignore
/// async fn handler(CurrentAccount(principal): CurrentAccount) -> impl IntoResponse {
///     let account_id = principal.account_id;
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Principal);

impl<S> FromRequestParts<S> for CurrentAccount
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(CurrentAccount)
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "error": "unauthorized",
                        "message": "Authentication required"
                    })),
                )
            })
    }
}

/// Extractor for an administrator caller.
///
/// Rejects with 403 when the session's account does not carry the
/// administrator flag. The flag is the one loaded from the store for this
/// request, so a demoted account loses access immediately.
#[derive(Debug, Clone)]
pub struct AdminAccount(pub Principal);

impl<S> FromRequestParts<S> for AdminAccount
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentAccount(principal) = CurrentAccount::from_request_parts(parts, state).await?;

        if !principal.is_admin {
            return Err((
                StatusCode::FORBIDDEN,
                Json(json!({
                    "error": "forbidden",
                    "message": "Administrator privileges required"
                })),
            ));
        }

        Ok(Self(principal))
    }
}
