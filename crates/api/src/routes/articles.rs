//! Public education routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use uuid::Uuid;

use crate::routes::error_response;
use crate::AppState;
use fixfit_db::ArticleRepository;
use fixfit_shared::AppError;

/// Creates the public education router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/education", get(education))
        .route("/education/{id}", get(article_detail))
}

/// GET /education - Published articles, newest first.
async fn education(State(state): State<AppState>) -> impl IntoResponse {
    let repo = ArticleRepository::new((*state.db).clone());
    let articles = repo.list_published().await;

    Json(json!({ "articles": articles }))
}

/// GET /education/{id} - One published article.
///
/// Unpublished articles are indistinguishable from missing ones.
async fn article_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = ArticleRepository::new((*state.db).clone());

    match repo.find_by_id(id).await.filter(|a| a.published) {
        Some(article) => Json(json!({ "article": article })).into_response(),
        None => error_response(&AppError::NotFound("article not found".to_string())),
    }
}
