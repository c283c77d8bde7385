//! Administrator routes: dashboard, users, appointments, articles,
//! diagnosis notes.
//!
//! Every handler takes [`AdminAccount`], so the administrator flag is
//! re-checked from the store on each request.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::middleware::auth::AdminAccount;
use crate::routes::{account_info, error_response};
use crate::AppState;
use fixfit_db::entities::sea_orm_active_enums::AppointmentStatus;
use fixfit_db::repositories::{ArticleRepository, CreateArticleInput};
use fixfit_db::{AccountRepository, AppointmentRepository, DashboardRepository};
use fixfit_shared::auth::AccountInfo;
use fixfit_shared::AppError;

/// How many appointments the dashboard's recent list carries.
const RECENT_APPOINTMENTS: u64 = 5;

/// Creates the admin router (session + administrator flag required).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/dashboard", get(dashboard))
        .route("/admin/users", get(users))
        .route("/admin/appointments", get(appointments))
        .route("/admin/appointment/{id}", get(appointment_detail))
        .route("/admin/appointment/{id}/update", post(update_appointment_status))
        .route("/admin/articles", get(articles).post(create_article))
        .route("/admin/user/{id}", get(user_detail))
        .route("/admin/add_diagnosis/{id}", post(add_diagnosis))
}

/// GET /admin/dashboard - Summary counters and recent activity.
async fn dashboard(
    State(state): State<AppState>,
    AdminAccount(_): AdminAccount,
) -> impl IntoResponse {
    let stats = DashboardRepository::new((*state.db).clone());
    let accounts = AccountRepository::new((*state.db).clone());

    let account_count = stats.count_accounts().await;
    let appointment_count = stats.count_appointments().await;
    let pending_count = stats
        .count_appointments_by_status(AppointmentStatus::Pending)
        .await;
    let recent = stats.recent_appointments(RECENT_APPOINTMENTS).await;
    let account_list: Vec<AccountInfo> = accounts.list().await.iter().map(account_info).collect();

    Json(json!({
        "account_count": account_count,
        "appointment_count": appointment_count,
        "pending_count": pending_count,
        "recent_appointments": recent,
        "accounts": account_list,
    }))
}

/// GET /admin/users - All accounts, newest first.
async fn users(State(state): State<AppState>, AdminAccount(_): AdminAccount) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());
    let accounts: Vec<AccountInfo> = repo.list().await.iter().map(account_info).collect();

    Json(json!({ "accounts": accounts }))
}

/// GET /admin/appointments - All appointments with their owners.
async fn appointments(
    State(state): State<AppState>,
    AdminAccount(_): AdminAccount,
) -> impl IntoResponse {
    let repo = AppointmentRepository::new((*state.db).clone());
    let appointments = repo.list_all().await;

    Json(json!({ "appointments": appointments }))
}

/// GET /admin/appointment/{id} - One appointment with its owner.
async fn appointment_detail(
    State(state): State<AppState>,
    AdminAccount(_): AdminAccount,
    Path(id): Path<Uuid>,
) -> Response {
    let repo = AppointmentRepository::new((*state.db).clone());

    match repo.get(id).await {
        Some(appointment) => Json(json!({ "appointment": appointment })).into_response(),
        None => error_response(&AppError::NotFound("appointment not found".to_string())),
    }
}

/// Status update payload.
#[derive(Debug, Deserialize)]
struct UpdateStatusRequest {
    status: String,
}

/// POST /admin/appointment/{id}/update - Overwrite an appointment's status.
async fn update_appointment_status(
    State(state): State<AppState>,
    AdminAccount(principal): AdminAccount,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Response {
    let Some(status) = AppointmentStatus::parse(&payload.status) else {
        return error_response(&AppError::Validation(format!(
            "unknown status '{}'",
            payload.status
        )));
    };

    let repo = AppointmentRepository::new((*state.db).clone());

    if repo.update_status(id, status).await {
        info!(appointment_id = %id, status = status.as_str(), admin = %principal.account_id,
            "appointment status updated");
        Json(json!({ "updated": true, "status": status })).into_response()
    } else {
        error_response(&AppError::NotFound(
            "appointment not found or update failed".to_string(),
        ))
    }
}

/// GET /admin/articles - All articles including drafts and diagnosis notes.
async fn articles(
    State(state): State<AppState>,
    AdminAccount(_): AdminAccount,
) -> impl IntoResponse {
    let repo = ArticleRepository::new((*state.db).clone());
    let articles = repo.list_all().await;

    Json(json!({ "articles": articles }))
}

/// Article creation payload.
#[derive(Debug, Deserialize)]
struct CreateArticleRequest {
    title: String,
    content: String,
    #[serde(default)]
    published: bool,
}

/// POST /admin/articles - Create an article.
async fn create_article(
    State(state): State<AppState>,
    AdminAccount(principal): AdminAccount,
    Json(payload): Json<CreateArticleRequest>,
) -> Response {
    if payload.title.trim().is_empty() || payload.content.trim().is_empty() {
        return error_response(&AppError::Validation(
            "title and content are required".to_string(),
        ));
    }

    let repo = ArticleRepository::new((*state.db).clone());
    let created = repo
        .create(CreateArticleInput {
            title: payload.title,
            content: payload.content,
            author_id: principal.account_id,
            subject_account_id: None,
            published: payload.published,
        })
        .await;

    match created {
        Some(article) => {
            info!(article_id = %article.id, "article created");
            (StatusCode::CREATED, Json(json!({ "article": article }))).into_response()
        }
        None => {
            error!("article creation failed");
            error_response(&AppError::Unavailable(
                "the article could not be saved, please try again".to_string(),
            ))
        }
    }
}

/// GET /admin/user/{id} - One account with its appointments and diagnosis
/// notes.
async fn user_detail(
    State(state): State<AppState>,
    AdminAccount(_): AdminAccount,
    Path(id): Path<Uuid>,
) -> Response {
    let accounts = AccountRepository::new((*state.db).clone());

    let Some(account) = accounts.find_by_id(id).await else {
        return error_response(&AppError::NotFound("account not found".to_string()));
    };

    let appointments = AppointmentRepository::new((*state.db).clone())
        .list_for_account(account.id)
        .await;
    let diagnoses = ArticleRepository::new((*state.db).clone())
        .list_for_subject(account.id)
        .await;

    Json(json!({
        "account": account_info(&account),
        "appointments": appointments,
        "diagnoses": diagnoses,
    }))
    .into_response()
}

/// Diagnosis note payload.
#[derive(Debug, Deserialize)]
struct AddDiagnosisRequest {
    diagnosis: String,
    treatment: String,
}

/// POST /admin/add_diagnosis/{id} - Record a diagnosis note for an account.
///
/// The note lands in the articles store as an unpublished row scoped to the
/// patient; it never appears on the public education page.
async fn add_diagnosis(
    State(state): State<AppState>,
    AdminAccount(principal): AdminAccount,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddDiagnosisRequest>,
) -> Response {
    if payload.diagnosis.trim().is_empty() || payload.treatment.trim().is_empty() {
        return error_response(&AppError::Validation(
            "diagnosis and treatment are required".to_string(),
        ));
    }

    let accounts = AccountRepository::new((*state.db).clone());
    let Some(account) = accounts.find_by_id(id).await else {
        return error_response(&AppError::NotFound("account not found".to_string()));
    };

    let repo = ArticleRepository::new((*state.db).clone());
    let created = repo
        .create(CreateArticleInput {
            title: payload.diagnosis,
            content: payload.treatment,
            author_id: principal.account_id,
            subject_account_id: Some(account.id),
            published: false,
        })
        .await;

    match created {
        Some(note) => {
            info!(account_id = %account.id, note_id = %note.id, "diagnosis recorded");
            (StatusCode::CREATED, Json(json!({ "diagnosis": note }))).into_response()
        }
        None => {
            error!("diagnosis creation failed");
            error_response(&AppError::Unavailable(
                "the diagnosis could not be saved, please try again".to_string(),
            ))
        }
    }
}
