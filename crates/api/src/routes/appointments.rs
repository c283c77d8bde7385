//! Appointment routes: the patient dashboard and booking.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use bytes::Bytes;
use chrono::{NaiveDate, NaiveTime};
use serde_json::json;
use tracing::{error, info, warn};

use crate::middleware::auth::CurrentAccount;
use crate::routes::error_response;
use crate::AppState;
use fixfit_db::repositories::{
    AppointmentRepository, AttachmentRef, CreateAppointmentInput,
};
use fixfit_shared::AppError;

/// Body limit for the booking form: the attachment cap plus form overhead.
const BOOKING_BODY_LIMIT: usize = 12 * 1024 * 1024;

/// Creates the appointment router (session required).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route(
            "/book-appointment",
            post(book_appointment).layer(DefaultBodyLimit::max(BOOKING_BODY_LIMIT)),
        )
}

/// GET /dashboard - The caller's appointments, newest schedule first.
async fn dashboard(
    State(state): State<AppState>,
    CurrentAccount(principal): CurrentAccount,
) -> impl IntoResponse {
    let repo = AppointmentRepository::new((*state.db).clone());
    let appointments = repo.list_for_account(principal.account_id).await;

    Json(json!({ "appointments": appointments }))
}

/// Booking form fields collected from the multipart body.
#[derive(Default)]
struct BookingForm {
    service: Option<String>,
    date: Option<String>,
    time: Option<String>,
    notes: Option<String>,
    attachment: Option<(String, Bytes)>,
}

impl BookingForm {
    /// Reads the multipart body into the form.
    async fn read(multipart: &mut Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("malformed form body: {e}")))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match name.as_str() {
                "service" => form.service = Some(read_text(field).await?),
                "date" => form.date = Some(read_text(field).await?),
                "time" => form.time = Some(read_text(field).await?),
                "notes" => form.notes = Some(read_text(field).await?),
                "attachment" => {
                    let filename = field.file_name().map(str::to_string);
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("unreadable attachment: {e}")))?;
                    if let Some(filename) = filename
                        && !filename.is_empty()
                        && !data.is_empty()
                    {
                        form.attachment = Some((filename, data));
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("malformed form field: {e}")))
}

/// POST /book-appointment - Book a service appointment.
///
/// Accepts a multipart form with `service`, `date`, `time`, optional
/// `notes`, and an optional `attachment` file. A failed or disabled upload
/// never fails the booking; the response carries an `upload_notice`
/// instead and the appointment is saved without attachment fields.
async fn book_appointment(
    State(state): State<AppState>,
    CurrentAccount(principal): CurrentAccount,
    mut multipart: Multipart,
) -> Response {
    let form = match BookingForm::read(&mut multipart).await {
        Ok(form) => form,
        Err(e) => return error_response(&e),
    };

    let Some(service) = form.service.filter(|s| !s.trim().is_empty()) else {
        return error_response(&AppError::Validation("service is required".to_string()));
    };

    let Some(date) = form
        .date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    else {
        return error_response(&AppError::Validation(
            "date must be formatted YYYY-MM-DD".to_string(),
        ));
    };

    let Some(time) = form.time.as_deref().and_then(parse_time) else {
        return error_response(&AppError::Validation(
            "time must be formatted HH:MM".to_string(),
        ));
    };

    // Attachment handling: extension filtering happens here, before the
    // storage adapter ever sees the file.
    let mut attachment = None;
    let mut upload_notice = None;

    if let Some((filename, data)) = form.attachment {
        match &state.storage {
            Some(storage) => {
                if !storage.config().is_extension_allowed(&filename) {
                    return error_response(&AppError::Validation(
                        "attachment type not allowed; upload a document or image".to_string(),
                    ));
                }

                match storage.upload(data, &filename, "appointments").await {
                    Ok(url) => attachment = Some(AttachmentRef { url, filename }),
                    Err(e) => {
                        warn!(error = %e, "attachment upload failed, booking without it");
                        upload_notice =
                            Some("attachment upload failed; the appointment was saved without it");
                    }
                }
            }
            None => {
                warn!("file uploads are disabled, booking without attachment");
                upload_notice =
                    Some("file uploads are currently disabled; the appointment was saved without the attachment");
            }
        }
    }

    let repo = AppointmentRepository::new((*state.db).clone());
    let created = repo
        .create(CreateAppointmentInput {
            account_id: principal.account_id,
            service,
            date,
            time,
            notes: form.notes.filter(|n| !n.trim().is_empty()),
            attachment,
        })
        .await;

    match created {
        Some(appointment) => {
            info!(appointment_id = %appointment.id, "appointment booked");
            (
                StatusCode::CREATED,
                Json(json!({
                    "appointment": appointment,
                    "upload_notice": upload_notice,
                })),
            )
                .into_response()
        }
        None => {
            error!("appointment booking failed");
            error_response(&AppError::Unavailable(
                "the appointment could not be saved, please try again".to_string(),
            ))
        }
    }
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("10:30", NaiveTime::from_hms_opt(10, 30, 0))]
    #[case("10:30:15", NaiveTime::from_hms_opt(10, 30, 15))]
    #[case("25:00", None)]
    #[case("not a time", None)]
    fn test_parse_time_formats(#[case] input: &str, #[case] expected: Option<NaiveTime>) {
        assert_eq!(parse_time(input), expected);
    }
}
