//! Appointment repository for database operations.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Serialize;
use tracing::error;
use uuid::Uuid;

use crate::entities::{accounts, appointments, sea_orm_active_enums::AppointmentStatus};

/// Reference to an uploaded attachment.
#[derive(Debug, Clone)]
pub struct AttachmentRef {
    /// Public URL returned by the storage adapter.
    pub url: String,
    /// Original filename as supplied by the caller.
    pub filename: String,
}

/// Input for creating an appointment.
#[derive(Debug, Clone)]
pub struct CreateAppointmentInput {
    /// Owning account. Must exist; enforced by the foreign key.
    pub account_id: Uuid,
    /// Requested service category.
    pub service: String,
    /// Requested date.
    pub date: NaiveDate,
    /// Requested time of day.
    pub time: NaiveTime,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Optional uploaded attachment.
    pub attachment: Option<AttachmentRef>,
}

/// An appointment together with its owning account, when it resolves.
///
/// A dangling owner reference degrades to `None` instead of failing the
/// read; display layers show an absent owner.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentWithAccount {
    /// The appointment row.
    pub appointment: appointments::Model,
    /// The owning account, if it resolved.
    pub account: Option<accounts::Model>,
}

/// Appointment repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct AppointmentRepository {
    db: DatabaseConnection,
}

impl AppointmentRepository {
    /// Creates a new appointment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an appointment with status `pending`.
    ///
    /// Returns `None` when the store rejects the write (including a missing
    /// owning account); the failure is logged and the caller surfaces a
    /// user-facing message.
    pub async fn create(&self, input: CreateAppointmentInput) -> Option<appointments::Model> {
        let scheduled_at = NaiveDateTime::new(input.date, input.time).and_utc();
        let (attachment_url, attachment_filename) = match input.attachment {
            Some(attachment) => (Some(attachment.url), Some(attachment.filename)),
            None => (None, None),
        };

        let appointment = appointments::ActiveModel {
            id: Set(Uuid::new_v4()),
            account_id: Set(input.account_id),
            service: Set(input.service),
            scheduled_at: Set(scheduled_at.into()),
            notes: Set(input.notes),
            status: Set(AppointmentStatus::Pending),
            attachment_url: Set(attachment_url),
            attachment_filename: Set(attachment_filename),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };

        match appointment.insert(&self.db).await {
            Ok(model) => Some(model),
            Err(e) => {
                error!(error = %e, "failed to create appointment");
                None
            }
        }
    }

    /// Lists one account's appointments, newest schedule first.
    pub async fn list_for_account(&self, account_id: Uuid) -> Vec<appointments::Model> {
        appointments::Entity::find()
            .filter(appointments::Column::AccountId.eq(account_id))
            .order_by_desc(appointments::Column::ScheduledAt)
            .all(&self.db)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "appointment listing for account failed");
                Vec::new()
            })
    }

    /// Lists all appointments with their owning accounts, newest schedule
    /// first.
    pub async fn list_all(&self) -> Vec<AppointmentWithAccount> {
        appointments::Entity::find()
            .find_also_related(accounts::Entity)
            .order_by_desc(appointments::Column::ScheduledAt)
            .all(&self.db)
            .await
            .map(|rows| {
                rows.into_iter()
                    .map(|(appointment, account)| AppointmentWithAccount {
                        appointment,
                        account,
                    })
                    .collect()
            })
            .unwrap_or_else(|e| {
                error!(error = %e, "appointment listing failed");
                Vec::new()
            })
    }

    /// Gets one appointment with its owning account.
    pub async fn get(&self, id: Uuid) -> Option<AppointmentWithAccount> {
        appointments::Entity::find_by_id(id)
            .find_also_related(accounts::Entity)
            .one(&self.db)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "appointment lookup failed");
                None
            })
            .map(|(appointment, account)| AppointmentWithAccount {
                appointment,
                account,
            })
    }

    /// Overwrites an appointment's status and stamps the update time.
    ///
    /// Any status may follow any other. Returns `false` when the row does
    /// not exist or the write fails; applying the same status twice is a
    /// plain overwrite and succeeds both times.
    pub async fn update_status(&self, id: Uuid, status: AppointmentStatus) -> bool {
        let change = appointments::ActiveModel {
            id: Set(id),
            status: Set(status),
            updated_at: Set(Some(chrono::Utc::now().into())),
            ..Default::default()
        };

        match change.update(&self.db).await {
            Ok(_) => true,
            Err(e) => {
                error!(error = %e, appointment_id = %id, "failed to update appointment status");
                false
            }
        }
    }
}
