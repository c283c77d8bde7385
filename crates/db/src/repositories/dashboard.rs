//! Dashboard repository for the admin summary counters.

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use tracing::error;

use crate::entities::{accounts, appointments, sea_orm_active_enums::AppointmentStatus};
use crate::repositories::appointment::AppointmentWithAccount;

/// Read-only statistics queries for the admin dashboard.
///
/// Counters report `0` when the store is unreachable; the dashboard renders
/// zeros rather than an error page.
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    db: DatabaseConnection,
}

impl DashboardRepository {
    /// Creates a new dashboard repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Total number of accounts.
    pub async fn count_accounts(&self) -> u64 {
        accounts::Entity::find()
            .count(&self.db)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "account count failed");
                0
            })
    }

    /// Total number of appointments.
    pub async fn count_appointments(&self) -> u64 {
        appointments::Entity::find()
            .count(&self.db)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "appointment count failed");
                0
            })
    }

    /// Number of appointments in one status.
    pub async fn count_appointments_by_status(&self, status: AppointmentStatus) -> u64 {
        appointments::Entity::find()
            .filter(appointments::Column::Status.eq(status))
            .count(&self.db)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "appointment count by status failed");
                0
            })
    }

    /// The most recently created appointments with their owning accounts.
    pub async fn recent_appointments(&self, limit: u64) -> Vec<AppointmentWithAccount> {
        appointments::Entity::find()
            .find_also_related(accounts::Entity)
            .order_by_desc(appointments::Column::CreatedAt)
            .limit(limit)
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
                error!(error = %e, "recent appointment listing failed");
                Vec::new()
            })
    }
}
