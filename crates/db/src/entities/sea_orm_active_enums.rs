//! `SeaORM` active enums mapped to Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Appointment lifecycle status.
///
/// New appointments start as `Pending`; administrators may move an
/// appointment to any status at any time, there is no enforced ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "appointment_status")]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    /// Booked, awaiting review.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Accepted by the clinic.
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    /// Visit took place.
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Called off by either side.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl AppointmentStatus {
    /// Parses a status from its wire form. Unknown values return `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// The wire form of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppointmentStatus::Pending)]
    #[case(AppointmentStatus::Confirmed)]
    #[case(AppointmentStatus::Completed)]
    #[case(AppointmentStatus::Cancelled)]
    fn test_parse_round_trip(#[case] status: AppointmentStatus) {
        assert_eq!(AppointmentStatus::parse(status.as_str()), Some(status));
    }

    #[rstest]
    #[case("scheduled")]
    #[case("PENDING")]
    #[case("")]
    fn test_parse_rejects_unknown(#[case] value: &str) {
        assert_eq!(AppointmentStatus::parse(value), None);
    }
}
