//! Authentication DTOs and the authenticated principal.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Registration request payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address, unique across accounts.
    #[validate(email)]
    pub email: String,
    /// Raw password; hashed before storage, never persisted as-is.
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    /// First name.
    #[validate(length(min = 1))]
    pub first_name: String,
    /// Last name.
    #[validate(length(min = 1))]
    pub last_name: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional date of birth.
    pub date_of_birth: Option<NaiveDate>,
    /// Optional postal address.
    pub address: Option<String>,
    /// Optional emergency contact name.
    pub emergency_contact: Option<String>,
    /// Optional emergency contact phone.
    pub emergency_phone: Option<String>,
}

/// Login request payload.
///
/// The identifier is either an email address or a patient number.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Email address or patient number.
    pub identifier: String,
    /// Raw password.
    pub password: String,
}

/// Public view of an account, safe to serialize.
#[derive(Debug, Clone, Serialize)]
pub struct AccountInfo {
    /// Account id.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Phone number, if provided.
    pub phone: Option<String>,
    /// Patient number, absent for administrator accounts.
    pub patient_number: Option<String>,
    /// Administrator flag.
    pub is_admin: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// The authenticated caller, resolved by the session middleware.
///
/// Field values are copied out of the account row at resolution time; the
/// principal never aliases store state.
#[derive(Debug, Clone)]
pub struct Principal {
    /// Stable account identifier.
    pub account_id: Uuid,
    /// Email address.
    pub email: String,
    /// Display name ("First Last").
    pub display_name: String,
    /// Administrator flag, as stored at the time the request was resolved.
    pub is_admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> RegisterRequest {
        RegisterRequest {
            email: "alice@example.com".to_string(),
            password: "a-long-password".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Example".to_string(),
            phone: None,
            date_of_birth: None,
            address: None,
            emergency_contact: None,
            emergency_phone: None,
        }
    }

    #[test]
    fn test_register_request_valid() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_register_request_rejects_bad_email() {
        let mut req = valid_request();
        req.email = "not-an-email".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_request_rejects_short_password() {
        let mut req = valid_request();
        req.password = "short".to_string();
        assert!(req.validate().is_err());
    }
}
