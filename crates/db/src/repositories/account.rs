//! Account repository for database operations.

use chrono::NaiveDate;
use rand::Rng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::error;
use uuid::Uuid;

use fixfit_core::auth::{hash_password, verify_password};
use fixfit_shared::PatientNumber;

use crate::entities::accounts;

/// Errors that can occur when creating an account.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// The email address is already registered.
    #[error("email is already registered")]
    EmailTaken,

    /// The patient number is already assigned.
    #[error("patient number is already assigned")]
    PatientNumberTaken,

    /// Password hashing failed.
    #[error("failed to hash credential: {0}")]
    Credential(String),

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Email address, unique across accounts.
    pub email: String,
    /// Raw password; hashed before storage.
    pub password: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Patient number. Generated for non-administrator accounts when absent.
    pub patient_number: Option<PatientNumber>,
    /// Optional date of birth.
    pub date_of_birth: Option<NaiveDate>,
    /// Optional postal address.
    pub address: Option<String>,
    /// Optional emergency contact name.
    pub emergency_contact: Option<String>,
    /// Optional emergency contact phone.
    pub emergency_phone: Option<String>,
    /// Administrator flag.
    pub is_admin: bool,
}

/// Account repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new account.
    ///
    /// Hashes the password, assigns an id, and generates an `FF######`
    /// patient number for non-administrator accounts without one. The
    /// email and patient number existence checks run before the insert;
    /// the unique indexes are the backstop for the race between them.
    ///
    /// # Errors
    ///
    /// Returns `EmailTaken`/`PatientNumberTaken` on a duplicate, or a
    /// database error if the store is unreachable.
    pub async fn create(&self, input: CreateAccountInput) -> Result<accounts::Model, AccountError> {
        if self.email_exists(&input.email).await? {
            return Err(AccountError::EmailTaken);
        }

        let patient_number = match input.patient_number {
            Some(number) => Some(number),
            None if input.is_admin => None,
            None => Some(PatientNumber::from_serial(
                rand::rng().random_range(100_000..1_000_000),
            )),
        };

        if let Some(number) = &patient_number
            && self.patient_number_exists(number.as_str()).await?
        {
            return Err(AccountError::PatientNumberTaken);
        }

        let password_hash =
            hash_password(&input.password).map_err(|e| AccountError::Credential(e.to_string()))?;

        let account = accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(input.email),
            password_hash: Set(password_hash),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            phone: Set(input.phone),
            patient_number: Set(patient_number.map(|n| n.to_string())),
            date_of_birth: Set(input.date_of_birth),
            address: Set(input.address),
            emergency_contact: Set(input.emergency_contact),
            emergency_phone: Set(input.emergency_phone),
            is_admin: Set(input.is_admin),
            created_at: Set(chrono::Utc::now().into()),
        };

        Ok(account.insert(&self.db).await?)
    }

    /// Ensures the administrator bootstrap account exists.
    ///
    /// Looks the account up by email and re-creates it when missing; an
    /// existing account is left untouched and `None` is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup or the insert fails.
    pub async fn ensure_admin(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<accounts::Model>, AccountError> {
        if self.email_exists(email).await? {
            return Ok(None);
        }

        let created = self
            .create(CreateAccountInput {
                email: email.to_string(),
                password: password.to_string(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                phone: None,
                patient_number: None,
                date_of_birth: None,
                address: None,
                emergency_contact: None,
                emergency_phone: None,
                is_admin: true,
            })
            .await?;

        Ok(Some(created))
    }

    /// Finds an account by email. Absent or unreachable is `None`.
    pub async fn find_by_email(&self, email: &str) -> Option<accounts::Model> {
        accounts::Entity::find()
            .filter(accounts::Column::Email.eq(email))
            .one(&self.db)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "account lookup by email failed");
                None
            })
    }

    /// Finds an account by patient number. Absent or unreachable is `None`.
    pub async fn find_by_patient_number(&self, number: &str) -> Option<accounts::Model> {
        accounts::Entity::find()
            .filter(accounts::Column::PatientNumber.eq(number))
            .one(&self.db)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "account lookup by patient number failed");
                None
            })
    }

    /// Finds an account by id. Absent or unreachable is `None`.
    pub async fn find_by_id(&self, id: Uuid) -> Option<accounts::Model> {
        accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "account lookup by id failed");
                None
            })
    }

    /// Lists all accounts, newest-created-first.
    pub async fn list(&self) -> Vec<accounts::Model> {
        accounts::Entity::find()
            .order_by_desc(accounts::Column::CreatedAt)
            .all(&self.db)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "account listing failed");
                Vec::new()
            })
    }

    /// Checks a raw password against an account's stored credential.
    ///
    /// A malformed stored hash counts as a verification failure.
    #[must_use]
    pub fn verify_credential(account: &accounts::Model, password: &str) -> bool {
        verify_password(password, &account.password_hash)
    }

    /// Checks if an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = accounts::Entity::find()
            .filter(accounts::Column::Email.eq(email))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Checks if a patient number is already assigned.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn patient_number_exists(&self, number: &str) -> Result<bool, DbErr> {
        let count = accounts::Entity::find()
            .filter(accounts::Column::PatientNumber.eq(number))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }
}
