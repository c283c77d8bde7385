//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations
//!
//! Repositories absorb backend failures on read paths: a lookup against an
//! unreachable store logs the failure and returns an empty value, so route
//! handlers only ever deal in presence/absence.

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    AccountRepository, AppointmentRepository, ArticleRepository, DashboardRepository,
    SessionRepository,
};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
