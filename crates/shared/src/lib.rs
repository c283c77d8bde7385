//! Shared types, errors, and configuration for Fix & Fit.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management
//! - Request/response DTOs for the HTTP layer
//! - The authenticated principal passed between middleware and handlers
//! - The patient number value type

pub mod auth;
pub mod config;
pub mod error;
pub mod types;

pub use auth::Principal;
pub use config::{AppConfig, AuthConfig, StorageSettings};
pub use error::{AppError, AppResult};
pub use types::PatientNumber;
