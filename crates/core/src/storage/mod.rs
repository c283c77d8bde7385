//! Object storage adapter for appointment attachments, using Apache OpenDAL.
//!
//! One contract, three interchangeable backends selected by configuration at
//! startup:
//! - Local filesystem (development; files served by the API itself)
//! - S3 (access-key authenticated bucket storage)
//! - GCS (identity-integrated bucket storage)
//!
//! The adapter owns the storage key layout: callers hand over a stream, an
//! original filename, and a logical folder, and get back a public URL.
//! Deletion works from that URL alone.

mod config;
mod error;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::StorageService;
