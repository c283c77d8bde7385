//! Core logic for Fix & Fit.
//!
//! This crate holds the pieces of the system that are independent of the web
//! and database layers:
//! - Password hashing and verification (argon2id)
//! - The object storage adapter for appointment attachments

pub mod auth;
pub mod storage;
