//! Shared value types.

mod patient_number;

pub use patient_number::{ParsePatientNumberError, PatientNumber};
