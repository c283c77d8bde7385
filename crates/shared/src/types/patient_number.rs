//! Patient number value type.
//!
//! A patient number is a human-readable identifier of the form `FF` followed
//! by six digits, distinct from the internal account id. It is generated for
//! every non-administrator account and printed on the physical patient card.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when parsing a malformed patient number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid patient number: expected FF followed by six digits")]
pub struct ParsePatientNumberError;

/// A validated `FF######` patient number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PatientNumber(String);

impl PatientNumber {
    /// Builds a patient number from a six digit serial. Values outside the
    /// six digit range wrap into it.
    #[must_use]
    pub fn from_serial(serial: u32) -> Self {
        Self(format!("FF{:06}", serial % 1_000_000))
    }

    /// Returns the patient number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PatientNumber {
    type Err = ParsePatientNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("FF").ok_or(ParsePatientNumberError)?;
        if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(s.to_string()))
        } else {
            Err(ParsePatientNumberError)
        }
    }
}

impl TryFrom<String> for PatientNumber {
    type Error = ParsePatientNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PatientNumber> for String {
    fn from(value: PatientNumber) -> Self {
        value.0
    }
}

impl fmt::Display for PatientNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_valid() {
        let num: PatientNumber = "FF123456".parse().expect("should parse");
        assert_eq!(num.as_str(), "FF123456");
    }

    #[rstest]
    #[case::bad_prefix("GG123456")]
    #[case::no_prefix("123456")]
    #[case::too_short("FF12345")]
    #[case::too_long("FF1234567")]
    #[case::empty_digits("FF")]
    #[case::non_digit("FF12E456")]
    fn test_parse_rejects_malformed(#[case] input: &str) {
        assert!(input.parse::<PatientNumber>().is_err());
    }

    #[test]
    fn test_from_serial() {
        assert_eq!(PatientNumber::from_serial(123_456).as_str(), "FF123456");
        assert_eq!(PatientNumber::from_serial(42).as_str(), "FF000042");
    }

    #[test]
    fn test_from_serial_wraps() {
        assert_eq!(PatientNumber::from_serial(1_234_567).as_str(), "FF234567");
    }

    #[test]
    fn test_display_round_trip() {
        let num = PatientNumber::from_serial(987_654);
        let parsed: PatientNumber = num.to_string().parse().expect("should parse");
        assert_eq!(num, parsed);
    }
}
