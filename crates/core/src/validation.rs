//! Input validation utilities.
//!
//! Raw form and API values are checked here before they reach the store, so every error
//! message names the offending field.

use crate::{PatientError, PatientResult};
use registry_types::{Age, NonEmptyText};

/// Validates a required free-text field such as the name or phone number.
///
/// # Errors
///
/// Returns `PatientError::InvalidInput` if the value is empty or whitespace-only.
pub fn required_text(field: &str, value: &str) -> PatientResult<NonEmptyText> {
    NonEmptyText::new(value)
        .map_err(|_| PatientError::InvalidInput(format!("{field} is required")))
}

/// Parses an age supplied as text.
///
/// # Errors
///
/// Returns `PatientError::InvalidInput` if the value is empty, not a whole number, or out of
/// range.
pub fn parse_age(value: &str) -> PatientResult<Age> {
    Age::parse(value).map_err(|e| PatientError::InvalidInput(e.to_string()))
}

/// Validates an age supplied as a number.
pub fn age_from_number(value: i64) -> PatientResult<Age> {
    Age::new(value).map_err(|e| PatientError::InvalidInput(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_names_the_field() {
        let err = required_text("phone", "  ").expect_err("blank phone should fail");
        assert_eq!(err.to_string(), "invalid input: phone is required");
    }

    #[test]
    fn parse_age_reports_reason() {
        let err = parse_age("abc").expect_err("non-numeric age should fail");
        assert!(matches!(err, PatientError::InvalidInput(msg) if msg.contains("whole number")));
        assert_eq!(parse_age("30").unwrap().value(), 30);
    }

    #[test]
    fn age_from_number_rejects_negative() {
        assert!(age_from_number(-5).is_err());
        assert_eq!(age_from_number(0).unwrap().value(), 0);
    }
}
