//! Field rules shared by the store and the client-side form pre-check.

use chrono::NaiveDate;
use std::fmt;

use crate::time::parse_due_date;

pub const TITLE_REQUIRED: &str = "Task title is required";
pub const DUE_DATE_REQUIRED: &str = "Due date is required";
pub const DUE_DATE_INVALID: &str = "Due date must be a valid date (YYYY-MM-DD)";
pub const DUE_DATE_IN_PAST: &str = "Due date cannot be in the past";
pub const STATUS_INVALID: &str = "Valid status is required (pending or completed)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    DueDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: Field, message: &'static str) -> Self {
        Self { field, message }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

impl std::error::Error for FieldError {}

/// Returns the trimmed title, or an error when nothing is left after trimming.
pub fn validate_title(raw: Option<&str>) -> Result<&str, FieldError> {
    match raw.map(str::trim) {
        Some(title) if !title.is_empty() => Ok(title),
        _ => Err(FieldError::new(Field::Title, TITLE_REQUIRED)),
    }
}

/// Parses the due date. When `not_before` is given, dates earlier than it are
/// rejected.
pub fn validate_due_date(
    raw: Option<&str>,
    not_before: Option<NaiveDate>,
) -> Result<NaiveDate, FieldError> {
    let raw = match raw.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(FieldError::new(Field::DueDate, DUE_DATE_REQUIRED)),
    };
    let due = parse_due_date(raw).map_err(|_| FieldError::new(Field::DueDate, DUE_DATE_INVALID))?;

    match not_before {
        Some(today) if due < today => Err(FieldError::new(Field::DueDate, DUE_DATE_IN_PAST)),
        _ => Ok(due),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_trimmed_and_required() {
        assert_eq!(validate_title(Some("  Buy milk ")).unwrap(), "Buy milk");
        assert_eq!(validate_title(Some("   ")).unwrap_err().field, Field::Title);
        assert_eq!(validate_title(None).unwrap_err().message, TITLE_REQUIRED);
    }

    #[test]
    fn due_date_rules() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();

        assert_eq!(validate_due_date(None, None).unwrap_err().message, DUE_DATE_REQUIRED);
        assert_eq!(validate_due_date(Some(""), None).unwrap_err().message, DUE_DATE_REQUIRED);
        assert_eq!(validate_due_date(Some("soon"), None).unwrap_err().message, DUE_DATE_INVALID);
        assert_eq!(
            validate_due_date(Some("2025-01-14"), Some(today)).unwrap_err().message,
            DUE_DATE_IN_PAST
        );
        assert_eq!(validate_due_date(Some("2025-01-15"), Some(today)).unwrap(), today);
        // Without a lower bound, past dates pass
        assert!(validate_due_date(Some("2020-01-01"), None).is_ok());
    }
}
