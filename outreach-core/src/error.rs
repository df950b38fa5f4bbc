//! Error types for outreach operations

use thiserror::Error;

/// Validation errors raised before a payload is sent to the backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: &'static str },

    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },

    #[error("Invalid ordering: {reason}")]
    InvalidOrder { reason: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl ValidationError {
    /// Check `value` against an inclusive range.
    pub fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> ValidationResult<()> {
        if value < min || value > max {
            return Err(ValidationError::OutOfRange {
                field,
                min,
                max,
                value,
            });
        }
        Ok(())
    }

    /// Reject empty or whitespace-only text.
    pub fn check_required(field: &'static str, value: &str) -> ValidationResult<()> {
        if value.trim().is_empty() {
            return Err(ValidationError::RequiredFieldMissing { field });
        }
        Ok(())
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Error when parsing an unknown enum spelling.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_range_bounds_are_inclusive() {
        assert!(ValidationError::check_range("count", 1, 1, 30).is_ok());
        assert!(ValidationError::check_range("count", 30, 1, 30).is_ok());
        assert_eq!(
            ValidationError::check_range("count", 31, 1, 30),
            Err(ValidationError::OutOfRange {
                field: "count",
                min: 1,
                max: 30,
                value: 31
            })
        );
    }

    #[test]
    fn test_check_required_rejects_whitespace() {
        assert!(ValidationError::check_required("industry", "  ").is_err());
        assert!(ValidationError::check_required("industry", "Technology").is_ok());
    }

    #[test]
    fn test_error_messages_name_the_field() {
        let err = ValidationError::RequiredFieldMissing { field: "country" };
        assert_eq!(err.to_string(), "Required field missing: country");
    }
}
