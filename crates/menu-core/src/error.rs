//! # Error Types
//!
//! Domain-specific error types for menu-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  menu-core errors (this file)                                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  menu-db errors (separate crate)                                       │
//! │  └── DbError          - Database operation failures, NotFound          │
//! │                                                                         │
//! │  HTTP errors (apps/api)                                                │
//! │  └── ApiError         - What clients see (status + {"error": msg})     │
//! │                                                                         │
//! │  Flow: ValidationError → DbError → ApiError → Client                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Input validation errors.
///
/// These errors occur when a create or update payload doesn't meet the
/// schema requirements. They are surfaced as HTTP 400 by the API layer.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A field is required only because of another field's value.
    ///
    /// The one case in this schema: Category.tax is required when
    /// Category.taxApplicability is true.
    #[error("{field} is required when {condition}")]
    ConditionallyRequired { field: String, condition: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., unrecognized tax type).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::ConditionallyRequired {
            field: "tax".to_string(),
            condition: "taxApplicability is true".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "tax is required when taxApplicability is true"
        );
    }
}
