//! # Validation Module
//!
//! Field validation for create and update payloads.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Type checks (numbers are numbers, lists are lists)                │
//! │  └── Defaults (taxApplicability=false, taxType=percentage)             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (called by the menu-db create/update flows)      │
//! │  ├── Required fields present and non-blank                             │
//! │  ├── Length caps                                                       │
//! │  └── Conditional rule: Category.tax required iff taxApplicability      │
//! │                                                                         │
//! │  Parent-existence checks are NOT validation: they are store lookups    │
//! │  and live in menu-db, where they surface as NotFound.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::{MAX_DESCRIPTION_LEN, MAX_NAME_LEN};

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a required text field.
///
/// ## Rules
/// - Must be present and non-blank after trimming
/// - Must not exceed `max` characters
///
/// ## Returns
/// The trimmed value.
///
/// ## Example
/// ```rust
/// use menu_core::validation::required_text;
///
/// assert_eq!(required_text("name", Some("  Cola "), 200).unwrap(), "Cola");
/// assert!(required_text("name", None, 200).is_err());
/// assert!(required_text("name", Some("   "), 200).is_err());
/// ```
pub fn required_text(field: &str, value: Option<&str>, max: usize) -> ValidationResult<String> {
    let value = value.unwrap_or("").trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

/// Validates a required entity name.
pub fn required_name(value: Option<&str>) -> ValidationResult<String> {
    required_text("name", value, MAX_NAME_LEN)
}

/// Validates a required image URL.
pub fn required_image(value: Option<&str>) -> ValidationResult<String> {
    required_text("image", value, MAX_DESCRIPTION_LEN)
}

/// Validates a required description.
pub fn required_description(value: Option<&str>) -> ValidationResult<String> {
    required_text("description", value, MAX_DESCRIPTION_LEN)
}

/// Validates a required numeric field (baseAmount, totalAmount).
pub fn required_number(field: &str, value: Option<f64>) -> ValidationResult<f64> {
    value.ok_or_else(|| ValidationError::Required {
        field: field.to_string(),
    })
}

/// Validates the Category tax rule.
///
/// ## The Conditional-Required Invariant
/// `tax` has no unconditional default on Category: it is required exactly
/// when `taxApplicability` is true, and may be absent otherwise.
///
/// ## Example
/// ```rust
/// use menu_core::validation::category_tax;
///
/// assert_eq!(category_tax(true, Some(5.0)).unwrap(), Some(5.0));
/// assert!(category_tax(true, None).is_err());
/// assert_eq!(category_tax(false, None).unwrap(), None);
/// ```
pub fn category_tax(tax_applicability: bool, tax: Option<f64>) -> ValidationResult<Option<f64>> {
    if tax_applicability && tax.is_none() {
        return Err(ValidationError::ConditionallyRequired {
            field: "tax".to_string(),
            condition: "taxApplicability is true".to_string(),
        });
    }

    Ok(tax)
}

// =============================================================================
// Unit Tests
// =============================================================================
