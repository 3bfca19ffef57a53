//! Validation utilities for the Price Tracker platform
//!
//! Field validators used by the `validator` derive on input structs, plus a
//! few plain checks reused by the services.

use std::borrow::Cow;

use rust_decimal::Decimal;
use validator::ValidationError;

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

// ============================================================================
// Field Validators
// ============================================================================

/// Reject names that are empty once trimmed
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("blank", "must not be blank"));
    }
    Ok(())
}

/// Monetary amounts on catalog entities cannot be negative
pub fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        return Err(invalid("negative", "must not be negative"));
    }
    Ok(())
}

/// VAT is a percentage between 0 and 100
pub fn validate_vat_percentage(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO || *value > Decimal::ONE_HUNDRED {
        return Err(invalid("vat_range", "must be between 0 and 100"));
    }
    Ok(())
}

/// Three-letter alphabetic currency code, any case
pub fn validate_currency_code(value: &str) -> Result<(), ValidationError> {
    let code = value.trim();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid("currency", "must be a three-letter currency code"));
    }
    Ok(())
}

// ============================================================================
// Plain Checks
// ============================================================================

/// Trim a user-entered name, returning `None` when nothing is left
pub fn clean_name(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Trim an optional text field, collapsing blank input to `None`
pub fn clean_optional(value: Option<String>) -> Option<String> {
    value.and_then(|v| clean_name(&v))
}
