//! # Validation Module
//!
//! Input parsing and validation utilities for Facture.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI / request DTO                                            │
//! │  └── Raw strings as typed ("1 500,50", "10", "abc")                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── parse_decimal: comma or dot, no locale                            │
//! │  └── Range rules: quantity ≥ 0, price ≥ 0, percentage 0–100            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Calculator                                                   │
//! │  └── Re-checks every line before summing                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use facture_core::validation::{parse_decimal, validate_quantity};
//!
//! let qty = parse_decimal("quantity", "2,5").unwrap();
//! validate_quantity(qty).unwrap();
//! ```

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Percentage;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Parsing
// =============================================================================

/// Parses a user-typed decimal.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - `,` or `.` is the decimal separator
/// - Spaces inside the number (thousands grouping) are ignored
///
/// ## Example
/// ```rust
/// use facture_core::validation::parse_decimal;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_decimal("price", "1 500,50").unwrap(), Decimal::new(150050, 2));
/// assert!(parse_decimal("price", "douze").is_err());
/// ```
pub fn parse_decimal(field: &str, raw: &str) -> ValidationResult<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::required(field));
    }

    let normalized: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    Decimal::from_str(&normalized).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: format!("'{}' is not a number", trimmed),
    })
}

/// Parses a percentage typed by the user ("10", "12,5").
///
/// A blank value means no discount.
pub fn parse_percentage(field: &str, raw: &str) -> ValidationResult<Percentage> {
    if raw.trim().is_empty() {
        return Ok(Percentage::zero());
    }
    let value = parse_decimal(field, raw)?;
    validate_percentage(field, value)
}

// =============================================================================
// String Validators
// =============================================================================

/// Rejects empty or whitespace-only text.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Generic non-negativity check.
pub fn validate_non_negative(field: &str, value: Decimal) -> ValidationResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::negative(field));
    }
    Ok(())
}

/// Validates a line quantity.
///
/// ## Rules
/// - Must be non-negative (≥ 0)
/// - Zero is allowed (the line prints with a zero total)
pub fn validate_quantity(quantity: Decimal) -> ValidationResult<()> {
    validate_non_negative("quantity", quantity)
}

/// Validates a unit price. Zero is allowed (free items).
pub fn validate_unit_price(price: Decimal) -> ValidationResult<()> {
    validate_non_negative("unit_price", price)
}

/// Validates a percentage and names the field on failure.
///
/// ## Example
/// ```rust
/// use facture_core::validation::validate_percentage;
/// use rust_decimal::Decimal;
///
/// assert!(validate_percentage("discount", Decimal::from(10)).is_ok());
/// assert!(validate_percentage("discount", Decimal::from(101)).is_err());
/// ```
pub fn validate_percentage(field: &str, value: Decimal) -> ValidationResult<Percentage> {
    Percentage::new(value).map_err(|_| ValidationError::OutOfRange {
        field: field.to_string(),
        min: "0".to_string(),
        max: "100".to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_decimal_separators() {
        assert_eq!(parse_decimal("q", "12").unwrap(), dec!(12));
        assert_eq!(parse_decimal("q", " 2,5 ").unwrap(), dec!(2.5));
        assert_eq!(parse_decimal("q", "2.5").unwrap(), dec!(2.5));
        assert_eq!(parse_decimal("q", "1 234,56").unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal("q", "-3").unwrap(), dec!(-3));
    }

    #[test]
    fn test_parse_decimal_invalid() {
        assert_eq!(parse_decimal("quantity", ""), Err(ValidationError::required("quantity")));
        assert!(matches!(
            parse_decimal("quantity", "abc"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(parse_decimal("quantity", "1,2,3").is_err());
    }

    #[test]
    fn test_parse_percentage() {
        assert_eq!(parse_percentage("discount", "").unwrap(), Percentage::zero());
        assert_eq!(parse_percentage("discount", "12,5").unwrap().value(), dec!(12.5));
        assert!(matches!(
            parse_percentage("discount", "150"),
            Err(ValidationError::OutOfRange { ref field, .. }) if field == "discount"
        ));
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("name", "Sonatrach").is_ok());
        assert!(validate_required("name", "  ").is_err());
    }

    #[test]
    fn test_quantity_and_price() {
        assert!(validate_quantity(dec!(0)).is_ok());
        assert!(validate_quantity(dec!(2.5)).is_ok());
        assert_eq!(validate_quantity(dec!(-1)), Err(ValidationError::negative("quantity")));
        assert!(validate_unit_price(dec!(0)).is_ok());
        assert!(validate_unit_price(dec!(-0.01)).is_err());
    }
}
