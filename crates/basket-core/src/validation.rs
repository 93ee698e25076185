//! # Validation Module
//!
//! Input validation for manual cart edits and history writes.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Free-text request ──► parse()        never fails; bad pieces degrade   │
//! │                                                                         │
//! │  Manual edit (add / update entry) ──► THIS MODULE                       │
//! │  ├── name present and bounded                                           │
//! │  ├── quantity positive, finite, under the limit                         │
//! │  └── price non-negative                                                 │
//! │                                                                         │
//! │  History write ──► query present                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use basket_core::validation::{validate_item_name, validate_quantity};
//!
//! assert_eq!(validate_item_name("  Rice ").unwrap(), "Rice");
//! assert!(validate_quantity(2.0, 999.0).is_ok());
//! assert!(validate_quantity(0.0, 999.0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::quantity::Quantity;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted entry name, in characters.
pub const MAX_NAME_LEN: usize = 200;

/// Longest accepted history query, in characters.
pub const MAX_QUERY_LEN: usize = 1000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an entry name and returns it trimmed.
pub fn validate_item_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates a history query. Blank queries are rejected.
pub fn validate_history_query(query: &str) -> ValidationResult<()> {
    if query.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "query".to_string(),
        });
    }

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(())
}

/// Validates an entry id (UUID format).
///
/// ```rust
/// use basket_core::validation::validate_entry_id;
///
/// assert!(validate_entry_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_entry_id("not-an-id").is_err());
/// ```
pub fn validate_entry_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity typed by the user.
///
/// ## Rules
/// - Must be finite and positive (> 0)
/// - Must not exceed `max`
pub fn validate_quantity(value: f64, max: f64) -> ValidationResult<Quantity> {
    let quantity = Quantity::try_from(value)?;

    if quantity.value() > max {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0.0,
            max,
        });
    }

    Ok(quantity)
}

/// Validates a unit price. Zero is allowed (price not yet known).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0.0,
            max: i64::MAX as f64,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_name() {
        assert_eq!(validate_item_name("Basmati Rice").unwrap(), "Basmati Rice");
        assert_eq!(validate_item_name("  Milk\t").unwrap(), "Milk");

        assert!(validate_item_name("").is_err());
        assert!(validate_item_name("   ").is_err());
        assert!(validate_item_name(&"A".repeat(201)).is_err());
        assert!(validate_item_name(&"é".repeat(200)).is_ok());
    }

    #[test]
    fn test_validate_history_query() {
        assert!(validate_history_query("12345, 67890").is_ok());
        assert!(matches!(
            validate_history_query("  "),
            Err(ValidationError::Required { .. })
        ));
        assert!(validate_history_query(&"x".repeat(1001)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert_eq!(validate_quantity(0.5, 999.0).unwrap().value(), 0.5);
        assert!(validate_quantity(999.0, 999.0).is_ok());

        assert!(validate_quantity(0.0, 999.0).is_err());
        assert!(validate_quantity(-1.0, 999.0).is_err());
        assert!(validate_quantity(f64::NAN, 999.0).is_err());
        assert!(matches!(
            validate_quantity(1000.0, 999.0),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_minor(1099)).is_ok());
        assert!(validate_price(Money::from_minor(-100)).is_err());
    }

    #[test]
    fn test_validate_entry_id() {
        assert!(validate_entry_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_entry_id("").is_err());
        assert!(validate_entry_id("123").is_err());
    }
}
