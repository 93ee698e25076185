//! # Quantity Module
//!
//! Provides the `Quantity` type: a strictly positive, finite amount.
//!
//! ## Why a Newtype?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Request text carries fractions and decimals:                          │
//! │                                                                         │
//! │    "1/2 rice"   → 0.5                                                   │
//! │    "milk 1.5"   → 1.5                                                   │
//! │    "2 bread"    → 2                                                     │
//! │                                                                         │
//! │  A bare f64 would also admit 0, -3, NaN and ∞. Quantity can only be    │
//! │  built through `Quantity::new` and sums clamp at f64::MAX, so every    │
//! │  ParsedItem and CartEntry holds an amount that is > 0 and finite.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use basket_core::quantity::Quantity;
//!
//! let half = Quantity::new(0.5).unwrap();
//! let total = half + Quantity::ONE;
//! assert_eq!(total.value(), 1.5);
//! assert_eq!(total.to_string(), "1.5");
//!
//! assert!(Quantity::new(0.0).is_none());
//! assert!(Quantity::new(f64::INFINITY).is_none());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

use crate::error::ValidationError;

/// A positive, finite item amount.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, TS)]
#[serde(try_from = "f64", into = "f64")]
#[ts(export)]
pub struct Quantity(f64);

impl Quantity {
    /// One unit; the amount used when a request names an item without a number.
    pub const ONE: Quantity = Quantity(1.0);

    /// Creates a quantity, rejecting zero, negatives, NaN and infinities.
    #[inline]
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && value > 0.0 {
            Some(Quantity(value))
        } else {
            None
        }
    }

    /// Returns the raw amount.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Adds two amounts, clamping at `f64::MAX` instead of overflowing to ∞.
    ///
    /// ```rust
    /// use basket_core::quantity::Quantity;
    ///
    /// let huge = Quantity::new(f64::MAX).unwrap();
    /// assert_eq!(huge.saturating_add(huge).value(), f64::MAX);
    /// ```
    #[inline]
    pub fn saturating_add(self, other: Self) -> Self {
        let sum = self.0 + other.0;
        if sum.is_finite() {
            Quantity(sum)
        } else {
            Quantity(f64::MAX)
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::ONE
    }
}

/// Prints `2` for whole amounts and `0.5` for fractional ones.
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for Quantity {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(ValidationError::InvalidFormat {
                field: "quantity".to_string(),
                reason: "must be a finite number".to_string(),
            });
        }
        Quantity::new(value).ok_or_else(|| ValidationError::MustBePositive {
            field: "quantity".to_string(),
        })
    }
}

impl From<Quantity> for f64 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

/// Saturating; see [`Quantity::saturating_add`].
impl Add for Quantity {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        self.saturating_add(other)
    }
}

impl AddAssign for Quantity {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = self.saturating_add(other);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_non_positive_and_non_finite() {
        assert!(Quantity::new(1.0).is_some());
        assert!(Quantity::new(0.25).is_some());

        assert!(Quantity::new(0.0).is_none());
        assert!(Quantity::new(-2.0).is_none());
        assert!(Quantity::new(f64::NAN).is_none());
        assert!(Quantity::new(f64::INFINITY).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Quantity::new(2.0).unwrap().to_string(), "2");
        assert_eq!(Quantity::new(0.5).unwrap().to_string(), "0.5");
        assert_eq!(Quantity::ONE.to_string(), "1");
    }

    #[test]
    fn test_arithmetic() {
        let mut q = Quantity::new(0.5).unwrap();
        q += Quantity::new(1.5).unwrap();
        assert_eq!(q.value(), 2.0);
        assert_eq!((q + Quantity::ONE).value(), 3.0);
    }

    #[test]
    fn test_addition_stays_finite() {
        let huge = Quantity::new(f64::MAX / 1.5).unwrap();
        let mut sum = huge + huge;
        assert_eq!(sum.value(), f64::MAX);

        sum += huge;
        assert_eq!(sum.value(), f64::MAX);

        let json = serde_json::to_string(&sum).unwrap();
        let back: Quantity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sum);
    }

    #[test]
    fn test_serde_rejects_invalid_amounts() {
        let q: Quantity = serde_json::from_str("2.5").unwrap();
        assert_eq!(q.value(), 2.5);
        assert_eq!(serde_json::to_string(&q).unwrap(), "2.5");

        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert!(serde_json::from_str::<Quantity>("-1").is_err());
    }

    #[test]
    fn test_try_from_errors() {
        assert!(matches!(
            Quantity::try_from(0.0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            Quantity::try_from(f64::NAN),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }
}
