//! # Money Module
//!
//! Provides the `Money` type for entry prices and cart totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (paise)                              │
//! │    ₹12.50 is stored as 1250                                             │
//! │                                                                         │
//! │  Quantities may be fractional (½ kg), so a line total rounds once,     │
//! │  at the point where price × quantity is taken.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use basket_core::money::Money;
//! use basket_core::quantity::Quantity;
//!
//! let price = Money::from_minor(8050); // ₹80.50 per kg
//! let half = Quantity::new(0.5).unwrap();
//!
//! assert_eq!(price.multiply_quantity(half).minor(), 4025);
//! assert_eq!(price.to_string(), "₹80.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

use crate::quantity::Quantity;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Where Money is Used
/// ```text
/// CartEntry.price ──► CartEntry::line_total() ──► CartSummary.total_price
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ```rust
    /// use basket_core::money::Money;
    ///
    /// let price = Money::from_minor(1099);
    /// assert_eq!(price.minor(), 1099);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the fractional portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a (possibly fractional) quantity.
    ///
    /// Rounds half away from zero to the nearest minor unit.
    ///
    /// ```rust
    /// use basket_core::money::Money;
    /// use basket_core::quantity::Quantity;
    ///
    /// let unit_price = Money::from_minor(299);
    /// let three = Quantity::new(3.0).unwrap();
    /// assert_eq!(unit_price.multiply_quantity(three).minor(), 897);
    ///
    /// // 0.333.. × 100 = 33.33 → 33
    /// let third = Quantity::new(1.0 / 3.0).unwrap();
    /// assert_eq!(Money::from_minor(100).multiply_quantity(third).minor(), 33);
    /// ```
    pub fn multiply_quantity(&self, quantity: Quantity) -> Money {
        Money((self.0 as f64 * quantity.value()).round() as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows rupees with two decimals, e.g. `₹12.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor() {
        let money = Money::from_minor(1099);
        assert_eq!(money.minor(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(1099).to_string(), "₹10.99");
        assert_eq!(Money::from_minor(500).to_string(), "₹5.00");
        assert_eq!(Money::from_minor(-550).to_string(), "-₹5.50");
        assert_eq!(Money::zero().to_string(), "₹0.00");
    }

    #[test]
    fn test_multiply_fractional_quantity() {
        let per_kg = Money::from_minor(6000);
        let q = Quantity::new(0.25).unwrap();
        assert_eq!(per_kg.multiply_quantity(q).minor(), 1500);

        // 0.5 paise rounds away from zero
        let q = Quantity::new(0.5).unwrap();
        assert_eq!(Money::from_minor(1).multiply_quantity(q).minor(), 1);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 5].into_iter().map(Money::from_minor).sum();
        assert_eq!(total.minor(), 355);
    }
}
