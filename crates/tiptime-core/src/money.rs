//! # Money Module
//!
//! Provides the `Money` type used when a computed tip is turned into text.
//!
//! ## Why Minor Units?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The tip itself is computed in f64 (cost × percent / 100) and is kept  │
//! │  unrounded: 33.33 × 15% = 4.9995                                        │
//! │                                                                         │
//! │  Formatting needs an exact number of cents. Printing the f64 with       │
//! │  {:.2} rounds half-away and drifts on values like 2.675.               │
//! │                                                                         │
//! │  OUR SOLUTION: round once, half-to-even, into integer minor units      │
//! │    4.9995 → 500 cents → "$5.00"                                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tiptime_core::money::Money;
//!
//! let tip = Money::try_from_amount(7.5, 2).unwrap();
//! assert_eq!(tip.minor_units(), 750);
//!
//! // Half-to-even: 0.125 → 0.12, 0.135 → 0.14
//! assert_eq!(Money::try_from_amount(0.125, 2).unwrap().minor_units(), 12);
//! assert_eq!(Money::try_from_amount(0.135, 2).unwrap().minor_units(), 14);
//!
//! // Too large for minor units
//! assert!(Money::try_from_amount(1e18, 2).is_none());
//! ```

use serde::{Deserialize, Serialize};

/// Tolerance used when deciding whether a scaled amount sits exactly on a
/// half. Products like `0.135 * 100` land a few ulps off `13.5`.
const HALF_TOLERANCE: f64 = 1e-9;

/// Representable minor-unit range, as floats: [-2^63, 2^63).
const MIN_MINOR_UNITS: f64 = i64::MIN as f64;
const MAX_MINOR_UNITS_EXCLUSIVE: f64 = -(i64::MIN as f64);

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD, yen for JPY).
///
/// The number of fraction digits is owned by the currency, not by `Money`;
/// see [`crate::currency::CurrencyFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    #[inline]
    pub const fn from_minor_units(minor: i64) -> Self {
        Money(minor)
    }

    /// Rounds a decimal amount half-to-even into minor units.
    ///
    /// `fraction_digits` is the currency's minor-unit exponent (2 for USD,
    /// 0 for JPY). Returns `None` for non-finite amounts and for amounts
    /// whose minor units do not fit in an `i64`.
    pub fn try_from_amount(amount: f64, fraction_digits: u8) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }

        let scaled = amount * 10f64.powi(i32::from(fraction_digits));
        let floor = scaled.floor();
        let fraction = scaled - floor;

        let rounded = if (fraction - 0.5).abs() <= HALF_TOLERANCE {
            // Exactly half: pick the even neighbour
            if floor % 2.0 == 0.0 {
                floor
            } else {
                floor + 1.0
            }
        } else if fraction > 0.5 {
            floor + 1.0
        } else {
            floor
        };

        // i64::MAX as f64 rounds up to 2^63, which is already out of range
        if rounded < MIN_MINOR_UNITS || rounded >= MAX_MINOR_UNITS_EXCLUSIVE {
            return None;
        }
        Some(Money(rounded as i64))
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    /// Splits the absolute value into (major, minor) parts for display.
    ///
    /// ## Example
    /// ```rust
    /// use tiptime_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor_units(123456).split(2), (1234, 56));
    /// assert_eq!(Money::from_minor_units(-550).split(2), (5, 50));
    /// assert_eq!(Money::from_minor_units(500).split(0), (500, 0));
    /// ```
    pub fn split(&self, fraction_digits: u8) -> (u64, u64) {
        let divisor = 10u64.pow(u32::from(fraction_digits));
        let abs = self.0.unsigned_abs();
        (abs / divisor, abs % divisor)
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn minor(amount: f64, digits: u8) -> i64 {
        Money::try_from_amount(amount, digits).unwrap().minor_units()
    }

    #[test]
    fn test_from_amount_exact() {
        assert_eq!(minor(10.0, 2), 1000);
        assert_eq!(minor(9.0, 2), 900);
        assert_eq!(minor(7.5, 2), 750);
        assert_eq!(minor(0.0, 2), 0);
    }

    #[test]
    fn test_from_amount_rounds_half_to_even() {
        // 4.9995 → 499.95 cents → 500
        assert_eq!(minor(4.9995, 2), 500);
        assert_eq!(minor(0.125, 2), 12);
        assert_eq!(minor(0.135, 2), 14);
        assert_eq!(minor(2.5, 0), 2);
        assert_eq!(minor(3.5, 0), 4);
    }

    #[test]
    fn test_from_amount_rounds_to_nearest() {
        assert_eq!(minor(1.234, 2), 123);
        assert_eq!(minor(1.236, 2), 124);
        assert_eq!(minor(1499.6, 0), 1500);
    }

    #[test]
    fn test_from_amount_rejects_non_finite() {
        assert_eq!(Money::try_from_amount(f64::NAN, 2), None);
        assert_eq!(Money::try_from_amount(f64::INFINITY, 2), None);
        assert_eq!(Money::try_from_amount(f64::NEG_INFINITY, 0), None);
    }

    #[test]
    fn test_from_amount_rejects_out_of_range() {
        // 2e17 dollars is 2e19 cents, past i64::MAX (~9.22e18)
        assert_eq!(Money::try_from_amount(2e17, 2), None);
        assert_eq!(Money::try_from_amount(-2e17, 2), None);
        assert_eq!(Money::try_from_amount(1e307, 0), None);

        // Still fits without the cents
        assert_eq!(minor(2e17, 0), 200_000_000_000_000_000);
        // Near the top of the range
        assert_eq!(minor(9.2e16, 2), 9_200_000_000_000_000_000);
    }

    #[test]
    fn test_split() {
        assert_eq!(Money::from_minor_units(1099).split(2), (10, 99));
        assert_eq!(Money::from_minor_units(5).split(2), (0, 5));
        assert_eq!(Money::from_minor_units(-1099).split(2), (10, 99));
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_negative());
        assert!(Money::from_minor_units(-1).is_negative());
        assert_eq!(Money::default(), Money::zero());
    }
}
