//! # Tip Calculator
//!
//! Maps (cost text, percentage, round-up) to a tip amount.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cost: "50.00"   Option: 18%   Round up: off                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  parse_cost ──── invalid / zero ──► TipResult::zero()                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  raw = 50.00 × 18 / 100 = 9.00                                          │
//! │       │                                                                 │
//! │       ├── round up on  ──► ceil(raw)                                    │
//! │       └── round up off ──► raw                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  "Tip Amount: $9.00"                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tiptime_core::calculator::calculate_tip;
//! use tiptime_core::currency::CurrencyFormat;
//! use tiptime_core::TipPercentage;
//!
//! let tip = calculate_tip("50.00", TipPercentage::Fifteen, false);
//! assert_eq!(tip.format(&CurrencyFormat::EN_US), "$7.50");
//!
//! let rounded = calculate_tip("50.00", TipPercentage::Fifteen, true);
//! assert_eq!(rounded.amount(), 8.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::currency::CurrencyFormat;
use crate::types::TipPercentage;
use crate::validation::parse_cost;
use crate::TIP_AMOUNT_LABEL;

// =============================================================================
// Request / Result
// =============================================================================

/// Everything the screen hands to the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipRequest {
    /// Raw text from the cost-of-service field.
    pub cost: String,
    pub percentage: TipPercentage,
    pub round_up: bool,
}

impl TipRequest {
    pub fn new(cost: impl Into<String>, percentage: TipPercentage, round_up: bool) -> Self {
        TipRequest {
            cost: cost.into(),
            percentage,
            round_up,
        }
    }

    /// Runs the calculation for this request.
    pub fn calculate(&self) -> TipResult {
        calculate_tip(&self.cost, self.percentage, self.round_up)
    }
}

/// A computed tip.
///
/// The amount is kept as computed; it is only rounded to the currency's
/// minor unit when formatted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TipResult {
    amount: f64,
    rounded_up: bool,
}

impl TipResult {
    /// The zero tip shown for missing, invalid or zero cost.
    pub const fn zero() -> Self {
        TipResult {
            amount: 0.0,
            rounded_up: false,
        }
    }

    /// The tip amount in major currency units.
    #[inline]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Whether the amount was rounded up to a whole unit.
    #[inline]
    pub fn rounded_up(&self) -> bool {
        self.rounded_up
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.amount == 0.0
    }

    /// Formats the amount as currency (`$10.00`).
    pub fn format(&self, currency: &CurrencyFormat) -> String {
        currency.format_amount(self.amount)
    }

    /// Text for the result label (`Tip Amount: $10.00`).
    pub fn display_text(&self, currency: &CurrencyFormat) -> String {
        format!("{}: {}", TIP_AMOUNT_LABEL, self.format(currency))
    }
}

impl Default for TipResult {
    fn default() -> Self {
        TipResult::zero()
    }
}

// =============================================================================
// Calculation
// =============================================================================

/// Computes the tip for a cost entry.
///
/// Invalid, missing, negative or zero cost yields [`TipResult::zero`]; this
/// is the defined fallback, not a failure.
pub fn calculate_tip(cost: &str, percentage: TipPercentage, round_up: bool) -> TipResult {
    let cost = match parse_cost(cost) {
        Ok(cost) if cost > 0.0 => cost,
        _ => return TipResult::zero(),
    };

    let raw = raw_tip(cost, percentage.percent() as f64);
    let amount = if round_up { raw.ceil() } else { raw };

    TipResult {
        amount,
        rounded_up: round_up,
    }
}

/// `cost × percent / 100` for a finite, positive cost.
fn raw_tip(cost: f64, percent: f64) -> f64 {
    // Multiply first: 50 × 15 / 100 is exact, 50 × 0.15 is not
    let raw = cost * percent / 100.0;
    if raw.is_finite() {
        raw
    } else {
        // cost × percent overflowed; dividing first stays in range
        cost / 100.0 * percent
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPSILON * expected.abs().max(1.0),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_fifty_dollar_scenarios() {
        let us = CurrencyFormat::EN_US;

        let twenty = calculate_tip("50.00", TipPercentage::Twenty, false);
        assert!(twenty.format(&us).contains("10.00"));

        let eighteen = calculate_tip("50.00", TipPercentage::Eighteen, false);
        assert!(eighteen.format(&us).contains("9.00"));

        let fifteen = calculate_tip("50.00", TipPercentage::Fifteen, false);
        assert!(fifteen.format(&us).contains("7.50"));
    }

    #[test]
    fn test_raw_tip_matches_cost_times_rate() {
        let costs = [0.01, 1.0, 12.34, 33.33, 50.0, 99.99, 1234.56, 1e7];
        for cost in costs {
            for percentage in TipPercentage::ALL {
                let tip = calculate_tip(&cost.to_string(), percentage, false);
                assert_close(tip.amount(), cost * percentage.percent() as f64 / 100.0);
                assert!(!tip.rounded_up());
            }
        }
    }

    #[test]
    fn test_round_up_is_ceiling() {
        let costs = [0.01, 12.34, 33.33, 50.0, 99.99, 1234.56];
        for cost in costs {
            for percentage in TipPercentage::ALL {
                let raw = calculate_tip(&cost.to_string(), percentage, false).amount();
                let rounded = calculate_tip(&cost.to_string(), percentage, true);
                assert_eq!(rounded.amount(), raw.ceil());
                assert!(rounded.amount() >= raw);
                assert!(rounded.amount() - raw < 1.0);
                assert_eq!(rounded.amount().fract(), 0.0);
            }
        }
    }

    #[test]
    fn test_round_up_keeps_whole_amounts() {
        // 50 × 20% is already whole
        let tip = calculate_tip("50", TipPercentage::Twenty, true);
        assert_eq!(tip.amount(), 10.0);

        let tip = calculate_tip("50", TipPercentage::Fifteen, true);
        assert_eq!(tip.amount(), 8.0);
    }

    #[test]
    fn test_unrounded_amount_is_not_truncated_to_cents() {
        let tip = calculate_tip("33.33", TipPercentage::Fifteen, false);
        assert_close(tip.amount(), 4.9995);
        assert_eq!(tip.format(&CurrencyFormat::EN_US), "$5.00");
    }

    #[test]
    fn test_invalid_cost_is_zero() {
        for cost in ["", "   ", "abc", "0", "0.00", "-10", "NaN", "1,50"] {
            for percentage in TipPercentage::ALL {
                for round_up in [true, false] {
                    let tip = calculate_tip(cost, percentage, round_up);
                    assert!(tip.is_zero(), "cost {cost:?} should give zero");
                    assert_eq!(tip, TipResult::zero());
                }
            }
        }
    }

    #[test]
    fn test_display_text() {
        let tip = calculate_tip("50.00", TipPercentage::Twenty, false);
        assert_eq!(tip.display_text(&CurrencyFormat::EN_US), "Tip Amount: $10.00");
        assert_eq!(
            TipResult::zero().display_text(&CurrencyFormat::DE_DE),
            "Tip Amount: 0,00 €"
        );
    }

    #[test]
    fn test_huge_cost_stays_finite() {
        // 1e307 × 20 overflows f64 when multiplied first
        let tip = calculate_tip("1e307", TipPercentage::Twenty, false);
        assert!(tip.amount().is_finite());
        assert_close(tip.amount(), 2e305);

        let rounded = calculate_tip("1e307", TipPercentage::Twenty, true);
        assert!(rounded.amount().is_finite());

        let text = tip.display_text(&CurrencyFormat::EN_US);
        assert!(text.starts_with("Tip Amount: $"), "{text}");
        assert!(text.ends_with(".00"), "{text}");
        let digits = text.chars().filter(char::is_ascii_digit).count();
        assert_eq!(digits, 306 + 2, "{text}");
    }

    #[test]
    fn test_tip_beyond_cent_range_formats_in_full() {
        let tip = calculate_tip("1e18", TipPercentage::Twenty, false);
        assert_eq!(tip.amount(), 2e17);
        assert_eq!(
            tip.display_text(&CurrencyFormat::EN_US),
            "Tip Amount: $200,000,000,000,000,000.00"
        );
    }

    #[test]
    fn test_request_calculate() {
        let request = TipRequest::new("50.00", TipPercentage::Eighteen, true);
        assert_eq!(request.calculate().amount(), 9.0);
    }
}
