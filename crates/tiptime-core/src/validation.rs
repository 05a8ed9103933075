//! # Validation Module
//!
//! Input validation for the tip screen.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      What Happens To Bad Input                          │
//! │                                                                         │
//! │  Cost text field ──► parse_cost ──► Err(ValidationError)               │
//! │                                          │                              │
//! │                                          ▼                              │
//! │                           calculator shows a zero tip                   │
//! │                                                                         │
//! │  Stored tip_option ──► validate_tip_percentage ──► Err                 │
//! │                                          │                              │
//! │                                          ▼                              │
//! │                           selection is left unchanged                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tiptime_core::validation::{parse_cost, validate_tip_percentage};
//!
//! assert_eq!(parse_cost("50.00").unwrap(), 50.0);
//! assert!(parse_cost("fifty").is_err());
//! assert!(validate_tip_percentage(18).is_ok());
//! assert!(validate_tip_percentage(25).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::TipPercentage;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Cost
// =============================================================================

/// Parses the cost-of-service text field.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Must not be empty
/// - Must parse as a decimal number
/// - Must be finite (`NaN` and `inf` are rejected)
/// - Must not be negative
///
/// Zero is a valid cost; the calculator decides what a zero cost means.
pub fn parse_cost(input: &str) -> ValidationResult<f64> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::Required {
            field: "cost".to_string(),
        });
    }

    let cost: f64 = input.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "cost".to_string(),
        reason: format!("'{}' is not a decimal number", input),
    })?;

    if !cost.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "cost".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if cost < 0.0 {
        return Err(ValidationError::Negative {
            field: "cost".to_string(),
        });
    }

    Ok(cost)
}

// =============================================================================
// Tip Percentage
// =============================================================================

/// Validates an integer tip percentage against the offered options.
pub fn validate_tip_percentage(percent: i64) -> ValidationResult<TipPercentage> {
    TipPercentage::ALL
        .into_iter()
        .find(|option| option.percent() == percent)
        .ok_or_else(|| ValidationError::NotAllowed {
            field: "tip percentage".to_string(),
            allowed: TipPercentage::ALL
                .iter()
                .rev()
                .map(|option| option.percent().to_string())
                .collect(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
