//! # Domain Types
//!
//! Core domain types used throughout Tip Time.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐                         │
//! │  │  TipPercentage  │   │   UserPreferences   │                         │
//! │  │  ─────────────  │   │  ─────────────────  │                         │
//! │  │  Fifteen  (15)  │   │  last_percentage    │ ◄── persisted as        │
//! │  │  Eighteen (18)  │   │  last_round_up      │     tip_option /        │
//! │  │  Twenty   (20)  │   └─────────────────────┘     is_round_up         │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::validation::validate_tip_percentage;
use crate::{DEFAULT_ROUND_UP, DEFAULT_TIP_PERCENTAGE};

// =============================================================================
// Tip Percentage
// =============================================================================

/// One of the three tip options offered on the screen.
///
/// Serialized as the plain integer (`15`, `18`, `20`) so that stored values
/// and config files stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum TipPercentage {
    /// 15% ("OK")
    Fifteen,
    /// 18% ("Good")
    Eighteen,
    /// 20% ("Amazing")
    Twenty,
}

impl TipPercentage {
    /// Every option, in display order.
    pub const ALL: [TipPercentage; 3] = [
        TipPercentage::Twenty,
        TipPercentage::Eighteen,
        TipPercentage::Fifteen,
    ];

    /// Integer percentage (`20` for 20%).
    #[inline]
    pub const fn percent(self) -> i64 {
        match self {
            TipPercentage::Fifteen => 15,
            TipPercentage::Eighteen => 18,
            TipPercentage::Twenty => 20,
        }
    }
}

impl Default for TipPercentage {
    fn default() -> Self {
        DEFAULT_TIP_PERCENTAGE
    }
}

impl TryFrom<i64> for TipPercentage {
    type Error = ValidationError;

    fn try_from(percent: i64) -> Result<Self, Self::Error> {
        validate_tip_percentage(percent)
    }
}

impl From<TipPercentage> for i64 {
    fn from(value: TipPercentage) -> Self {
        value.percent()
    }
}

impl fmt::Display for TipPercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// Accepts `"18"` and `"18%"`.
impl FromStr for TipPercentage {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_end_matches('%').trim();
        let percent: i64 = digits.parse().map_err(|_| ValidationError::InvalidFormat {
            field: "tip percentage".to_string(),
            reason: format!("'{}' is not a percentage", s),
        })?;
        validate_tip_percentage(percent)
    }
}

// =============================================================================
// User Preferences
// =============================================================================

/// The options restored when the screen comes back.
///
/// ## Defaults
/// A fresh install has nothing stored. The screen then starts on 20% with
/// round-up switched on, which is what [`Default`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Percentage selected at the last calculation.
    pub last_percentage: TipPercentage,

    /// Round-up switch state at the last calculation.
    pub last_round_up: bool,
}

impl UserPreferences {
    pub const fn new(last_percentage: TipPercentage, last_round_up: bool) -> Self {
        UserPreferences {
            last_percentage,
            last_round_up,
        }
    }
}

impl Default for UserPreferences {
    fn default() -> Self {
        UserPreferences::new(DEFAULT_TIP_PERCENTAGE, DEFAULT_ROUND_UP)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_values() {
        assert_eq!(TipPercentage::Fifteen.percent(), 15);
        assert_eq!(TipPercentage::Eighteen.percent(), 18);
        assert_eq!(TipPercentage::Twenty.percent(), 20);
        assert_eq!(i64::from(TipPercentage::Eighteen), 18);
    }

    #[test]
    fn test_try_from_rejects_unknown() {
        assert_eq!(TipPercentage::try_from(15).unwrap(), TipPercentage::Fifteen);
        assert!(TipPercentage::try_from(17).is_err());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("18".parse::<TipPercentage>().unwrap(), TipPercentage::Eighteen);
        assert_eq!(" 20% ".parse::<TipPercentage>().unwrap(), TipPercentage::Twenty);
        assert!("twenty".parse::<TipPercentage>().is_err());
        assert!("19%".parse::<TipPercentage>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(TipPercentage::Fifteen.to_string(), "15%");
    }

    #[test]
    fn test_serde_as_integer() {
        let json = serde_json::to_string(&TipPercentage::Eighteen).unwrap();
        assert_eq!(json, "18");

        let parsed: TipPercentage = serde_json::from_str("15").unwrap();
        assert_eq!(parsed, TipPercentage::Fifteen);

        assert!(serde_json::from_str::<TipPercentage>("16").is_err());
    }

    #[test]
    fn test_default_preferences() {
        let prefs = UserPreferences::default();
        assert_eq!(prefs.last_percentage, TipPercentage::Twenty);
        assert!(prefs.last_round_up);
    }
}
