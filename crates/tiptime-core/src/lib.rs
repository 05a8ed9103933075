//! # tiptime-core: Pure Calculation Logic for Tip Time
//!
//! This crate holds the tip calculation and everything it needs to be shown
//! on screen, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tip Time Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/tiptime (Screen Controller)                │   │
//! │  │    set_cost, select_percentage, calculate, start / stop         │   │
//! │  └──────────────┬──────────────────────────────┬───────────────────┘   │
//! │                 │                              │                        │
//! │  ┌──────────────▼──────────────────┐  ┌────────▼────────────────────┐  │
//! │  │    ★ tiptime-core (THIS) ★      │  │      tiptime-prefs          │  │
//! │  │                                 │  │  observe / save             │  │
//! │  │  calculator  currency  money    │  │  memory + TOML file store   │  │
//! │  │  types       validation         │  │                             │  │
//! │  │                                 │  └─────────────────────────────┘  │
//! │  │  NO I/O • NO STORAGE • PURE     │                                   │
//! │  └─────────────────────────────────┘                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`calculator`] - Tip computation with the zero fallback
//! - [`currency`] - Locale currency conventions and formatting
//! - [`money`] - Minor-unit amounts for display rounding
//! - [`types`] - `TipPercentage`, `UserPreferences`
//! - [`error`] - Domain error types
//! - [`validation`] - Cost and percentage checks
//!
//! ## Example Usage
//!
//! ```rust
//! use tiptime_core::{calculate_tip, CurrencyFormat, TipPercentage};
//!
//! let tip = calculate_tip("50.00", TipPercentage::Twenty, false);
//! assert_eq!(tip.display_text(&CurrencyFormat::EN_US), "Tip Amount: $10.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod currency;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::{calculate_tip, TipRequest, TipResult};
pub use currency::CurrencyFormat;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Option selected on a fresh install.
pub const DEFAULT_TIP_PERCENTAGE: TipPercentage = TipPercentage::Twenty;

/// Round-up switch state on a fresh install, and whenever the stored flag
/// is missing.
pub const DEFAULT_ROUND_UP: bool = true;

/// Label in front of the formatted tip.
pub const TIP_AMOUNT_LABEL: &str = "Tip Amount";
