//! # Error Types
//!
//! Domain-specific error types for tiptime-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tiptime-core errors (this file)                                       │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tiptime-prefs errors (separate crate)                                 │
//! │  └── StoreError       - Preference storage failures                    │
//! │                                                                         │
//! │  App errors (apps/tiptime)                                             │
//! │  └── AppError         - Configuration and wiring failures              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note that a bad cost entry is NOT an error anywhere in the system: the
//! calculator maps it to a zero tip. [`ValidationError`] still describes why a
//! cost was rejected so callers can log it.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No currency convention is known for the requested locale.
    ///
    /// ## When This Occurs
    /// - `TIPTIME_LOCALE` names a language we have no table for
    /// - `LANG` is set to something exotic and no override is configured
    #[error("Unsupported locale: {tag}")]
    UnsupportedLocale { tag: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g., "abc" typed into the cost field).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
