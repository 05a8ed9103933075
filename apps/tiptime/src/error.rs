//! # App Error Type
//!
//! Unified error type for wiring the screen together.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  AppConfig::load ──── bad TOML / bad value ──────► AppError::Config     │
//! │                                                                         │
//! │  CurrencyFormat::for_locale ── unknown locale ───► AppError::Core       │
//! │                                                                         │
//! │  FileStore::open ──── bad store name ────────────► AppError::Store      │
//! │                                                                         │
//! │  Runtime (calculate, save, observe) never returns AppError: bad cost   │
//! │  is a zero tip, failed saves are logged, failed reads are defaults.    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use tiptime_core::CoreError;
use tiptime_prefs::StoreError;

/// Errors raised while setting the app up.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded, saved or validated.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Domain error (unknown locale, bad value).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Preference store could not be opened.
    #[error("Preference store error: {0}")]
    Store(#[from] StoreError),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Result type for app setup.
pub type AppResult<T> = Result<T, AppError>;
