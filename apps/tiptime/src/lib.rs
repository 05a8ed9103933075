//! # Tip Time
//!
//! Headless tip screen: configuration, logging, and the wiring between the
//! screen controller and the preference store.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  init_tracing()                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppConfig::load_or_default() ──► currency_format()                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  preferences_dir()? ──yes──► FileStore ──┐                             │
//! │       │                                  ├──► InputPreferences         │
//! │       no ──────────────────► MemoryStore ┘          │                  │
//! │                                                     ▼                  │
//! │                                                 TipScreen              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod screen;
pub mod state;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use screen::{Key, TipScreen};
pub use state::ScreenState;

use std::sync::Arc;

use tiptime_prefs::{FileStore, InputPreferences, MemoryStore, PreferenceStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tiptime=debug";

/// Initializes the tracing subscriber for logging.
///
/// Log level can be controlled via `RUST_LOG`:
/// ```bash
/// RUST_LOG=debug
/// RUST_LOG=tiptime_prefs=trace
/// ```
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Opens the preference store the config points at.
///
/// Without a usable directory the screen still works, but nothing
/// survives a restart.
pub fn open_store(config: &AppConfig) -> AppResult<Arc<dyn PreferenceStore>> {
    let name = &config.preferences.store_name;

    match config.preferences_dir() {
        Some(dir) => {
            let store = FileStore::open(&dir, name)?;
            info!(path = ?store.path(), "Using file preference store");
            Ok(Arc::new(store))
        }
        None => {
            warn!("No preferences directory available, preferences will not persist");
            Ok(Arc::new(MemoryStore::new(name.as_str())))
        }
    }
}

/// Builds a tip screen from configuration. Call [`TipScreen::start`] once
/// the screen becomes visible.
pub fn build_screen(config: &AppConfig) -> AppResult<TipScreen> {
    let currency = config.currency_format()?;
    let prefs = InputPreferences::new(open_store(config)?);

    info!(locale = %currency.locale, "Tip screen ready");
    Ok(TipScreen::new(prefs, currency))
}
