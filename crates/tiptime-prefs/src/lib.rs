//! # tiptime-prefs: Preference Persistence for Tip Time
//!
//! This crate stores the screen's last-used options and streams them back.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        tiptime-prefs                                    │
//! │                                                                         │
//! │  ┌────────────────────────────┐                                        │
//! │  │  adapter::InputPreferences │  save / save_now / observe             │
//! │  └─────────────┬──────────────┘                                        │
//! │                │ Arc<dyn PreferenceStore>                              │
//! │  ┌─────────────▼──────────────┐                                        │
//! │  │  store::PreferenceStore    │  read / edit / changes / data          │
//! │  ├────────────────────────────┤                                        │
//! │  │  MemoryStore │ FileStore   │  RwLock state │ TOML + rename          │
//! │  └────────────────────────────┘                                        │
//! │                                                                         │
//! │  preferences::Preferences      typed snapshot (int / bool entries)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use futures_util::StreamExt;
//! use tiptime_core::TipPercentage;
//! use tiptime_prefs::{FileStore, InputPreferences, INPUT_PREFERENCES_NAME};
//!
//! # async fn run() -> tiptime_prefs::StoreResult<()> {
//! let store = FileStore::open("/tmp/tiptime", INPUT_PREFERENCES_NAME)?;
//! let prefs = InputPreferences::new(Arc::new(store));
//!
//! prefs.save(TipPercentage::Eighteen, true);
//!
//! let mut updates = prefs.observe_preferences();
//! while let Some(Ok(current)) = updates.next().await {
//!     println!("{:?}", current);
//! }
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod adapter;
pub mod error;
pub mod preferences;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use adapter::{
    InputPreferences, InputSnapshot, InputStream, INPUT_PREFERENCES_NAME, IS_ROUND_UP, TIP_OPTION,
};
pub use error::{StoreError, StoreResult};
pub use preferences::{PreferenceKey, PreferenceValue, Preferences};
pub use store::{validate_store_name, FileStore, MemoryStore, PreferenceStore, PreferenceStream};
