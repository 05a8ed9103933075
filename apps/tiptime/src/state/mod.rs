//! # Screen State
//!
//! Everything the tip screen shows, kept behind a lock so the preference
//! subscription task and the input handlers can both touch it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Input handlers ─────────┐                                             │
//! │  (set_cost, calculate)   │                                             │
//! │                          ▼                                             │
//! │                 Arc<RwLock<ScreenState>> ◄──── subscription task       │
//! │                          │                     (observe_input)         │
//! │                          ▼                                             │
//! │                   host renders state()                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod screen;

pub use screen::{ScreenState, SharedScreenState};
