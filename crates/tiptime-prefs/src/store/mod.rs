//! # Preference Store
//!
//! The storage seam. An engine provides atomic snapshot reads, atomic
//! multi-key edits and a change signal; [`PreferenceStore::data`] turns
//! those into a lazy stream of snapshots.
//!
//! ## Stream Semantics
//! ```text
//! subscribe ──► read() ──► yield snapshot
//!                              │
//!          edit() committed ◄──┘   (watch channel bumps version)
//!                 │
//!                 ▼
//!              read() ──► yield snapshot ──► ...
//! ```
//! Bursts of edits may be coalesced: a slow subscriber only sees the latest
//! snapshot. Read failures are yielded as `Err` items and do not end the
//! stream here; the adapter decides what to do with them.

use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::error::StoreResult;
use crate::preferences::Preferences;

pub mod file;
pub mod memory;

pub use file::{validate_store_name, FileStore};
pub use memory::MemoryStore;

/// Boxed stream of snapshot reads.
pub type PreferenceStream = Pin<Box<dyn Stream<Item = StoreResult<Preferences>> + Send>>;

/// Mutation applied inside [`PreferenceStore::edit`].
pub type Transform = Box<dyn FnOnce(&mut Preferences) + Send>;

/// A named key-value preference store.
///
/// ## Contract
/// - `read` returns one consistent snapshot
/// - `edit` applies the transform to a copy of the current snapshot and
///   commits every change or none; concurrent edits are serialized
/// - every committed edit advances the value seen by `changes`
#[async_trait]
pub trait PreferenceStore: Send + Sync + 'static {
    /// Store name (`input_preferences`).
    fn name(&self) -> &str;

    /// Reads the current snapshot.
    async fn read(&self) -> StoreResult<Preferences>;

    /// Atomically applies `transform` and returns the committed snapshot.
    async fn edit(&self, transform: Transform) -> StoreResult<Preferences>;

    /// Change signal: the value is bumped after every committed edit.
    fn changes(&self) -> watch::Receiver<u64>;

    /// Lazy stream: current snapshot on first poll, then one snapshot per
    /// observed change.
    fn data(self: Arc<Self>) -> PreferenceStream {
        let versions = WatchStream::new(self.changes());
        Box::pin(versions.then(move |_| {
            let store = Arc::clone(&self);
            async move { store.read().await }
        }))
    }
}
