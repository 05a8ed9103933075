//! In-process store. Nothing survives the process; used by tests and as the
//! fallback when no preferences directory can be determined.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::{watch, Mutex, RwLock};
use tracing::debug;

use super::{PreferenceStore, Transform};
use crate::error::{StoreError, StoreResult};
use crate::preferences::Preferences;

/// Memory-backed [`PreferenceStore`].
///
/// Failures can be queued with [`MemoryStore::fail_next_read`] and
/// [`MemoryStore::fail_next_edit`]; each queued error is returned once, in
/// order, by the next matching call.
pub struct MemoryStore {
    name: String,
    state: RwLock<Preferences>,
    version: watch::Sender<u64>,
    read_failures: Mutex<VecDeque<StoreError>>,
    edit_failures: Mutex<VecDeque<StoreError>>,
}

impl MemoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_preferences(name, Preferences::new())
    }

    /// Creates a store that already holds `initial`.
    pub fn with_preferences(name: impl Into<String>, initial: Preferences) -> Self {
        let (version, _) = watch::channel(0);
        MemoryStore {
            name: name.into(),
            state: RwLock::new(initial),
            version,
            read_failures: Mutex::new(VecDeque::new()),
            edit_failures: Mutex::new(VecDeque::new()),
        }
    }

    /// Makes the next `read` fail with `err`.
    pub async fn fail_next_read(&self, err: StoreError) {
        self.read_failures.lock().await.push_back(err);
    }

    /// Makes the next `edit` fail with `err` without changing anything.
    pub async fn fail_next_edit(&self, err: StoreError) {
        self.edit_failures.lock().await.push_back(err);
    }

    /// Wakes subscribers without changing the data, so they re-read.
    pub fn notify(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}

#[async_trait]
impl PreferenceStore for MemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read(&self) -> StoreResult<Preferences> {
        if let Some(err) = self.read_failures.lock().await.pop_front() {
            return Err(err);
        }
        Ok(self.state.read().await.clone())
    }

    async fn edit(&self, transform: Transform) -> StoreResult<Preferences> {
        if let Some(err) = self.edit_failures.lock().await.pop_front() {
            return Err(err);
        }

        let committed = {
            let mut state = self.state.write().await;
            let mut next = state.clone();
            transform(&mut next);
            *state = next.clone();
            next
        };

        self.version.send_modify(|v| *v += 1);
        debug!(store = %self.name, entries = committed.len(), "Memory preferences committed");
        Ok(committed)
    }

    fn changes(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }
}
