//! # Input Preferences Adapter
//!
//! Persists the last-used tip option and round-up flag, and streams them
//! back to the screen.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  calculate ──► save(18, true) ──► tokio::spawn ──► store.edit          │
//! │                  (returns at once)                  tip_option = 18     │
//! │                                                     is_round_up = true  │
//! │                                                           │             │
//! │                                                    version bump         │
//! │                                                           │             │
//! │  screen ◄── observe() ◄── store.data() ◄──────────────────┘             │
//! │              │                                                          │
//! │              ├── Ok(snapshot)         → yield                           │
//! │              ├── Err(read failure)    → yield empty snapshot, continue  │
//! │              └── Err(anything else)   → yield error, end                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::pin::Pin;
use std::sync::Arc;

use futures_util::stream::{self, BoxStream};
use futures_util::{Stream, StreamExt};
use tracing::{debug, warn};

use tiptime_core::{TipPercentage, UserPreferences, DEFAULT_ROUND_UP, DEFAULT_TIP_PERCENTAGE};

use crate::error::StoreResult;
use crate::preferences::{bool_key, int_key, PreferenceKey, Preferences};
use crate::store::{PreferenceStore, PreferenceStream};

// =============================================================================
// Keys
// =============================================================================

/// Name of the store holding the screen's inputs.
pub const INPUT_PREFERENCES_NAME: &str = "input_preferences";

/// Last selected tip percentage (15, 18 or 20).
pub const TIP_OPTION: PreferenceKey<i64> = int_key("tip_option");

/// Last state of the round-up switch.
pub const IS_ROUND_UP: PreferenceKey<bool> = bool_key("is_round_up");

// =============================================================================
// Snapshot view
// =============================================================================

/// The two input entries as found in a snapshot.
///
/// Either may be absent: nothing saved yet, or an empty snapshot substituted
/// for a failed read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub tip_option: Option<TipPercentage>,
    pub is_round_up: Option<bool>,
}

impl InputSnapshot {
    /// Extracts the input entries.
    ///
    /// A stored integer outside the offered options is ignored (logged, read
    /// as absent). A key stored with the wrong type is an error.
    pub fn from_preferences(prefs: &Preferences) -> StoreResult<Self> {
        let tip_option = match prefs.get(&TIP_OPTION)? {
            Some(raw) => match TipPercentage::try_from(raw) {
                Ok(percentage) => Some(percentage),
                Err(err) => {
                    warn!(raw, %err, "Ignoring stored tip option");
                    None
                }
            },
            None => None,
        };

        Ok(InputSnapshot {
            tip_option,
            is_round_up: prefs.get(&IS_ROUND_UP)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.tip_option.is_none() && self.is_round_up.is_none()
    }

    /// Fills absent entries with the fresh-install defaults.
    pub fn resolve(&self) -> UserPreferences {
        UserPreferences::new(
            self.tip_option.unwrap_or(DEFAULT_TIP_PERCENTAGE),
            self.is_round_up.unwrap_or(DEFAULT_ROUND_UP),
        )
    }
}

/// Stream of input snapshots.
pub type InputStream = BoxStream<'static, StoreResult<InputSnapshot>>;

// =============================================================================
// Adapter
// =============================================================================

/// Reads and writes the screen's input preferences.
#[derive(Clone)]
pub struct InputPreferences {
    store: Arc<dyn PreferenceStore>,
}

impl InputPreferences {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        InputPreferences { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn PreferenceStore> {
        &self.store
    }

    /// Writes both entries in one atomic edit and waits for the commit.
    pub async fn save_now(&self, percentage: TipPercentage, round_up: bool) -> StoreResult<()> {
        self.store
            .edit(Box::new(move |prefs| {
                prefs.set(&TIP_OPTION, percentage.percent());
                prefs.set(&IS_ROUND_UP, round_up);
            }))
            .await?;

        debug!(
            store = %self.store.name(),
            tip_option = percentage.percent(),
            is_round_up = round_up,
            "Saved input preferences"
        );
        Ok(())
    }

    /// Fire-and-forget save.
    ///
    /// Returns immediately; the write runs on a detached task. A failed
    /// write is logged and dropped; the next save overwrites both entries
    /// anyway. Must be called from within a Tokio runtime.
    pub fn save(&self, percentage: TipPercentage, round_up: bool) {
        let this = self.clone();
        tokio::spawn(async move {
            if let Err(err) = this.save_now(percentage, round_up).await {
                warn!(
                    store = %this.store.name(),
                    %err,
                    tip_option = percentage.percent(),
                    is_round_up = round_up,
                    "Dropped input preferences write"
                );
            }
        });
    }

    /// Lazy, restartable stream of raw snapshots.
    ///
    /// Read failures become empty snapshots; any other error is yielded once
    /// and ends the stream.
    pub fn observe(&self) -> PreferenceStream {
        let store_name = self.store.name().to_string();
        let snapshots = Arc::clone(&self.store).data().map(move |item| match item {
            Err(err) if err.is_read_failure() => {
                warn!(store = %store_name, %err, "Preference read failed, using empty preferences");
                Ok(Preferences::new())
            }
            other => other,
        });
        end_after_error(snapshots)
    }

    /// [`observe`](Self::observe), narrowed to the two input entries.
    pub fn observe_input(&self) -> InputStream {
        end_after_error(
            self.observe()
                .map(|item| item.and_then(|prefs| InputSnapshot::from_preferences(&prefs))),
        )
    }

    /// [`observe_input`](Self::observe_input) with defaults applied.
    pub fn observe_preferences(&self) -> BoxStream<'static, StoreResult<UserPreferences>> {
        self.observe_input()
            .map(|item| item.map(|snapshot| snapshot.resolve()))
            .boxed()
    }
}

/// Passes items through until the first `Err`, yields it, then ends.
fn end_after_error<T, S>(inner: S) -> Pin<Box<dyn Stream<Item = StoreResult<T>> + Send>>
where
    T: Send + 'static,
    S: Stream<Item = StoreResult<T>> + Send + 'static,
{
    Box::pin(stream::unfold(Some(Box::pin(inner)), |state| async move {
        let mut inner = state?;
        match inner.next().await? {
            Ok(item) => Some((Ok(item), Some(inner))),
            Err(err) => Some((Err(err), None)),
        }
    }))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::{FileStore, MemoryStore};
    use std::time::Duration;
    use tokio::time::timeout;

    const WAIT: Duration = Duration::from_secs(5);

    fn memory() -> (Arc<MemoryStore>, InputPreferences) {
        let store = Arc::new(MemoryStore::new(INPUT_PREFERENCES_NAME));
        let adapter = InputPreferences::new(store.clone());
        (store, adapter)
    }

    async fn next<T>(stream: &mut BoxStream<'static, T>) -> Option<T> {
        timeout(WAIT, stream.next()).await.expect("stream stalled")
    }

    #[tokio::test]
    async fn test_save_then_observe() {
        let (_, adapter) = memory();
        adapter
            .save_now(TipPercentage::Eighteen, true)
            .await
            .unwrap();

        let mut input = adapter.observe_input();
        let snapshot = next(&mut input).await.unwrap().unwrap();
        assert_eq!(snapshot.tip_option, Some(TipPercentage::Eighteen));
        assert_eq!(snapshot.is_round_up, Some(true));
    }

    #[tokio::test]
    async fn test_fire_and_forget_save_arrives() {
        let (_, adapter) = memory();
        let mut prefs = adapter.observe_preferences();

        // Fresh install
        let first = next(&mut prefs).await.unwrap().unwrap();
        assert_eq!(first, UserPreferences::default());

        adapter.save(TipPercentage::Fifteen, false);

        loop {
            let current = next(&mut prefs).await.unwrap().unwrap();
            if current == UserPreferences::new(TipPercentage::Fifteen, false) {
                break;
            }
        }
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let (store, adapter) = memory();
        adapter.save_now(TipPercentage::Twenty, true).await.unwrap();
        adapter
            .save_now(TipPercentage::Fifteen, false)
            .await
            .unwrap();

        let snapshot = InputSnapshot::from_preferences(&store.read().await.unwrap()).unwrap();
        assert_eq!(snapshot.tip_option, Some(TipPercentage::Fifteen));
        assert_eq!(snapshot.is_round_up, Some(false));
    }

    #[tokio::test]
    async fn test_read_failure_substitutes_empty_snapshot() {
        let (store, adapter) = memory();
        adapter.save_now(TipPercentage::Twenty, false).await.unwrap();
        store
            .fail_next_read(StoreError::Io {
                path: "memory".into(),
                message: "simulated".into(),
            })
            .await;

        let mut raw = adapter.observe();
        let first = next(&mut raw).await.unwrap().unwrap();
        assert!(first.is_empty());

        // Still subscribed
        adapter
            .save_now(TipPercentage::Eighteen, true)
            .await
            .unwrap();
        let second = next(&mut raw).await.unwrap().unwrap();
        assert_eq!(second.get(&TIP_OPTION).unwrap(), Some(18));
        assert_eq!(second.get(&IS_ROUND_UP).unwrap(), Some(true));
    }

    #[tokio::test]
    async fn test_corrupted_read_is_substituted_too() {
        let (store, adapter) = memory();
        store
            .fail_next_read(StoreError::Corrupted {
                path: "memory".into(),
                message: "garbage".into(),
            })
            .await;

        let mut input = adapter.observe_input();
        let snapshot = next(&mut input).await.unwrap().unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.resolve(), UserPreferences::default());
    }

    #[tokio::test]
    async fn test_other_failure_ends_stream() {
        let (store, adapter) = memory();
        store
            .fail_next_read(StoreError::Internal("engine bug".into()))
            .await;

        let mut raw = adapter.observe();
        let err = next(&mut raw).await.unwrap().unwrap_err();
        assert_eq!(err, StoreError::Internal("engine bug".into()));
        assert!(next(&mut raw).await.is_none());
    }

    #[tokio::test]
    async fn test_type_mismatch_ends_input_stream() {
        let (store, adapter) = memory();
        store
            .edit(Box::new(|prefs| prefs.set(&bool_key("tip_option"), true)))
            .await
            .unwrap();

        let mut input = adapter.observe_input();
        let err = next(&mut input).await.unwrap().unwrap_err();
        assert!(matches!(err, StoreError::TypeMismatch { .. }));
        assert!(next(&mut input).await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_stored_percentage_is_ignored() {
        let (store, adapter) = memory();
        store
            .edit(Box::new(|prefs| {
                prefs.set(&TIP_OPTION, 25);
                prefs.set(&IS_ROUND_UP, false);
            }))
            .await
            .unwrap();

        let mut input = adapter.observe_input();
        let snapshot = next(&mut input).await.unwrap().unwrap();
        assert_eq!(snapshot.tip_option, None);
        assert_eq!(snapshot.is_round_up, Some(false));
    }

    #[tokio::test]
    async fn test_dropped_write_does_not_poison_later_saves() {
        let (store, adapter) = memory();
        store
            .fail_next_edit(StoreError::Io {
                path: "memory".into(),
                message: "disk full".into(),
            })
            .await;

        let mut prefs = adapter.observe_preferences();
        adapter.save(TipPercentage::Eighteen, false);
        adapter.save(TipPercentage::Fifteen, false);

        // Whichever task hits the failure, the other one lands
        loop {
            let current = next(&mut prefs).await.unwrap().unwrap();
            if current.last_percentage != DEFAULT_TIP_PERCENTAGE {
                assert!(!current.last_round_up);
                break;
            }
        }
    }

    #[tokio::test]
    async fn test_observe_is_restartable() {
        let (_, adapter) = memory();
        adapter.save_now(TipPercentage::Eighteen, true).await.unwrap();

        {
            let mut first = adapter.observe_preferences();
            let prefs = next(&mut first).await.unwrap().unwrap();
            assert_eq!(prefs.last_percentage, TipPercentage::Eighteen);
        }

        adapter
            .save_now(TipPercentage::Fifteen, true)
            .await
            .unwrap();

        // A fresh subscription starts from the latest snapshot
        let mut second = adapter.observe_preferences();
        let prefs = next(&mut second).await.unwrap().unwrap();
        assert_eq!(prefs.last_percentage, TipPercentage::Fifteen);
    }

    #[tokio::test]
    async fn test_file_store_round_trip_across_launches() {
        let dir = tempfile::tempdir().unwrap();

        let first_launch = InputPreferences::new(Arc::new(
            FileStore::open(dir.path(), INPUT_PREFERENCES_NAME).unwrap(),
        ));
        first_launch
            .save_now(TipPercentage::Eighteen, true)
            .await
            .unwrap();

        let second_launch = InputPreferences::new(Arc::new(
            FileStore::open(dir.path(), INPUT_PREFERENCES_NAME).unwrap(),
        ));
        let mut prefs = second_launch.observe_preferences();
        let restored = next(&mut prefs).await.unwrap().unwrap();
        assert_eq!(restored, UserPreferences::new(TipPercentage::Eighteen, true));
    }

    #[tokio::test]
    async fn test_file_store_corruption_reads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path(), INPUT_PREFERENCES_NAME).unwrap();
        std::fs::write(store.path(), "tip_option = = 18").unwrap();

        let adapter = InputPreferences::new(Arc::new(store));
        let mut prefs = adapter.observe_preferences();
        let restored = next(&mut prefs).await.unwrap().unwrap();
        assert_eq!(restored, UserPreferences::default());
    }

    #[tokio::test]
    async fn test_save_recovers_corrupted_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path(), INPUT_PREFERENCES_NAME).unwrap();
        std::fs::write(store.path(), "tip_option = = 18").unwrap();

        let adapter = InputPreferences::new(Arc::new(store));
        adapter
            .save_now(TipPercentage::Eighteen, true)
            .await
            .unwrap();
        adapter
            .save_now(TipPercentage::Fifteen, false)
            .await
            .unwrap();

        let mut prefs = adapter.observe_preferences();
        let restored = next(&mut prefs).await.unwrap().unwrap();
        assert_eq!(restored, UserPreferences::new(TipPercentage::Fifteen, false));
    }
}
