//! # File Store
//!
//! Persists one store as a TOML document.
//!
//! ## File Layout
//! ```toml
//! # <dir>/input_preferences.preferences.toml
//! updated_at = "2026-10-18T09:30:00Z"
//!
//! [values]
//! is_round_up = true
//! tip_option = 18
//! ```
//!
//! ## Write Path
//! ```text
//! edit() ──► lock ──► read current ──► transform ──► write <file>.tmp
//!                                                        │
//!                                   rename over <file> ◄─┘  (all keys or none)
//!                                          │
//!                                          ▼
//!                               bump version, unlock
//! ```
//! A missing file reads as an empty snapshot. An unparseable file is
//! replaced wholesale by the next edit.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use super::{PreferenceStore, Transform};
use crate::error::{StoreError, StoreResult};
use crate::preferences::{PreferenceValue, Preferences};

/// Suffix appended to the store name to form the file name.
pub const FILE_SUFFIX: &str = ".preferences.toml";

/// On-disk document.
#[derive(Debug, Serialize, Deserialize)]
struct PreferencesDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    values: BTreeMap<String, PreferenceValue>,
}

/// TOML-file-backed [`PreferenceStore`].
pub struct FileStore {
    name: String,
    path: PathBuf,
    write_lock: Mutex<()>,
    version: watch::Sender<u64>,
}

impl FileStore {
    /// Opens the store `name` inside `dir`.
    ///
    /// Nothing is touched on disk until the first edit.
    pub fn open(dir: impl AsRef<Path>, name: &str) -> StoreResult<Self> {
        validate_store_name(name)?;

        let path = dir.as_ref().join(format!("{}{}", name, FILE_SUFFIX));
        let (version, _) = watch::channel(0);

        debug!(store = %name, ?path, "Opened file preference store");
        Ok(FileStore {
            name: name.to_string(),
            path,
            write_lock: Mutex::new(()),
            version,
        })
    }

    /// Location of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    async fn read_document(&self) -> StoreResult<Preferences> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Preferences::new()),
            Err(err) => return Err(StoreError::io(&self.path, err)),
        };

        let document: PreferencesDocument = toml::from_str(&contents)
            .map_err(|err| StoreError::corrupted(&self.path, err.to_string()))?;

        Ok(document.values.into_iter().collect())
    }

    async fn write_document(&self, prefs: &Preferences) -> StoreResult<()> {
        let document = PreferencesDocument {
            updated_at: Some(Utc::now()),
            values: prefs.entries().map(|(k, v)| (k.to_string(), *v)).collect(),
        };
        let contents = toml::to_string_pretty(&document)?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| StoreError::io(parent, err))?;
        }

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, contents)
            .await
            .map_err(|err| StoreError::io(&tmp, err))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|err| StoreError::io(&self.path, err))?;

        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for FileStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read(&self) -> StoreResult<Preferences> {
        self.read_document().await
    }

    async fn edit(&self, transform: Transform) -> StoreResult<Preferences> {
        let _guard = self.write_lock.lock().await;

        let mut next = match self.read_document().await {
            Ok(current) => current,
            Err(err @ StoreError::Corrupted { .. }) => {
                warn!(store = %self.name, %err, "Replacing corrupted preferences");
                Preferences::new()
            }
            Err(err) => return Err(err),
        };
        transform(&mut next);
        self.write_document(&next).await?;

        self.version.send_modify(|v| *v += 1);
        info!(store = %self.name, path = ?self.path, "Preferences saved");
        Ok(next)
    }

    fn changes(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }
}

/// Store names become file names: no separators, no dot-files.
///
/// ```rust
/// use tiptime_prefs::store::validate_store_name;
///
/// assert!(validate_store_name("input_preferences").is_ok());
/// assert!(validate_store_name("../escape").is_err());
/// ```
pub fn validate_store_name(name: &str) -> StoreResult<()> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.');

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidName(name.to_string()))
    }
}
