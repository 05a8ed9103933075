//! # Store Error Types
//!
//! Error types for preference storage.
//!
//! ## Error Classes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How observe() treats each class                      │
//! │                                                                         │
//! │  READ FAILURE (is_read_failure = true)                                 │
//! │  ├── Io          - file unreadable, permission denied, disk gone       │
//! │  └── Corrupted   - file exists but is not a preference document        │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  replaced by an empty snapshot, stream keeps going                     │
//! │                                                                         │
//! │  EVERYTHING ELSE                                                       │
//! │  ├── TypeMismatch - key stored with a different type                   │
//! │  ├── InvalidName  - store name unusable as a file name                 │
//! │  └── Internal     - serialization or engine bug                        │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  yielded once, then the stream ends                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use thiserror::Error;

/// Preference storage errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// Reading or writing the backing medium failed.
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// The backing document could not be parsed.
    #[error("Preference data at {path} is corrupted: {message}")]
    Corrupted { path: String, message: String },

    /// A key holds a value of a different type than requested.
    #[error("Preference '{key}' holds {actual}, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Store name cannot be used.
    #[error("Invalid store name '{0}'")]
    InvalidName(String),

    /// Internal store error.
    #[error("Internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Creates an Io error carrying the path it happened on.
    pub fn io(path: &Path, err: std::io::Error) -> Self {
        StoreError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    /// Creates a Corrupted error carrying the path of the bad document.
    pub fn corrupted(path: &Path, message: impl Into<String>) -> Self {
        StoreError::Corrupted {
            path: path.display().to_string(),
            message: message.into(),
        }
    }

    /// Returns true for failures reading the backing medium.
    ///
    /// Subscribers treat these as "nothing stored yet" rather than as the end
    /// of the stream.
    pub fn is_read_failure(&self) -> bool {
        matches!(self, StoreError::Io { .. } | StoreError::Corrupted { .. })
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::Internal(format!("failed to serialize preferences: {}", err))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
