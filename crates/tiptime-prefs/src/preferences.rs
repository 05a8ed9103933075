//! # Typed Preferences
//!
//! A snapshot of a preference store: named entries holding either an
//! integer or a boolean, read and written through typed keys.
//!
//! ```rust
//! use tiptime_prefs::preferences::{bool_key, int_key, Preferences};
//!
//! const TIP_OPTION: tiptime_prefs::PreferenceKey<i64> = int_key("tip_option");
//! const IS_ROUND_UP: tiptime_prefs::PreferenceKey<bool> = bool_key("is_round_up");
//!
//! let mut prefs = Preferences::new();
//! prefs.set(&TIP_OPTION, 18);
//! prefs.set(&IS_ROUND_UP, true);
//!
//! assert_eq!(prefs.get(&TIP_OPTION).unwrap(), Some(18));
//! assert!(prefs.get(&IS_ROUND_UP).unwrap().unwrap());
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Values
// =============================================================================

/// A stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreferenceValue {
    Bool(bool),
    Int(i64),
}

impl PreferenceValue {
    /// Type name used in mismatch errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            PreferenceValue::Bool(_) => bool::TYPE_NAME,
            PreferenceValue::Int(_) => i64::TYPE_NAME,
        }
    }
}

/// Rust types that can be stored under a [`PreferenceKey`].
pub trait PreferenceType: Sized {
    const TYPE_NAME: &'static str;

    fn from_value(value: &PreferenceValue) -> Option<Self>;

    fn into_value(self) -> PreferenceValue;
}

impl PreferenceType for i64 {
    const TYPE_NAME: &'static str = "int";

    fn from_value(value: &PreferenceValue) -> Option<Self> {
        match value {
            PreferenceValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    fn into_value(self) -> PreferenceValue {
        PreferenceValue::Int(self)
    }
}

impl PreferenceType for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_value(value: &PreferenceValue) -> Option<Self> {
        match value {
            PreferenceValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    fn into_value(self) -> PreferenceValue {
        PreferenceValue::Bool(self)
    }
}

// =============================================================================
// Keys
// =============================================================================

/// A named entry with a fixed value type.
pub struct PreferenceKey<T> {
    name: &'static str,
    _type: PhantomData<fn() -> T>,
}

impl<T> PreferenceKey<T> {
    pub const fn new(name: &'static str) -> Self {
        PreferenceKey {
            name,
            _type: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for PreferenceKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PreferenceKey<T> {}

impl<T: PreferenceType> fmt::Debug for PreferenceKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PreferenceKey<{}>({})", T::TYPE_NAME, self.name)
    }
}

/// Declares an integer key.
pub const fn int_key(name: &'static str) -> PreferenceKey<i64> {
    PreferenceKey::new(name)
}

/// Declares a boolean key.
pub const fn bool_key(name: &'static str) -> PreferenceKey<bool> {
    PreferenceKey::new(name)
}

// =============================================================================
// Snapshot
// =============================================================================

/// The full state of a store at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preferences {
    values: BTreeMap<String, PreferenceValue>,
}

impl Preferences {
    /// An empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a key. `Ok(None)` if absent, `TypeMismatch` if stored with
    /// another type.
    pub fn get<T: PreferenceType>(&self, key: &PreferenceKey<T>) -> StoreResult<Option<T>> {
        match self.values.get(key.name()) {
            None => Ok(None),
            Some(value) => T::from_value(value)
                .map(Some)
                .ok_or_else(|| StoreError::TypeMismatch {
                    key: key.name().to_string(),
                    expected: T::TYPE_NAME,
                    actual: value.type_name(),
                }),
        }
    }

    pub fn set<T: PreferenceType>(&mut self, key: &PreferenceKey<T>, value: T) {
        self.values.insert(key.name().to_string(), value.into_value());
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Raw entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &PreferenceValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, PreferenceValue)> for Preferences {
    fn from_iter<I: IntoIterator<Item = (String, PreferenceValue)>>(iter: I) -> Self {
        Preferences {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNT: PreferenceKey<i64> = int_key("count");
    const FLAG: PreferenceKey<bool> = bool_key("flag");
    const COUNT_AS_BOOL: PreferenceKey<bool> = bool_key("count");

    #[test]
    fn test_get_set() {
        let mut prefs = Preferences::new();
        assert!(prefs.is_empty());
        assert_eq!(prefs.get(&COUNT).unwrap(), None);

        prefs.set(&COUNT, 3);
        prefs.set(&FLAG, false);
        assert_eq!(prefs.len(), 2);
        assert_eq!(prefs.get(&COUNT).unwrap(), Some(3));
        assert_eq!(prefs.get(&FLAG).unwrap(), Some(false));

        prefs.set(&COUNT, 4);
        assert_eq!(prefs.get(&COUNT).unwrap(), Some(4));
        assert_eq!(prefs.len(), 2);
    }

    #[test]
    fn test_type_mismatch() {
        let mut prefs = Preferences::new();
        prefs.set(&COUNT, 3);

        let err = prefs.get(&COUNT_AS_BOOL).unwrap_err();
        assert_eq!(
            err,
            StoreError::TypeMismatch {
                key: "count".into(),
                expected: "bool",
                actual: "int",
            }
        );
    }

    #[test]
    fn test_toml_keeps_types_apart() {
        let mut prefs = Preferences::new();
        prefs.set(&COUNT, 1);
        prefs.set(&FLAG, true);

        let text = toml::to_string(&prefs).unwrap();
        assert!(text.contains("count = 1"));
        assert!(text.contains("flag = true"));

        let parsed: Preferences = toml::from_str(&text).unwrap();
        assert_eq!(parsed.get(&COUNT).unwrap(), Some(1));
        assert_eq!(parsed.get(&FLAG).unwrap(), Some(true));
    }

    #[test]
    fn test_debug_names_type() {
        assert_eq!(format!("{:?}", COUNT), "PreferenceKey<int>(count)");
    }
}
