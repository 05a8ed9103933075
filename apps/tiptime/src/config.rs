//! # App Configuration
//!
//! Where preferences live and how amounts are formatted.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TIPTIME_PREFS_DIR=/var/lib/tiptime                                 │
//! │     TIPTIME_STORE_NAME=input_preferences                               │
//! │     TIPTIME_LOCALE=de-DE                                               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/tiptime/tiptime.toml (Linux)                             │
//! │     ~/Library/Application Support/com.example.tiptime/... (macOS)      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     platform data dir, "input_preferences", locale from LC_* / LANG    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # tiptime.toml
//! [preferences]
//! dir = "/home/me/.local/share/tiptime"
//! store_name = "input_preferences"
//!
//! [display]
//! locale = "en-US"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tiptime_core::CurrencyFormat;
use tiptime_prefs::{validate_store_name, INPUT_PREFERENCES_NAME};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "tiptime.toml";

/// Locale variables consulted, in order, when no locale is configured.
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MONETARY", "LANG"];

// =============================================================================
// Preferences Settings
// =============================================================================

/// Where the input preferences are persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferencesSettings {
    /// Directory holding the store file.
    /// Falls back to the platform data directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Store name; becomes the file name.
    #[serde(default = "default_store_name")]
    pub store_name: String,
}

fn default_store_name() -> String {
    INPUT_PREFERENCES_NAME.to_string()
}

impl Default for PreferencesSettings {
    fn default() -> Self {
        PreferencesSettings {
            dir: None,
            store_name: default_store_name(),
        }
    }
}

// =============================================================================
// Display Settings
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Locale tag such as `en-US` or `de_DE.UTF-8`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete app configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub preferences: PreferencesSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (tiptime.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    fn from_file(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> AppResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| AppError::Config("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        // Same rule the file store applies when it opens
        validate_store_name(&self.preferences.store_name)?;

        if let Some(ref locale) = self.display.locale {
            CurrencyFormat::for_locale(locale)?;
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any variable source.
    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("TIPTIME_PREFS_DIR") {
            debug!(dir = %dir, "Overriding preferences directory from environment");
            self.preferences.dir = Some(PathBuf::from(dir));
        }

        if let Some(name) = lookup("TIPTIME_STORE_NAME") {
            self.preferences.store_name = name;
        }

        if let Some(locale) = lookup("TIPTIME_LOCALE") {
            debug!(locale = %locale, "Overriding locale from environment");
            self.display.locale = Some(locale);
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Resolved Values
    // =========================================================================

    /// Directory the preference store should live in, if any is available.
    pub fn preferences_dir(&self) -> Option<PathBuf> {
        self.preferences
            .dir
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
    }

    /// Currency format for the configured or ambient locale.
    pub fn currency_format(&self) -> AppResult<CurrencyFormat> {
        self.currency_format_from(|key| std::env::var(key).ok())
    }

    fn currency_format_from(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> AppResult<CurrencyFormat> {
        if let Some(ref locale) = self.display.locale {
            return Ok(CurrencyFormat::for_locale(locale)?);
        }

        // An ambient locale we can't format is not an error.
        let ambient = LOCALE_VARS
            .iter()
            .filter_map(|var| lookup(var))
            .find(|value| !value.is_empty());

        match ambient {
            Some(tag) => Ok(CurrencyFormat::for_locale(&tag).unwrap_or_else(|e| {
                warn!(locale = %tag, "{}. Falling back to en-US.", e);
                CurrencyFormat::EN_US
            })),
            None => Ok(CurrencyFormat::EN_US),
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "example", "tiptime")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.preferences.store_name, "input_preferences");
        assert!(config.preferences.dir.is_none());
        assert!(config.display.locale.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_file() {
        let config: AppConfig = toml::from_str(
            r#"
            [display]
            locale = "de-DE"
            "#,
        )
        .unwrap();

        assert_eq!(config.display.locale.as_deref(), Some("de-DE"));
        assert_eq!(config.preferences.store_name, "input_preferences");
    }

    #[test]
    fn test_validate() {
        let mut config = AppConfig::default();
        for bad in ["", "  ", "../prefs", "a\\b", ".hidden", "sp ace", "a:b"] {
            config.preferences.store_name = bad.into();
            assert!(
                matches!(config.validate(), Err(AppError::Store(_))),
                "{bad:?} should be rejected"
            );
        }

        config.preferences.store_name = "prefs".into();
        config.display.locale = Some("xx-YY".into());
        assert!(matches!(config.validate(), Err(AppError::Core(_))));

        config.display.locale = Some("fr_FR.UTF-8".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let mut config = AppConfig::default();
        config.apply_overrides_from(vars(&[
            ("TIPTIME_PREFS_DIR", "/tmp/tips"),
            ("TIPTIME_STORE_NAME", "other"),
            ("TIPTIME_LOCALE", "ja-JP"),
        ]));

        assert_eq!(config.preferences.dir, Some(PathBuf::from("/tmp/tips")));
        assert_eq!(config.preferences.store_name, "other");
        assert_eq!(config.display.locale.as_deref(), Some("ja-JP"));
        assert_eq!(config.preferences_dir(), Some(PathBuf::from("/tmp/tips")));
    }

    #[test]
    fn test_currency_resolution_order() {
        let mut config = AppConfig::default();

        let env = vars(&[("LC_MONETARY", "de_DE.UTF-8"), ("LANG", "en_GB.UTF-8")]);
        assert_eq!(config.currency_format_from(&env).unwrap(), CurrencyFormat::DE_DE);

        let env = vars(&[("LC_ALL", ""), ("LANG", "en_GB.UTF-8")]);
        assert_eq!(config.currency_format_from(&env).unwrap(), CurrencyFormat::EN_GB);

        let env = vars(&[]);
        assert_eq!(config.currency_format_from(&env).unwrap(), CurrencyFormat::EN_US);

        // Unknown ambient locale falls back quietly
        let env = vars(&[("LANG", "tlh_QO")]);
        assert_eq!(config.currency_format_from(&env).unwrap(), CurrencyFormat::EN_US);

        // Configured locale wins over the environment
        config.display.locale = Some("pt-BR".into());
        let env = vars(&[("LC_ALL", "de_DE")]);
        assert_eq!(config.currency_format_from(&env).unwrap(), CurrencyFormat::PT_BR);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = AppConfig::default();
        config.preferences.dir = Some(dir.path().join("prefs"));
        config.display.locale = Some("en-IN".into());
        config.save(Some(path.clone())).unwrap();

        let loaded = AppConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_bad_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[display]\nlocale = \"xx-YY\"\n").unwrap();

        assert!(AppConfig::from_file(&path).unwrap().validate().is_err());
        assert!(AppConfig::load(Some(path.clone())).is_err());

        let fallback = AppConfig::load_or_default(Some(path));
        assert_eq!(fallback.preferences.store_name, "input_preferences");
    }
}
