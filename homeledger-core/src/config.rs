//! Configuration management
//!
//! Settings live in `settings.json` inside the data directory:
//! ```json
//! {
//!   "household": { "snapshotFile": "household.json", "loggingEnabled": true },
//!   "app": { ... }
//! }
//! ```
//! Keys this crate does not manage are preserved on save.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const SETTINGS_FILE: &str = "settings.json";
const DEFAULT_SNAPSHOT_FILE: &str = "household.json";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    household: HouseholdSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HouseholdSettings {
    #[serde(default = "default_snapshot_file")]
    snapshot_file: String,
    #[serde(default = "default_true")]
    logging_enabled: bool,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

impl Default for HouseholdSettings {
    fn default() -> Self {
        Self {
            snapshot_file: default_snapshot_file(),
            logging_enabled: true,
            other: HashMap::new(),
        }
    }
}

fn default_snapshot_file() -> String {
    DEFAULT_SNAPSHOT_FILE.to_string()
}

fn default_true() -> bool {
    true
}

/// Homeledger configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    /// Household snapshot file name, relative to the data directory
    pub snapshot_file: String,
    pub logging_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot_file: default_snapshot_file(),
            logging_enabled: true,
        }
    }
}

impl Config {
    /// Load config from the data directory.
    ///
    /// `HOMELEDGER_LOGGING` overrides the logging switch (for CI/testing).
    pub fn load(data_dir: &Path) -> Result<Self> {
        let raw = read_settings(&data_dir.join(SETTINGS_FILE))?;

        let logging_enabled = match std::env::var("HOMELEDGER_LOGGING").ok().as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => true,
            Some("false" | "0" | "no" | "FALSE" | "NO") => false,
            _ => raw.household.logging_enabled,
        };

        let snapshot_file = if raw.household.snapshot_file.trim().is_empty() {
            default_snapshot_file()
        } else {
            raw.household.snapshot_file
        };

        Ok(Self {
            snapshot_file,
            logging_enabled,
        })
    }

    /// Save config, keeping settings this crate does not manage
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let settings_path = data_dir.join(SETTINGS_FILE);
        let mut settings = read_settings(&settings_path)?;

        settings.household.snapshot_file = self.snapshot_file.clone();
        settings.household.logging_enabled = self.logging_enabled;

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)
            .with_context(|| format!("Failed to write {:?}", settings_path))?;
        Ok(())
    }

    /// Absolute path of the household snapshot
    pub fn snapshot_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.snapshot_file)
    }
}

/// A missing or unreadable-as-JSON settings file falls back to defaults
fn read_settings(path: &Path) -> Result<SettingsFile> {
    if !path.exists() {
        return Ok(SettingsFile::default());
    }
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    Ok(serde_json::from_str(&content).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_settings_file() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.snapshot_file, "household.json");
        assert_eq!(config.snapshot_path(dir.path()), dir.path().join("household.json"));
    }

    #[test]
    fn test_save_preserves_unmanaged_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(
            &path,
            r#"{"app": {"theme": "dark"}, "household": {"snapshotFile": "casa.json", "currency": "BRL"}}"#,
        )
        .unwrap();

        let mut config = Config::load(dir.path()).unwrap();
        assert_eq!(config.snapshot_file, "casa.json");

        config.snapshot_file = "home.json".to_string();
        config.save(dir.path()).unwrap();

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["app"]["theme"], "dark");
        assert_eq!(saved["household"]["currency"], "BRL");
        assert_eq!(saved["household"]["snapshotFile"], "home.json");
    }

    #[test]
    fn test_invalid_json_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "not json").unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.snapshot_file, "household.json");
    }
}
