//! API credential storage.
//!
//! The key lives in a small JSON file under the platform config directory
//! and can be overridden with the `CFBD_API_KEY` environment variable.
//! Nothing here validates the key beyond "non-empty"; a bad key surfaces as
//! [`crate::CfbdError::Unauthorized`] on the first API call, at which point
//! the front ends prompt for re-entry.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::API_KEY_ENV_VAR;

/// Process-wide configuration: initialized once per run, read-only after.
/// Passed into [`crate::CfbdClient::new`] rather than living as global
/// state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_key: String,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Default location of the credential file:
    /// `<config_dir>/cfb-picker/config.json`.
    pub fn default_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.push(".config");
            home
        });
        base.join("cfb-picker").join("config.json")
    }

    /// Load the stored credential. `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Config>> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let config: Config = serde_json::from_str(&raw)?;
        Ok(Some(config))
    }

    /// Persist the credential, creating parent directories as needed.
    /// Overwrites a previously stored key.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Resolve the API key without prompting: environment first, then the
/// stored file. Empty values count as absent.
pub fn stored_api_key(path: &Path) -> Result<Option<String>> {
    if let Ok(key) = std::env::var(API_KEY_ENV_VAR) {
        let key = key.trim().to_string();
        if !key.is_empty() {
            return Ok(Some(key));
        }
    }
    Ok(Config::load(path)?
        .map(|config| config.api_key)
        .filter(|key| !key.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        Config::new("abc123").save(&path).unwrap();
        let loaded = Config::load(&path).unwrap().unwrap();
        assert_eq!(loaded.api_key, "abc123");
    }

    #[test]
    fn load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load(&dir.path().join("config.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn load_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn save_overwrites_previous_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        Config::new("old").save(&path).unwrap();
        Config::new("new").save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap().unwrap().api_key, "new");
    }

    #[test]
    fn stored_key_ignores_blank_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        Config::new("   ").save(&path).unwrap();

        // Only meaningful when the env var is not set in the test
        // environment; the file path alone must not produce a key.
        if std::env::var(API_KEY_ENV_VAR).is_err() {
            assert!(stored_api_key(&path).unwrap().is_none());
        }
    }
}
