use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::PulseError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub search: SearchConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Queries shorter than this (after trimming) never hit the network.
    pub min_query_len: usize,
    pub initial_query: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub path: Option<PathBuf>,
}

impl AppConfig {
    /// Load config: user file (if exists) merged over built-in defaults.
    pub fn load() -> Result<Self, PulseError> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from an explicit user file path, merged over defaults.
    pub fn load_from(user_path: &Path) -> Result<Self, PulseError> {
        let mut merged: toml::Value =
            toml::from_str(DEFAULT_CONFIG).map_err(|e| PulseError::Config(e.to_string()))?;

        if user_path.exists() {
            let user_str = std::fs::read_to_string(user_path)?;
            let user: toml::Value =
                toml::from_str(&user_str).map_err(|e| PulseError::Config(e.to_string()))?;
            merge_toml(&mut merged, user);
            tracing::debug!(path = %user_path.display(), "loaded user config");
        }

        AppConfig::deserialize(merged).map_err(|e| PulseError::Config(e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), PulseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| PulseError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The configured API key, or a config error if none was provided.
    pub fn api_key(&self) -> Result<&str, PulseError> {
        let key = self.provider.api_key.trim();
        if key.is_empty() {
            Err(PulseError::Config(format!(
                "no OMDb API key configured (set provider.api_key in {})",
                Self::config_path().display()
            )))
        } else {
            Ok(key)
        }
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Path to the database file, honoring `storage.path`.
    pub fn db_path(&self) -> PathBuf {
        if let Some(path) = &self.storage.path {
            return path.clone();
        }
        Self::project_dirs()
            .map(|d| d.data_dir().join("picturepulse.db"))
            .unwrap_or_else(|| PathBuf::from("picturepulse.db"))
    }

    /// Ensure the data directory exists and return the DB path.
    pub fn ensure_db_path(&self) -> Result<PathBuf, PulseError> {
        let path = self.db_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(path)
    }

    /// Directory for rolling log files.
    pub fn log_dir() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.data_dir().join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "picturepulse")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

/// Recursively overlay `overlay` onto `base`; tables merge, everything else replaces.
fn merge_toml(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AppConfig::default();
        assert_eq!(config.search.min_query_len, 3);
        assert_eq!(config.provider.base_url, "https://www.omdbapi.com/");
        assert!(config.storage.path.is_none());
        assert!(config.api_key().is_err());
    }

    #[test]
    fn test_roundtrip() {
        let mut config = AppConfig::default();
        config.provider.api_key = "abc123".into();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.provider.api_key, "abc123");
        assert_eq!(deserialized.search.min_query_len, config.search.min_query_len);
    }

    #[test]
    fn test_partial_user_file_merges_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[provider]\napi_key = \"k3y\"\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.api_key().unwrap(), "k3y");
        // Untouched keys keep their defaults.
        assert_eq!(config.provider.base_url, "https://www.omdbapi.com/");
        assert_eq!(config.search.min_query_len, 3);
    }

    #[test]
    fn test_missing_user_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.search.initial_query, "");
    }

    #[test]
    fn test_storage_path_override() {
        let mut config = AppConfig::default();
        config.storage.path = Some(PathBuf::from("/tmp/pp.db"));
        assert_eq!(config.db_path(), PathBuf::from("/tmp/pp.db"));
    }
}
