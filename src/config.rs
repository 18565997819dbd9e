use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "fleet-manager";
const CONFIG_FILE: &str = "config.json";
const DATA_FILE: &str = "fleet.csv";

/// Env var overriding the fleet data file.
pub const DATA_FILE_ENV: &str = "FLEET_DATA_FILE";

pub const DEFAULT_LOG_FILTER: &str = "fleet_manager=info,fleet=info";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    /// Where the fleet is saved between runs.
    pub data_file: PathBuf,
    /// tracing filter directive, used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl FleetConfig {
    /// Load from the user's config directory, then apply env overrides.
    /// Falls back to defaults if the file is missing or fails to parse.
    pub fn load() -> Self {
        let mut config = match config_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(e) => {
                // Logging is configured from this file, so it is not up yet.
                eprintln!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        };
        config.apply_env();
        config
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config = serde_json::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Read the file at `path`, apply `change`, and write it back.
    ///
    /// Env overrides are not applied, so they never end up in the file.
    pub fn update(path: &Path, change: impl FnOnce(&mut Self)) -> Result<Self> {
        let mut config = Self::load_from(path)?;
        change(&mut config);
        config.save_to(path)?;
        tracing::info!(path = %path.display(), "config saved");
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Some(path) = std::env::var_os(DATA_FILE_ENV).filter(|v| !v.is_empty()) {
            self.data_file = PathBuf::from(path);
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME)
}

/// `config.json` in the platform config directory.
pub fn config_path() -> Result<PathBuf> {
    let dirs =
        project_dirs().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    Ok(dirs.config_dir().join(CONFIG_FILE))
}

/// Platform data directory, or the working directory when none exists.
fn default_data_file() -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.data_dir().join(DATA_FILE),
        None => PathBuf::from(DATA_FILE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = FleetConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, FleetConfig::default());
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "data_file": "/tmp/ships.csv" }"#).unwrap();

        let config = FleetConfig::load_from(&path).unwrap();
        assert_eq!(config.data_file, PathBuf::from("/tmp/ships.csv"));
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = FleetConfig {
            data_file: PathBuf::from("fleet-a.csv"),
            log_filter: "debug".to_string(),
        };
        config.save_to(&path).unwrap();
        assert_eq!(FleetConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_update_changes_only_what_it_touches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "log_filter": "warn" }"#).unwrap();

        let updated =
            FleetConfig::update(&path, |c| c.data_file = PathBuf::from("ships.csv")).unwrap();
        assert_eq!(updated.data_file, PathBuf::from("ships.csv"));
        assert_eq!(updated.log_filter, "warn");
        assert_eq!(FleetConfig::load_from(&path).unwrap(), updated);
    }

    #[test]
    fn test_garbage_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(FleetConfig::load_from(&path).is_err());
    }
}
