//! Persisted CLI defaults.
//!
//! Precedence, highest first: command-line flags, environment variables
//! (`AZRM_FORMAT`, `AZRM_INSENSITIVE`), this config file, built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;

/// Configuration file name.
const CONFIG_FILE: &str = "config.json";

/// Get the config file path.
pub fn config_path() -> Result<PathBuf> {
    ProjectDirs::from("com", "azrm", "azrm")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
}

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Default output format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,

    /// Parse IDs case-insensitively by default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insensitive: Option<bool>,
}

impl Config {
    /// Load config from the default location, or return default.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Load config from `path`, or return default if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Save config to the default location.
    pub fn save(&self) -> Result<PathBuf> {
        let path = config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory {:?}", dir))?;
        }

        let contents = serde_json::to_string_pretty(self)?;

        #[cfg(unix)]
        {
            use std::io::Write;
            use std::os::unix::fs::OpenOptionsExt;

            let mut file = fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(path)
                .with_context(|| format!("Failed to write config to {:?}", path))?;
            file.write_all(contents.as_bytes())?;
        }

        #[cfg(not(unix))]
        {
            fs::write(path, contents)
                .with_context(|| format!("Failed to write config to {:?}", path))?;
        }

        Ok(())
    }

    /// Output format from config, or the built-in default.
    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    /// Whether IDs are parsed case-insensitively by default.
    pub fn insensitive(&self) -> bool {
        self.insensitive.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.format(), OutputFormat::Table);
        assert!(!config.insensitive());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            format: Some(OutputFormat::Json),
            insensitive: Some(true),
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"format\": \"json\""));
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        Config::default().save_to(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
