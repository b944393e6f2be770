//! Configuration management for Flashify.
//!
//! Loads configuration from ${FLASHIFY_HOME}/config.toml with sensible
//! defaults. The API base URL can additionally be overridden per-invocation
//! with the `FLASHIFY_API_URL` environment variable, which wins over both the
//! config file and the built-in default.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
/// To update, edit default_config.toml directly.
pub fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for Flashify configuration and data directories.
    //!
    //! FLASHIFY_HOME resolution order:
    //! 1. FLASHIFY_HOME environment variable (if set)
    //! 2. ~/.config/flashify (default)

    use std::path::PathBuf;

    /// Returns the Flashify home directory.
    ///
    /// Checks FLASHIFY_HOME env var first, falls back to ~/.config/flashify
    pub fn flashify_home() -> PathBuf {
        if let Ok(home) = std::env::var("FLASHIFY_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("flashify"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        flashify_home().join("config.toml")
    }

    /// Returns the path to the persisted credential file.
    pub fn credentials_path() -> PathBuf {
        flashify_home().join("credentials.json")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        flashify_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the Flashify API server.
    pub api_url: String,

    /// Timeout for API requests in seconds.
    pub request_timeout_secs: u64,
}

impl Config {
    /// Fallback base URL, matching the server's development default.
    pub const DEFAULT_API_URL: &str = "http://localhost:5000";
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// The `FLASHIFY_API_URL` env var, when set and non-empty, overrides
    /// whatever the file (or default) provides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?
        } else {
            Config::default()
        };

        if let Ok(url) = std::env::var("FLASHIFY_API_URL")
            && !url.trim().is_empty()
        {
            config.api_url = url.trim().trim_end_matches('/').to_string();
        }

        Ok(config)
    }

    /// Writes the default config template to the config path, if absent.
    ///
    /// Returns true if a file was created, false if one already existed.
    pub fn init() -> Result<bool> {
        let path = paths::config_path();
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, default_config_template())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(true)
    }

    /// Request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_file_missing() {
        let config = Config::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.api_url, Config::DEFAULT_API_URL);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_url = \"https://flashify.example\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_url, "https://flashify.example");
        // Missing fields fall back to defaults.
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_default_template_parses() {
        let config: Config = toml::from_str(default_config_template()).unwrap();
        assert_eq!(config.api_url, Config::DEFAULT_API_URL);
    }
}
