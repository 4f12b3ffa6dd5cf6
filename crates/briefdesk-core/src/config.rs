//! Configuration management for briefdesk.
//!
//! Loads configuration from ${BRIEFDESK_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default config template with comments, embedded at compile time.
const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("default_config.toml");

/// Default API base URL when neither env nor config provides one.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable that overrides the configured API base URL.
pub const API_URL_ENV: &str = "BRIEFDESK_API_URL";

pub mod paths {
    //! Path resolution for briefdesk configuration and data files.
    //!
    //! BRIEFDESK_HOME resolution order:
    //! 1. BRIEFDESK_HOME environment variable (if set)
    //! 2. ~/.config/briefdesk (default)

    use std::path::PathBuf;

    /// Returns the briefdesk home directory.
    pub fn briefdesk_home() -> PathBuf {
        if let Ok(home) = std::env::var("BRIEFDESK_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".briefdesk"),
            |h| h.join(".config").join("briefdesk"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        briefdesk_home().join("config.toml")
    }

    /// Returns the path to the stored bearer/refresh tokens.
    pub fn tokens_path() -> PathBuf {
        briefdesk_home().join("tokens.json")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the API server
    pub api_url: String,

    /// Request timeout in seconds (0 disables)
    pub request_timeout_secs: u32,

    /// Default log filter when `BRIEFDESK_LOG` is unset
    pub log_level: Option<String>,
}

impl Config {
    const DEFAULT_REQUEST_TIMEOUT_SECS: u32 = 30;

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.request_timeout_secs)))
        }
    }

    /// Resolves the API base URL with precedence: override > env > config > default.
    ///
    /// `override_url` is the command-line flag. Empty strings are treated as unset.
    /// A trailing slash is stripped so paths can be appended directly.
    ///
    /// # Errors
    /// Returns an error if the winning value is not a valid URL.
    pub fn resolve_api_url(&self, override_url: Option<&str>) -> Result<String> {
        let env_url = std::env::var(API_URL_ENV).ok();
        self.pick_api_url(override_url, env_url.as_deref())
    }

    fn pick_api_url(&self, override_url: Option<&str>, env_url: Option<&str>) -> Result<String> {
        let candidates = [override_url, env_url, Some(self.api_url.as_str())];

        let chosen = candidates
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_URL);

        let parsed = url::Url::parse(chosen).with_context(|| format!("Invalid API URL: {chosen}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("Invalid API URL: {chosen} (expected an http:// or https:// URL)");
        }
        Ok(chosen.trim_end_matches('/').to_string())
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, DEFAULT_CONFIG_TEMPLATE)
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
            log_level: None,
        }
    }
}
