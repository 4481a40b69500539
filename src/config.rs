//! Configuration: defaults, `~/.contribcal/config.json`, then environment

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::types::{CalendarError, CalendarKind, Locale, Result};

/// API base URL used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// HTTP request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Environment variable overriding `api_url`
pub const ENV_API_URL: &str = "CONTRIBCAL_API_URL";

/// Environment variable overriding `locale`
pub const ENV_LOCALE: &str = "CONTRIBCAL_LOCALE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub locale: Locale,
    pub kind: CalendarKind,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            locale: Locale::default(),
            kind: CalendarKind::default(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Directory holding config and logs (~/.contribcal)
    pub fn data_dir() -> Result<PathBuf> {
        let base_dirs = BaseDirs::new()
            .ok_or_else(|| CalendarError::Config("Cannot determine home directory".into()))?;
        Ok(base_dirs.home_dir().join(".contribcal"))
    }

    /// Default config file path (~/.contribcal/config.json)
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("config.json"))
    }

    /// Load from the default path and apply environment overrides
    pub fn load() -> Result<Self> {
        let config = Self::load_from(&Self::default_path()?)?;
        Ok(config.with_env(|key| std::env::var(key).ok()))
    }

    /// Load a config file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&content).map_err(|e| {
            CalendarError::Config(format!("invalid config {}: {}", path.display(), e))
        })
    }

    /// Apply overrides from an environment lookup
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api_url = url;
        }
        if let Some(tag) = lookup(ENV_LOCALE) {
            self.locale = Locale::parse(&tag);
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
