//! Configuration management for Feedcast

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Fake backend the feed talks to unless configured otherwise
pub const DEFAULT_BASE_URL: &str = "https://my-json-server.typicode.com/kedroviy/fake-server";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in humantime form, e.g. "10s"
    #[serde(default = "default_timeout")]
    pub timeout: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default)]
    pub locale: Locale,
    /// How long an error stays visible before it is cleared, e.g. "3s"
    #[serde(default = "default_error_display")]
    pub error_display: String,
    /// Author id given to posts created from this client
    #[serde(default = "default_user_id")]
    pub default_user_id: u64,
}

/// Language of the user-facing failure messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "ru" => Ok(Locale::Ru),
            _ => Err(format!("Invalid locale: '{}'. Valid options: en, ru", s)),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> String {
    "10s".to_string()
}

fn default_error_display() -> String {
    "3s".to_string()
}

fn default_user_id() -> u64 {
    1
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            error_display: default_error_display(),
            default_user_id: default_user_id(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// A missing file is not an error: the built-in defaults point at the
    /// public fake backend. `FEEDCAST_API_URL` overrides the base URL.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        let mut config = if config_path.exists() {
            Self::load_from_path(&config_path)?
        } else {
            tracing::debug!("No config file at {}, using defaults", config_path.display());
            Self::default_config()
        };

        if let Ok(url) = std::env::var("FEEDCAST_API_URL") {
            config.api.base_url = url;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Create a default configuration
    pub fn default_config() -> Self {
        Self {
            api: ApiConfig::default(),
            feed: FeedConfig::default(),
        }
    }

    /// Request timeout for the HTTP client
    pub fn request_timeout(&self) -> Result<Duration> {
        parse_duration("api.timeout", &self.api.timeout)
    }

    /// Delay after which a displayed error is cleared
    pub fn error_display_timeout(&self) -> Result<Duration> {
        parse_duration("feed.error_display", &self.feed.error_display)
    }

    fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField("api.base_url".to_string()).into());
        }
        self.request_timeout()?;
        self.error_display_timeout()?;
        Ok(())
    }
}

fn parse_duration(field: &str, value: &str) -> Result<Duration> {
    humantime::parse_duration(value).map_err(|e| {
        ConfigError::InvalidValue {
            field: field.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Resolve the configuration file path, honouring `FEEDCAST_CONFIG`
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("FEEDCAST_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("feedcast").join("config.toml"))
}
