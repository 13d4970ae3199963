//! Configuration management for cinelist
//!
//! Handles config file loading and API key resolution.
//! Config is stored at ~/.config/cinelist/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Placeholder shipped for the search key; seeing it means "not configured"
pub const SEARCH_KEY_SENTINEL: &str = "YOUR_RAPIDAPI_KEY";

/// Placeholder shipped for the streaming key
pub const STREAMING_KEY_SENTINEL: &str = "YOUR_STREAMING_API_KEY";

pub const SEARCH_KEY_ENV: &str = "CINELIST_IMDB_SEARCH_KEY";
pub const STREAMING_KEY_ENV: &str = "CINELIST_STREAMING_KEY";

/// Region used for streaming lookups unless configured otherwise
pub const DEFAULT_REGION: &str = "in";

const DEFAULT_WATCHLIST_FILE: &str = "watchlist.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{service} API key is not configured (set {env} or add it to the config file)")]
    MissingApiKey {
        service: &'static str,
        env: &'static str,
    },

    #[error("Could not read config file ({path}): {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file ({path}): {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Keys for the two RapidAPI services
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKeys {
    #[serde(default = "default_search_key")]
    pub imdb_search: String,
    #[serde(default = "default_streaming_key")]
    pub streaming: String,
}

fn default_search_key() -> String {
    SEARCH_KEY_SENTINEL.to_string()
}

fn default_streaming_key() -> String {
    STREAMING_KEY_SENTINEL.to_string()
}

impl Default for ApiKeys {
    fn default() -> Self {
        Self {
            imdb_search: default_search_key(),
            streaming: default_streaming_key(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api_keys: ApiKeys,
    /// Streaming region code, used for both the request and the response lookup
    #[serde(default = "default_region")]
    pub region: String,
    /// Watchlist file location
    #[serde(default)]
    pub watchlist_path: Option<PathBuf>,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_keys: ApiKeys::default(),
            region: default_region(),
            watchlist_path: None,
        }
    }
}

impl Config {
    /// Get config file path (~/.config/cinelist/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cinelist").join("config.toml"))
    }

    /// Load config from the given file, or the default location.
    ///
    /// A missing file yields defaults; an unreadable or malformed one is an
    /// error. Environment overrides are applied afterwards.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path.map(Path::to_path_buf).or_else(Self::path) {
            Some(p) => p,
            None => return Ok(Self::default().with_env_overrides()),
        };

        let config = match std::fs::read_to_string(&path) {
            Ok(text) => Self::from_toml(&text).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Self::default()
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        Ok(config.with_env_overrides())
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Environment variables take precedence over the file
    fn with_env_overrides(mut self) -> Self {
        if let Some(key) = env_key(SEARCH_KEY_ENV) {
            self.api_keys.imdb_search = key;
        }
        if let Some(key) = env_key(STREAMING_KEY_ENV) {
            self.api_keys.streaming = key;
        }
        self
    }

    /// Search key, or `None` while it is blank or still the placeholder
    pub fn search_api_key(&self) -> Option<String> {
        configured(&self.api_keys.imdb_search, SEARCH_KEY_SENTINEL)
    }

    /// Streaming key, or `None` while it is blank or still the placeholder
    pub fn streaming_api_key(&self) -> Option<String> {
        configured(&self.api_keys.streaming, STREAMING_KEY_SENTINEL)
    }

    /// Resolved watchlist file: configured path, else ~/.local/share/cinelist/watchlist.json
    pub fn watchlist_path(&self) -> PathBuf {
        self.watchlist_path.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .map(|p| p.join("cinelist"))
                .unwrap_or_default()
                .join(DEFAULT_WATCHLIST_FILE)
        })
    }
}

fn env_key(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

fn configured(key: &str, sentinel: &str) -> Option<String> {
    let key = key.trim();
    if key.is_empty() || key == sentinel {
        None
    } else {
        Some(key.to_string())
    }
}
