//! Process configuration: API credential, endpoint, and per-view result limits.
//!
//! Values come from an optional TOML file, then environment variables
//! (`YOUTUBE_API_KEY`, `YOUTUBE_API_BASE_URL`) override the file. A missing
//! API key is reported when the configuration is loaded, not on first request.

use secrecy::SecretString;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use thiserror::Error;

pub const API_KEY_ENV: &str = "YOUTUBE_API_KEY";
pub const BASE_URL_ENV: &str = "YOUTUBE_API_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("no YouTube API key configured (set YOUTUBE_API_KEY or `api_key` in the config file)")]
    MissingApiKey,
}

/// The on-disk shape of the config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    api_key: Option<String>,
    base_url: Option<String>,
    region_code: Option<String>,
    feed_max_results: Option<u32>,
    search_max_results: Option<u32>,
    channel_max_results: Option<u32>,
    comment_max_results: Option<u32>,
}

/// Read-only, process-wide configuration.
pub struct Config {
    pub api_key: SecretString,
    pub base_url: String,
    /// `regionCode` for the popular chart and for search.
    pub region_code: String,
    pub feed_max_results: u32,
    pub search_max_results: u32,
    pub channel_max_results: u32,
    pub comment_max_results: u32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("region_code", &self.region_code)
            .field("feed_max_results", &self.feed_max_results)
            .field("search_max_results", &self.search_max_results)
            .field("channel_max_results", &self.channel_max_results)
            .field("comment_max_results", &self.comment_max_results)
            .finish()
    }
}

impl Config {
    /// Defaults for everything but the credential.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            region_code: "IN".to_string(),
            feed_max_results: 10,
            search_max_results: 20,
            channel_max_results: 50,
            comment_max_results: 20,
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn region_code(mut self, region_code: impl Into<String>) -> Self {
        self.region_code = region_code.into();
        self
    }

    /// Loads the config file (if given and present), then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => Self::read_file(path)?,
            None => ConfigFile::default(),
        };
        Self::resolve(file, |name| std::env::var(name).ok())
    }

    fn read_file(path: &Path) -> Result<ConfigFile, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file found, using defaults");
                return Ok(ConfigFile::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };
        let file: ConfigFile = toml::from_str(&content)?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(file)
    }

    /// Merges the file with the environment (looked up through `env`).
    fn resolve(
        file: ConfigFile,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_key = env(API_KEY_ENV)
            .or(file.api_key)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let mut config = Self::with_api_key(api_key);
        if let Some(base_url) = env(BASE_URL_ENV).or(file.base_url) {
            config.base_url = base_url;
        }
        if let Some(region_code) = file.region_code {
            config.region_code = region_code;
        }
        // the API caps a single page at 50 results, and a videos.list call at 50 ids
        config.feed_max_results = file
            .feed_max_results
            .unwrap_or(config.feed_max_results)
            .min(50);
        config.search_max_results = file
            .search_max_results
            .unwrap_or(config.search_max_results)
            .min(50);
        config.channel_max_results = file
            .channel_max_results
            .unwrap_or(config.channel_max_results)
            .min(50);
        config.comment_max_results = file
            .comment_max_results
            .unwrap_or(config.comment_max_results)
            .min(100);
        Ok(config)
    }
}
