//! Client configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::FeedError;
use crate::pagination::DEFAULT_PAGE_SIZE;

/// Gateway address used when nothing is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Environment variable overriding the gateway base URL.
pub const ENV_API_BASE_URL: &str = "FEED_API_BASE_URL";

/// Environment variable overriding the session flag file.
pub const ENV_SESSION_PATH: &str = "FEED_SESSION_PATH";

/// User lists are effectively static for a session.
pub const STALE_TIME_USERS: Duration = Duration::from_secs(30 * 60);

/// Feed pages are revalidated eagerly.
pub const STALE_TIME_FEED: Duration = Duration::from_secs(30);

/// Feed client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Gateway base URL.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Items per feed page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Staleness window of the user list, in seconds.
    #[serde(default = "default_users_stale_secs")]
    pub users_stale_secs: u64,

    /// Staleness window of feed pages, in seconds.
    #[serde(default = "default_feed_stale_secs")]
    pub feed_stale_secs: u64,

    /// Where the session flag is stored. Defaults to the user data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_path: Option<PathBuf>,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_users_stale_secs() -> u64 {
    STALE_TIME_USERS.as_secs()
}

fn default_feed_stale_secs() -> u64 {
    STALE_TIME_FEED.as_secs()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            page_size: default_page_size(),
            users_stale_secs: default_users_stale_secs(),
            feed_stale_secs: default_feed_stale_secs(),
            session_path: None,
        }
    }
}

impl ClientConfig {
    /// Load config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FeedError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            FeedError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse config from TOML text. Missing keys take their defaults.
    pub fn from_toml(content: &str) -> Result<Self, FeedError> {
        let config: Self =
            toml::from_str(content).map_err(|e| FeedError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn with_env(self) -> Self {
        self.with_env_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
        if let Some(path) = lookup(ENV_SESSION_PATH).filter(|v| !v.trim().is_empty()) {
            self.session_path = Some(PathBuf::from(path));
        }
        self
    }

    /// Override the base URL.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Check the base URL and page size.
    pub fn validate(&self) -> Result<(), FeedError> {
        let url = url::Url::parse(&self.api_base_url)
            .map_err(|e| FeedError::Config(format!("invalid api_base_url: {}", e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FeedError::Config(format!(
                "unsupported scheme in api_base_url: {}",
                url.scheme()
            )));
        }
        if self.page_size == 0 {
            return Err(FeedError::Config("page_size must be at least 1".into()));
        }
        Ok(())
    }

    pub fn users_stale_time(&self) -> Duration {
        Duration::from_secs(self.users_stale_secs)
    }

    pub fn feed_stale_time(&self) -> Duration {
        Duration::from_secs(self.feed_stale_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.page_size, 10);
        assert!(config.users_stale_time() > config.feed_stale_time());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config = ClientConfig::from_toml("api_base_url = \"https://feed.example.com\"").unwrap();
        assert_eq!(config.api_base_url, "https://feed.example.com");
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_invalid_url_rejected() {
        assert!(ClientConfig::from_toml("api_base_url = \"not a url\"").is_err());
        assert!(ClientConfig::from_toml("api_base_url = \"ftp://x\"").is_err());
        assert!(ClientConfig::from_toml("page_size = 0").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let config = ClientConfig::default().with_env_from(|name| match name {
            ENV_API_BASE_URL => Some("http://gateway:9000".to_string()),
            ENV_SESSION_PATH => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.api_base_url, "http://gateway:9000");
        assert!(config.session_path.is_none());
    }
}
