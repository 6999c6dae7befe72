//! Configuration management
//!
//! Loads configuration from a TOML file with support for:
//! - Bounty API base URL (API_BASE_URL env var takes precedence)
//! - Request timeout
//! - Listing cooldown window

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

/// Config file looked up in the working directory when no path is given
pub const CONFIG_FILE_NAME: &str = "bounty-client.toml";

/// Environment variable overriding the API base URL
pub const API_BASE_URL_ENV: &str = "API_BASE_URL";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_FETCH_COOLDOWN_SECS: u64 = 5 * 60;

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub cooldown: CooldownConfig,
}

/// Remote bounty API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Listing throttle settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CooldownConfig {
    /// Minimum seconds between two listing requests
    pub fetch_cooldown_secs: u64,
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            fetch_cooldown_secs: DEFAULT_FETCH_COOLDOWN_SECS,
        }
    }
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Config {
    /// Load from bounty-client.toml if present, else the embedded defaults,
    /// then apply env overrides
    pub fn load() -> Result<Self> {
        let path = Path::new(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load_from(path)
        } else {
            Self::parse(DEFAULT_CONFIG).context("Failed to parse default config")
        }
    }

    /// Load from a specific path; the file must exist
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Some(url) = env_base_url() {
            self.api.base_url = url;
        }
        self.api.base_url = normalize_base_url(&self.api.base_url);
    }

    /// Defaults plus env overrides, without touching the filesystem
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.api.base_url = normalize_base_url(base_url);
        self
    }

    /// Cooldown is kept in whole seconds; a fractional part rounds up
    pub fn with_fetch_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown.fetch_cooldown_secs =
            cooldown.as_secs() + u64::from(cooldown.subsec_nanos() > 0);
        self
    }

    pub fn fetch_cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown.fetch_cooldown_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        // Embedded config is covered by test_embedded_default_parses
        toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|_| Self {
            api: ApiConfig {
                base_url: DEFAULT_API_BASE_URL.to_string(),
                request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            },
            cooldown: CooldownConfig::default(),
        })
    }
}

fn env_base_url() -> Option<String> {
    match std::env::var(API_BASE_URL_ENV) {
        Ok(url) if !url.trim().is_empty() => Some(url),
        _ => None,
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::io::Write;

    // Tests touching API_BASE_URL run one at a time
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_embedded_default_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.api.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.cooldown.fetch_cooldown_secs, DEFAULT_FETCH_COOLDOWN_SECS);
    }

    #[test]
    fn test_cooldown_section_optional() {
        let config: Config = toml::from_str(
            r#"
            [api]
            base_url = "https://bounties.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.fetch_cooldown(), Duration::from_secs(300));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_with_base_url_strips_trailing_slash() {
        let config = Config::default().with_base_url("https://bounties.example.com/");
        assert_eq!(config.api.base_url, "https://bounties.example.com");
    }

    #[test]
    fn test_with_fetch_cooldown() {
        let config = Config::default().with_fetch_cooldown(Duration::from_secs(10));
        assert_eq!(config.fetch_cooldown(), Duration::from_secs(10));
    }

    #[test]
    fn test_sub_second_cooldown_rounds_up() {
        let config = Config::default().with_fetch_cooldown(Duration::from_millis(200));
        assert_eq!(config.fetch_cooldown(), Duration::from_secs(1));

        let config = Config::default().with_fetch_cooldown(Duration::from_millis(1500));
        assert_eq!(config.fetch_cooldown(), Duration::from_secs(2));

        let config = Config::default().with_fetch_cooldown(Duration::ZERO);
        assert_eq!(config.fetch_cooldown(), Duration::ZERO);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let err = Config::load_from("/nonexistent/bounty-client.toml").unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/bounty-client.toml"));
    }

    #[test]
    fn test_load_from_file() {
        let _guard = ENV_LOCK.lock();
        std::env::remove_var(API_BASE_URL_ENV);

        let file = config_file(
            r#"
            [api]
            base_url = "https://file.example.com/"
            request_timeout_secs = 5

            [cooldown]
            fetch_cooldown_secs = 60
            "#,
        );
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://file.example.com");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.fetch_cooldown(), Duration::from_secs(60));
    }

    #[test]
    fn test_env_overrides_base_url() {
        let _guard = ENV_LOCK.lock();
        let file = config_file(
            r#"
            [api]
            base_url = "https://file.example.com"
            "#,
        );

        std::env::set_var(API_BASE_URL_ENV, "https://env.example.com/");
        let from_file = Config::load_from(file.path()).unwrap();
        let from_env = Config::from_env();
        std::env::remove_var(API_BASE_URL_ENV);

        assert_eq!(from_file.api.base_url, "https://env.example.com");
        assert_eq!(from_env.api.base_url, "https://env.example.com");
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let _guard = ENV_LOCK.lock();

        std::env::set_var(API_BASE_URL_ENV, "   ");
        let config = Config::from_env();
        std::env::remove_var(API_BASE_URL_ENV);

        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_from_env_defaults_to_localhost() {
        let _guard = ENV_LOCK.lock();
        std::env::remove_var(API_BASE_URL_ENV);

        assert_eq!(Config::from_env().api.base_url, "http://localhost:3000");
    }
}
