use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::FeedboardError;

/// Categories a fresh dashboard follows before the user picks their own.
pub const DEFAULT_CATEGORIES: [&str; 3] = ["technology", "sports", "finance"];

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Mock sources service
    pub host: String,
    pub port: u16,

    // Client
    pub api_url: String,
    pub retry_attempts: u32,
    pub retry_base: Duration,
    pub cache_ttl: Duration,

    // Dashboard
    pub categories: Vec<String>,

    // Logging
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            api_url: "http://localhost:3000/api".to_string(),
            retry_attempts: 3,
            retry_base: Duration::from_millis(1000),
            cache_ttl: Duration::from_secs(300),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from the environment (and `.env`, if present).
    /// Every variable is optional; malformed numbers are an error.
    pub fn from_env() -> Result<Self, FeedboardError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let config = Self {
            host: env::var("FEEDBOARD_HOST").unwrap_or(defaults.host),
            port: parsed_env("FEEDBOARD_PORT")?.unwrap_or(defaults.port),
            api_url: env::var("FEEDBOARD_API_URL").unwrap_or(defaults.api_url),
            retry_attempts: parsed_env("FEEDBOARD_RETRY_ATTEMPTS")?
                .unwrap_or(defaults.retry_attempts),
            retry_base: parsed_env("FEEDBOARD_RETRY_BASE_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.retry_base),
            cache_ttl: parsed_env("FEEDBOARD_CACHE_TTL_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
            categories: env::var("FEEDBOARD_CATEGORIES")
                .map(|raw| split_list(&raw))
                .ok()
                .filter(|list| !list.is_empty())
                .unwrap_or(defaults.categories),
            log_json: parsed_env("FEEDBOARD_LOG_JSON")?.unwrap_or(defaults.log_json),
        };

        tracing::debug!(
            host = %config.host,
            port = config.port,
            api_url = %config.api_url,
            categories = ?config.categories,
            "Configuration loaded"
        );
        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Split a comma-separated list, trimming entries and dropping blanks.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parsed_env<T: FromStr>(key: &str) -> Result<Option<T>, FeedboardError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| FeedboardError::Config(format!("{key} has an invalid value: {raw}"))),
        Err(_) => Ok(None),
    }
}
