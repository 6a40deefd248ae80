//! Bot configuration
//!
//! All credentials and knobs come from the environment. Missing required
//! variables are collected and reported together, so a broken deployment
//! shows every problem at once instead of one per restart.

use std::time::Duration;

use thiserror::Error;

/// Default homework statuses endpoint
pub const DEFAULT_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Default pause between poll cycles, in seconds
const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;

/// Configuration failures, the only fatal errors in the program
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required environment variables are not set
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingVars(Vec<String>),

    /// A present value failed validation
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Bot configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// OAuth token for the homework statuses API
    pub practicum_token: String,

    /// Telegram Bot API token
    pub telegram_token: String,

    /// Telegram chat that receives the notifications
    pub telegram_chat_id: String,

    /// Homework statuses endpoint
    pub endpoint: String,

    /// Pause between poll cycles
    pub poll_interval: Duration,

    /// Cursor value for the first poll
    pub start_from: i64,
}

impl Config {
    /// Reads configuration from environment variables.
    ///
    /// Required:
    /// - PRACTICUM_TOKEN
    /// - TELEGRAM_TOKEN
    /// - TELEGRAM_CHAT_ID
    ///
    /// Optional:
    /// - HOMEWORK_ENDPOINT (default: the production statuses endpoint)
    /// - POLL_INTERVAL (seconds, default: 600)
    /// - FROM_DATE (default: 0)
    pub fn from_env() -> Result<Self, ConfigError> {
        let practicum_token = env_non_empty("PRACTICUM_TOKEN");
        let telegram_token = env_non_empty("TELEGRAM_TOKEN");
        let telegram_chat_id = env_non_empty("TELEGRAM_CHAT_ID");

        let mut missing = Vec::new();
        for (name, value) in [
            ("PRACTICUM_TOKEN", &practicum_token),
            ("TELEGRAM_TOKEN", &telegram_token),
            ("TELEGRAM_CHAT_ID", &telegram_chat_id),
        ] {
            if value.is_none() {
                missing.push(name.to_string());
            }
        }

        let (Some(practicum_token), Some(telegram_token), Some(telegram_chat_id)) =
            (practicum_token, telegram_token, telegram_chat_id)
        else {
            return Err(ConfigError::MissingVars(missing));
        };

        let endpoint =
            std::env::var("HOMEWORK_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        let poll_interval = std::env::var("POLL_INTERVAL")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS));

        let start_from = std::env::var("FROM_DATE")
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .unwrap_or(0);

        let config = Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint,
            poll_interval,
            start_from,
        };
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "endpoint must start with http:// or https://, got {:?}",
                self.endpoint
            )));
        }

        if self.poll_interval.is_zero() {
            return Err(ConfigError::Invalid(
                "poll interval must be greater than 0".to_string(),
            ));
        }

        if self.start_from < 0 {
            return Err(ConfigError::Invalid(
                "start cursor cannot be negative".to_string(),
            ));
        }

        Ok(())
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
