//! Monitor configuration from environment variables.
//!
//! [`MonitorConfig::from_lookup`] does the parsing over any key lookup so
//! it can be tested without touching the process environment.

use std::time::Duration;

/// Default backend base URL (the detection server's default bind).
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// Default interval between status polls.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("FALLWATCH_POLL_INTERVAL_MS must be a positive integer, got {0:?}")]
    InvalidPollInterval(String),

    #[error("FALLWATCH_BACKEND_URL must start with http:// or https://, got {0:?}")]
    InvalidBackendUrl(String),
}

/// Contact values to submit once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupSubmission {
    Details {
        email: String,
        phone: String,
        confidence: String,
    },
    Email(String),
}

/// Monitor configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Backend base URL without a trailing slash.
    pub backend_url: String,
    pub poll_interval: Duration,
    pub startup: Option<StartupSubmission>,
}

impl MonitorConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                      | Default                 |
    /// |------------------------------|-------------------------|
    /// | `FALLWATCH_BACKEND_URL`      | `http://127.0.0.1:5000` |
    /// | `FALLWATCH_POLL_INTERVAL_MS` | `1000`                  |
    /// | `FALLWATCH_EMAIL`            | unset                   |
    /// | `FALLWATCH_PHONE`            | unset                   |
    /// | `FALLWATCH_CONFIDENCE`       | unset                   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup("FALLWATCH_BACKEND_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        if !(backend_url.starts_with("http://") || backend_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBackendUrl(backend_url));
        }

        let poll_interval_ms = match lookup("FALLWATCH_POLL_INTERVAL_MS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                _ => return Err(ConfigError::InvalidPollInterval(raw)),
            },
            None => DEFAULT_POLL_INTERVAL_MS,
        };

        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let startup = match (
            non_empty("FALLWATCH_EMAIL"),
            non_empty("FALLWATCH_PHONE"),
            non_empty("FALLWATCH_CONFIDENCE"),
        ) {
            (Some(email), Some(phone), Some(confidence)) => Some(StartupSubmission::Details {
                email,
                phone,
                confidence,
            }),
            (Some(email), _, _) => Some(StartupSubmission::Email(email)),
            (None, _, _) => None,
        };

        Ok(Self {
            backend_url,
            poll_interval: Duration::from_millis(poll_interval_ms),
            startup,
        })
    }
}
