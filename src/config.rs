//! Plain-data client configuration.
//!
//! [`ClientConfig`] can be deserialized from any serde format the caller
//! prefers. Every field is optional; omitted fields keep the builder defaults.
//!
//! ```
//! use statuspage::config::ClientConfig;
//!
//! let config: ClientConfig = serde_json::from_str(r#"{
//!     "api_key": "my-api-key",
//!     "timeout_ms": 5000,
//!     "retry": { "max_attempts": 3, "backoff": "fixed", "base_delay_ms": 250 }
//! }"#).unwrap();
//!
//! let client = statuspage::Client::from_config(config).unwrap();
//! assert_eq!(client.retry_policy().unwrap().max_attempts(), 3);
//! ```

use crate::client::ClientBuilder;
use crate::retry::{DelayStrategy, RetryPolicy, DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for building a [`Client`](crate::Client).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API root; defaults to the production API.
    pub base_url: Option<String>,
    /// Statuspage API key, sent as `Authorization: OAuth <key>`.
    pub api_key: Option<String>,
    /// Per-attempt timeout of the default transport.
    pub timeout_ms: Option<u64>,
    /// Overrides the `User-Agent` header.
    pub user_agent: Option<String>,
    /// Client-wide retry policy. Absent means no retries.
    pub retry: Option<RetryConfig>,
}

impl ClientConfig {
    /// Applies the configuration to a fresh [`ClientBuilder`].
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or the retry settings are invalid.
    pub fn into_builder(self) -> Result<ClientBuilder> {
        let mut builder = ClientBuilder::new();
        if let Some(base_url) = self.base_url {
            builder = builder.base_url(base_url)?;
        }
        if let Some(api_key) = self.api_key {
            builder = builder.api_key(api_key);
        }
        if let Some(timeout_ms) = self.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        if let Some(retry) = self.retry {
            builder = builder.retry_policy(retry.into_policy()?);
        }
        Ok(builder)
    }
}

/// How the delay between attempts grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backoff {
    /// `base_delay_ms` before every retry.
    Fixed,
    /// `base_delay_ms`, doubling after each retry.
    #[default]
    Exponential,
}

/// Plain-data form of a [`RetryPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts including the first; must be at least 1.
    pub max_attempts: usize,
    pub backoff: Backoff,
    /// Delay before the first retry.
    pub base_delay_ms: u64,
    /// Upper bound for exponential delays.
    pub max_delay_ms: Option<u64>,
    /// Randomize exponential delays.
    pub jitter: bool,
    /// Honor server rate-limit hints up to this long.
    pub rate_limit_max_wait_ms: Option<u64>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: Backoff::Exponential,
            base_delay_ms: DEFAULT_BASE_DELAY.as_millis() as u64,
            max_delay_ms: None,
            jitter: false,
            rate_limit_max_wait_ms: None,
        }
    }
}

impl RetryConfig {
    /// Validates the settings into a policy retrying transient failures.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`](crate::Error::Configuration) if
    /// `max_attempts` is zero or the delay cap is below the base delay.
    pub fn into_policy(self) -> Result<RetryPolicy> {
        let base = Duration::from_millis(self.base_delay_ms);
        let delay = match self.backoff {
            Backoff::Fixed => DelayStrategy::Fixed(base),
            Backoff::Exponential => DelayStrategy::Exponential {
                base,
                max: self.max_delay_ms.map(Duration::from_millis),
                jitter: self.jitter,
            },
        };

        let mut builder = RetryPolicy::builder()
            .max_attempts(self.max_attempts)
            .delay(delay);
        if let Some(max_wait) = self.rate_limit_max_wait_ms {
            builder = builder.rate_limit_max_wait(Duration::from_millis(max_wait));
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: ClientConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ClientConfig::default());

        let client = crate::Client::from_config(config).unwrap();
        assert_eq!(client.base_url().as_str(), crate::client::DEFAULT_BASE_URL);
        assert!(client.retry_policy().is_none());
    }

    #[test]
    fn test_retry_defaults_match_policy_defaults() {
        let retry: RetryConfig = serde_json::from_str("{}").unwrap();
        let policy = retry.into_policy().unwrap();
        let default = RetryPolicy::default();

        assert_eq!(policy.max_attempts(), default.max_attempts());
        assert_eq!(policy.delay(), default.delay());
    }

    #[test]
    fn test_exponential_with_cap() {
        let retry: RetryConfig = serde_json::from_str(
            r#"{"backoff": "exponential", "base_delay_ms": 50, "max_delay_ms": 400, "jitter": true}"#,
        )
        .unwrap();

        assert_eq!(
            retry.into_policy().unwrap().delay(),
            DelayStrategy::Exponential {
                base: Duration::from_millis(50),
                max: Some(Duration::from_millis(400)),
                jitter: true,
            }
        );
    }

    #[test]
    fn test_invalid_retry_config() {
        let zero = RetryConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert!(matches!(zero.into_policy(), Err(Error::Configuration(_))));

        let inverted = RetryConfig {
            base_delay_ms: 1_000,
            max_delay_ms: Some(10),
            ..Default::default()
        };
        assert!(matches!(inverted.into_policy(), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ClientConfig {
            base_url: Some("::not a url::".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            crate::Client::from_config(config),
            Err(Error::InvalidUri { .. })
        ));
    }
}
