//! Configuration module
//!
//! Connection settings for a Paperless server, loaded from the environment
//! (and a `.env` file when present) or built in code.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

const TASK_POLL_DELAY_MS: u64 = 500;
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Credentials sent with every request.
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    /// API token, sent as `Authorization: Token <token>`
    Token(String),
    /// HTTP basic authentication
    Basic { username: String, password: String },
}

// Secrets stay out of logs.
impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::Token(_) => f.write_str("Token(***)"),
            Auth::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PaperlessConfig {
    /// Server root, e.g. `https://paperless.example.com/`. Always ends with `/`.
    pub base_url: String,
    pub auth: Auth,
    /// Pause between two lookups of a running import task
    pub task_poll_delay: Duration,
    /// Give up waiting for an import task after this many lookups. `None` waits forever.
    pub max_poll_attempts: Option<u32>,
    pub request_timeout: Duration,
}

impl PaperlessConfig {
    pub fn new(base_url: impl Into<String>, auth: Auth) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            auth,
            task_poll_delay: Duration::from_millis(TASK_POLL_DELAY_MS),
            max_poll_attempts: None,
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn with_task_poll_delay(mut self, delay: Duration) -> Self {
        self.task_poll_delay = delay;
        self
    }

    pub fn with_max_poll_attempts(mut self, attempts: u32) -> Self {
        self.max_poll_attempts = Some(attempts);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Load from `PAPERLESS_*` environment variables.
    ///
    /// `PAPERLESS_BASE_URL` is required, as is either `PAPERLESS_TOKEN` or the pair
    /// `PAPERLESS_USERNAME`/`PAPERLESS_PASSWORD`. The token wins when both are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("PAPERLESS_BASE_URL")
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing("PAPERLESS_BASE_URL"))?;

        let auth = match lookup("PAPERLESS_TOKEN") {
            Some(token) if !token.is_empty() => Auth::Token(token),
            _ => {
                let username = lookup("PAPERLESS_USERNAME")
                    .ok_or(ConfigError::Missing("PAPERLESS_TOKEN or PAPERLESS_USERNAME"))?;
                let password =
                    lookup("PAPERLESS_PASSWORD").ok_or(ConfigError::Missing("PAPERLESS_PASSWORD"))?;
                Auth::Basic { username, password }
            }
        };

        let mut config = Self::new(base_url.trim(), auth);

        if let Some(raw) = lookup("PAPERLESS_TASK_POLL_DELAY_MS") {
            config.task_poll_delay =
                Duration::from_millis(parse_number("PAPERLESS_TASK_POLL_DELAY_MS", &raw)?);
        }
        if let Some(raw) = lookup("PAPERLESS_TASK_MAX_POLLS") {
            config.max_poll_attempts = Some(parse_number("PAPERLESS_TASK_MAX_POLLS", &raw)?);
        }
        if let Some(raw) = lookup("PAPERLESS_HTTP_TIMEOUT_SECS") {
            config.request_timeout =
                Duration::from_secs(parse_number("PAPERLESS_HTTP_TIMEOUT_SECS", &raw)?);
        }

        config.validate()?;
        tracing::debug!(
            base_url = %config.base_url,
            auth = ?config.auth,
            max_poll_attempts = ?config.max_poll_attempts,
            "Loaded Paperless configuration"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "PAPERLESS_BASE_URL",
                message: format!("expected an http(s) URL, got '{}'", self.base_url),
            });
        }

        if self.task_poll_delay.is_zero() {
            return Err(ConfigError::Invalid {
                key: "PAPERLESS_TASK_POLL_DELAY_MS",
                message: "must be greater than zero".to_string(),
            });
        }

        if self.max_poll_attempts == Some(0) {
            return Err(ConfigError::Invalid {
                key: "PAPERLESS_TASK_MAX_POLLS",
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

fn normalize_base_url(mut base_url: String) -> String {
    if !base_url.ends_with('/') {
        base_url.push('/');
    }
    base_url
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        message: format!("expected a number, got '{}'", raw),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = PaperlessConfig::from_lookup(lookup(&[
            ("PAPERLESS_BASE_URL", "https://paperless.example.com"),
            ("PAPERLESS_TOKEN", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://paperless.example.com/");
        assert_eq!(config.auth, Auth::Token("secret".to_string()));
        assert_eq!(config.task_poll_delay, Duration::from_millis(500));
        assert_eq!(config.max_poll_attempts, None);
        assert_eq!(config.request_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_basic_auth_and_overrides() {
        let config = PaperlessConfig::from_lookup(lookup(&[
            ("PAPERLESS_BASE_URL", "http://localhost:8000/"),
            ("PAPERLESS_USERNAME", "admin"),
            ("PAPERLESS_PASSWORD", "hunter2"),
            ("PAPERLESS_TASK_POLL_DELAY_MS", "250"),
            ("PAPERLESS_TASK_MAX_POLLS", "20"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:8000/");
        assert_eq!(
            config.auth,
            Auth::Basic {
                username: "admin".to_string(),
                password: "hunter2".to_string(),
            }
        );
        assert_eq!(config.task_poll_delay, Duration::from_millis(250));
        assert_eq!(config.max_poll_attempts, Some(20));
    }

    #[test]
    fn test_missing_base_url() {
        let err = PaperlessConfig::from_lookup(lookup(&[("PAPERLESS_TOKEN", "secret")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("PAPERLESS_BASE_URL")));
    }

    #[test]
    fn test_missing_credentials() {
        let err = PaperlessConfig::from_lookup(lookup(&[(
            "PAPERLESS_BASE_URL",
            "https://paperless.example.com",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing(_)));
    }

    #[test]
    fn test_invalid_values() {
        let err = PaperlessConfig::from_lookup(lookup(&[
            ("PAPERLESS_BASE_URL", "ftp://paperless.example.com"),
            ("PAPERLESS_TOKEN", "secret"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "PAPERLESS_BASE_URL",
                ..
            }
        ));

        let err = PaperlessConfig::from_lookup(lookup(&[
            ("PAPERLESS_BASE_URL", "https://paperless.example.com"),
            ("PAPERLESS_TOKEN", "secret"),
            ("PAPERLESS_TASK_POLL_DELAY_MS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "PAPERLESS_TASK_POLL_DELAY_MS",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_delay_is_rejected() {
        let config = PaperlessConfig::new("https://paperless.example.com", Auth::Token("t".into()))
            .with_task_poll_delay(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let auth = Auth::Basic {
            username: "admin".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(!format!("{:?}", auth).contains("hunter2"));
        assert!(!format!("{:?}", Auth::Token("secret".into())).contains("secret"));
    }
}
