//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use std::env;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub graph: GraphSettings,
    pub presence: PresenceSettings,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

/// Remote presence API settings
#[derive(Debug, Clone)]
pub struct GraphSettings {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

/// Presence polling settings
#[derive(Debug, Clone)]
pub struct PresenceSettings {
    pub poll_interval_ms: u64,
    pub promotion_secs: u64,
}

impl PresenceSettings {
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    #[must_use]
    pub fn promotion_expiration(&self) -> Duration {
        Duration::from_secs(self.promotion_secs)
    }
}

impl Default for PresenceSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval(),
            promotion_secs: default_promotion_secs(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "presence-bridge".to_string()
}

fn default_graph_base_url() -> String {
    "https://graph.microsoft.com/v1.0".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    30
}

fn default_poll_interval() -> u64 {
    5000
}

fn default_promotion_secs() -> u64 {
    120 // 2 minutes
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is set to an unparsable value
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: match lookup("APP_ENV") {
                    Some(value) => match value.to_lowercase().as_str() {
                        "production" => Environment::Production,
                        "staging" => Environment::Staging,
                        "development" => Environment::Development,
                        _ => return Err(ConfigError::InvalidValue("APP_ENV", value)),
                    },
                    None => Environment::default(),
                },
            },
            graph: GraphSettings {
                base_url: lookup("GRAPH_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or_else(default_graph_base_url),
                connect_timeout_secs: parse_or(
                    &lookup,
                    "GRAPH_CONNECT_TIMEOUT_SECS",
                    default_connect_timeout,
                )?,
                request_timeout_secs: parse_or(
                    &lookup,
                    "GRAPH_REQUEST_TIMEOUT_SECS",
                    default_request_timeout,
                )?,
            },
            presence: PresenceSettings {
                poll_interval_ms: parse_or(
                    &lookup,
                    "PRESENCE_POLL_INTERVAL_MS",
                    default_poll_interval,
                )?,
                promotion_secs: parse_or(&lookup, "PRESENCE_PROMOTION_SECS", default_promotion_secs)?,
            },
        };

        if config.presence.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "PRESENCE_POLL_INTERVAL_MS",
                "0".to_string(),
            ));
        }

        Ok(config)
    }
}

fn parse_or<F>(lookup: &F, key: &'static str, default: fn() -> u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, value)),
        None => Ok(default()),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
