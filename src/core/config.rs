//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (and a `.env` file, if present) on top of defaults.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

/// Default Feedly API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://cloud.feedly.com/v3";

/// Default timeout for a single Feedly request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Feedly API access.
    pub feedly: FeedlyConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Feedly API access configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct FeedlyConfig {
    /// Static bearer token sent with every request.
    pub access_token: String,

    /// API base URL, without a trailing endpoint.
    pub base_url: String,

    /// Upper bound on a single request, connect to last byte.
    pub timeout: Duration,
}

/// Custom Debug implementation to redact the token from logs.
impl std::fmt::Debug for FeedlyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedlyConfig")
            .field(
                "access_token",
                &if self.access_token.is_empty() {
                    "[MISSING]"
                } else {
                    "[REDACTED]"
                },
            )
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for FeedlyConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "feedly-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            feedly: FeedlyConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    ///
    /// The access token is empty; set `feedly.access_token` before building
    /// a server from it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// `FEEDLY_ACCESS_TOKEN` is required. Server settings use the `MCP_`
    /// prefix, e.g. `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        config.feedly.access_token = std::env::var("FEEDLY_ACCESS_TOKEN")
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| Error::config("FEEDLY_ACCESS_TOKEN environment variable not set"))?;

        if let Ok(base_url) = std::env::var("FEEDLY_API_BASE_URL") {
            info!("Using Feedly API base URL: {}", base_url);
            config.feedly.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("FEEDLY_TIMEOUT_SECS") {
            let secs: u64 = timeout.parse().map_err(|_| {
                Error::config(format!("FEEDLY_TIMEOUT_SECS must be a whole number, got '{}'", timeout))
            })?;
            if secs == 0 {
                return Err(Error::config("FEEDLY_TIMEOUT_SECS must be greater than zero"));
            }
            config.feedly.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn clear_feedly_env() {
        unsafe {
            std::env::remove_var("FEEDLY_ACCESS_TOKEN");
            std::env::remove_var("FEEDLY_API_BASE_URL");
            std::env::remove_var("FEEDLY_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_token_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_feedly_env();
        unsafe {
            std::env::set_var("FEEDLY_ACCESS_TOKEN", " token_12345 ");
            std::env::set_var("FEEDLY_TIMEOUT_SECS", "7");
        }
        let config = Config::from_env().unwrap();
        assert_eq!(config.feedly.access_token, "token_12345");
        assert_eq!(config.feedly.timeout, Duration::from_secs(7));
        assert_eq!(config.feedly.base_url, DEFAULT_API_BASE_URL);
        clear_feedly_env();
    }

    #[test]
    fn test_missing_token_fails_fast() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_feedly_env();
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("FEEDLY_ACCESS_TOKEN"));
    }

    #[test]
    fn test_blank_token_fails_fast() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_feedly_env();
        unsafe {
            std::env::set_var("FEEDLY_ACCESS_TOKEN", "   ");
        }
        assert!(Config::from_env().is_err());
        clear_feedly_env();
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_feedly_env();
        unsafe {
            std::env::set_var("FEEDLY_ACCESS_TOKEN", "token");
            std::env::set_var("FEEDLY_TIMEOUT_SECS", "soon");
        }
        assert!(Config::from_env().is_err());
        clear_feedly_env();
    }

    #[test]
    fn test_token_redacted_in_debug() {
        let feedly = FeedlyConfig {
            access_token: "super_secret_token".to_string(),
            ..Default::default()
        };
        let debug_str = format!("{:?}", feedly);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_token"));
    }
}
