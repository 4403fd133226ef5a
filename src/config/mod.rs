//! Configuration module for the WHOIS squads server.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Default remote WHOIS API endpoint.
pub const DEFAULT_API_URL: &str = "https://fdnd.directus.app/items";

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8000;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote WHOIS API, without trailing slash
    pub api_url: String,
    /// Optional timeout applied to every outbound WHOIS request
    pub request_timeout: Option<Duration>,
    /// Directory served for static assets
    pub static_dir: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON lines instead of the human readable format
    pub log_json: bool,
}

/// Error raised when an environment variable holds an unusable value.
#[derive(Debug)]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid value for {}: {:?}", self.key, self.value)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_url = env::var("WHOIS_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let request_timeout = match env::var("WHOIS_TIMEOUT_SECS") {
            Ok(value) => Some(Duration::from_secs(value.trim().parse().map_err(|_| {
                ConfigError {
                    key: "WHOIS_TIMEOUT_SECS",
                    value,
                }
            })?)),
            Err(_) => None,
        };

        let static_dir = env::var("WHOIS_STATIC_DIR")
            .unwrap_or_else(|_| "public".to_string())
            .into();

        let port = match env::var("PORT") {
            Ok(value) => value.trim().parse::<u16>().map_err(|_| ConfigError {
                key: "PORT",
                value,
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let host = match env::var("WHOIS_BIND_HOST") {
            Ok(value) => value.trim().parse::<IpAddr>().map_err(|_| ConfigError {
                key: "WHOIS_BIND_HOST",
                value,
            })?,
            Err(_) => IpAddr::from([0, 0, 0, 0]),
        };

        let log_level = env::var("WHOIS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_json = env::var("WHOIS_LOG_FORMAT")
            .map(|format| format.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Ok(Self {
            api_url,
            request_timeout,
            static_dir,
            bind_addr: SocketAddr::new(host, port),
            log_level,
            log_json,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both cases touch the same process-wide variables, so they run in one test.
    #[test]
    fn test_config_from_env() {
        for key in [
            "WHOIS_API_URL",
            "WHOIS_TIMEOUT_SECS",
            "WHOIS_STATIC_DIR",
            "PORT",
            "WHOIS_BIND_HOST",
            "WHOIS_LOG_LEVEL",
            "WHOIS_LOG_FORMAT",
        ] {
            env::remove_var(key);
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.request_timeout.is_none());
        assert_eq!(config.static_dir, PathBuf::from("public"));
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8000");
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);

        env::set_var("WHOIS_API_URL", "http://localhost:9000/items/");
        env::set_var("WHOIS_TIMEOUT_SECS", "5");
        env::set_var("PORT", "3000");
        let config = Config::from_env().unwrap();
        assert_eq!(config.api_url, "http://localhost:9000/items");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.bind_addr.port(), 3000);

        env::set_var("PORT", "not-a-port");
        let err = Config::from_env().unwrap_err();
        assert_eq!(err.key, "PORT");

        env::remove_var("WHOIS_API_URL");
        env::remove_var("WHOIS_TIMEOUT_SECS");
        env::remove_var("PORT");
    }
}
