//! # config — read [`Config`] from environment variables

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;

/// Production Cloud Functions deployment that serves `/snapshot` and `/subscribe`.
pub const DEFAULT_API_BASE_URL: &str = "https://us-central1-lazysignal-prod.cloudfunctions.net";

/// Everything the dashboard service needs at runtime.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the signal backend, without trailing `/`
    pub api_base_url:        String,
    /// Address axum listens on
    pub bind_addr:           SocketAddr,
    /// How long a subscribe status message stays visible
    pub status_clear_after:  Duration,
    /// Data-field identifier sent with custom strategy parameters
    pub data_field:          String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_base_url = std::env::var("API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        let bind_addr: SocketAddr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .context("BIND_ADDR must be a socket address, e.g. 0.0.0.0:3000")?;

        let clear_secs: u64 = std::env::var("STATUS_CLEAR_SECS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .context("STATUS_CLEAR_SECS must be a number")?;

        let mut config = Self::new(&api_base_url)?;
        config.bind_addr = bind_addr;
        config.status_clear_after = Duration::from_secs(clear_secs);
        config.data_field = std::env::var("SUBSCRIBE_DATA_FIELD")
            .unwrap_or_else(|_| "close".to_string());

        Ok(config)
    }

    /// Config with defaults for everything except the backend URL.
    pub fn new(api_base_url: &str) -> anyhow::Result<Self> {
        let trimmed = api_base_url.trim().trim_end_matches('/');

        reqwest::Url::parse(trimmed)
            .with_context(|| format!("API_BASE_URL is not a valid URL: '{trimmed}'"))?;

        Ok(Self {
            api_base_url:       trimmed.to_string(),
            bind_addr:          SocketAddr::from(([0, 0, 0, 0], 3000)),
            status_clear_after: Duration::from_secs(5),
            data_field:         "close".to_string(),
        })
    }

    pub fn snapshot_endpoint(&self) -> String {
        format!("{}/snapshot", self.api_base_url)
    }

    pub fn subscribe_endpoint(&self) -> String {
        format!("{}/subscribe", self.api_base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = Config::new("http://localhost:8080/").unwrap();
        assert_eq!(config.snapshot_endpoint(), "http://localhost:8080/snapshot");
        assert_eq!(config.subscribe_endpoint(), "http://localhost:8080/subscribe");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(Config::new("not a url").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::new(DEFAULT_API_BASE_URL).unwrap();
        assert_eq!(config.status_clear_after, Duration::from_secs(5));
        assert_eq!(config.data_field, "close");
    }
}
