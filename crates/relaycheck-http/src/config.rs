//! Configuration for [`HttpChainSource`](crate::HttpChainSource).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Base URL of the public Relay API.
pub const DEFAULT_BASE_URL: &str = "https://api.relay.link";

/// Environment variable that overrides [`DEFAULT_BASE_URL`].
pub const API_URL_ENV: &str = "RELAYCHECK_API_URL";

/// Where and how to fetch the chain list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSourceConfig {
    /// API base URL; the chain list is read from `<base_url>/chains`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Whole-request timeout in milliseconds (default: 15000)
    #[serde(default = "default_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout_ms() -> u64 {
    15_000
}
fn default_user_agent() -> String {
    concat!("relaycheck/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpSourceConfig {
    /// Defaults, with the base URL taken from `RELAYCHECK_API_URL` when it is
    /// set and non-empty.
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => config.with_base_url(url.trim()),
            _ => config,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = timeout.as_millis().min(u64::MAX as u128) as u64;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// The chain-list endpoint, `<base_url>/chains`.
    pub fn chains_url(&self) -> String {
        format!("{}/chains", self.base_url.trim_end_matches('/'))
    }
}
