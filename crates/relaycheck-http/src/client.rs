//! `ChainSource` backed by `reqwest`.

use async_trait::async_trait;
use std::time::Instant;

use relaycheck_core::{parse_chains, Chain, ChainSource, FetchError};

use crate::config::HttpSourceConfig;

/// Fetches the chain list with one `GET <base_url>/chains` per call.
pub struct HttpChainSource {
    url: String,
    http: reqwest::Client,
}

impl HttpChainSource {
    pub fn new(config: HttpSourceConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| FetchError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            url: config.chains_url(),
            http,
        })
    }

    /// Default configuration against the given API base URL.
    pub fn default_for(base_url: impl Into<String>) -> Result<Self, FetchError> {
        Self::new(HttpSourceConfig::default().with_base_url(base_url))
    }
}

#[async_trait]
impl ChainSource for HttpChainSource {
    async fn fetch_chains(&self) -> Result<Vec<Chain>, FetchError> {
        let started = Instant::now();
        tracing::debug!(url = %self.url, "fetching chains");

        let resp = self
            .http
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::debug!(url = %self.url, status = status.as_u16(), "chain fetch rejected");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;
        let chains = parse_chains(&body)?;

        tracing::debug!(
            url = %self.url,
            chains = chains.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "chains fetched"
        );
        Ok(chains)
    }

    fn url(&self) -> &str {
        &self.url
    }
}
