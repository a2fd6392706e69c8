//! The `ChainSource` trait: where the detector gets its chain list from.

use async_trait::async_trait;

use crate::chain::{parse_chains, Chain};
use crate::error::FetchError;

/// Retrieves the current chain configuration.
///
/// Implementations fetch fresh data on every call; the detector keeps no
/// cache. Must be `Send + Sync` so a source can be shared across tasks.
#[async_trait]
pub trait ChainSource: Send + Sync {
    /// Fetch every chain, in the order the source publishes them.
    async fn fetch_chains(&self) -> Result<Vec<Chain>, FetchError>;

    /// The source's identifier (endpoint URL, file path, …).
    fn url(&self) -> &str;
}

#[async_trait]
impl<T: ChainSource + ?Sized> ChainSource for Box<T> {
    async fn fetch_chains(&self) -> Result<Vec<Chain>, FetchError> {
        (**self).fetch_chains().await
    }

    fn url(&self) -> &str {
        (**self).url()
    }
}

// ─── In-memory source ─────────────────────────────────────────────────────────

/// A fixed chain list held in memory.
#[derive(Debug, Clone)]
pub struct StaticChainSource {
    label: String,
    chains: Vec<Chain>,
}

impl StaticChainSource {
    pub fn new(chains: Vec<Chain>) -> Self {
        Self {
            label: "memory".into(),
            chains,
        }
    }

    /// Build from a chain-data document, in either accepted response shape.
    pub fn from_json(json: &str) -> Result<Self, FetchError> {
        Ok(Self::new(parse_chains(json)?))
    }

    /// Set the identifier reported by [`ChainSource::url`].
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }
}

#[async_trait]
impl ChainSource for StaticChainSource {
    async fn fetch_chains(&self) -> Result<Vec<Chain>, FetchError> {
        Ok(self.chains.clone())
    }

    fn url(&self) -> &str {
        &self.label
    }
}
