//! relaycheck-http — fetch the Relay chain configuration over HTTP.
//!
//! [`HttpChainSource`] implements [`relaycheck_core::ChainSource`] with a
//! single `GET <base_url>/chains` per call. No caching, no retries.

pub mod client;
pub mod config;

pub use client::HttpChainSource;
pub use config::{HttpSourceConfig, API_URL_ENV, DEFAULT_BASE_URL};
