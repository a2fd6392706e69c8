//! Error types for fetching chain data and running detections.

use thiserror::Error;

/// Errors raised while retrieving or parsing the chain configuration.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (connection refused, timeout, TLS, …).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The endpoint answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not valid JSON, or a chain entry had the wrong types.
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Valid JSON, but neither `{ "chains": [...] }` nor a bare array.
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("{0}")]
    Other(String),
}

impl FetchError {
    /// Returns `true` if a caller could reasonably retry the fetch.
    ///
    /// The detector never retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Errors surfaced by [`Detector::check`](crate::Detector::check).
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("please enter an address")]
    EmptyInput,

    #[error("invalid address format `{input}`: expected an EVM (0x...), Solana (base58) or Bitcoin address")]
    InvalidAddress { input: String },

    /// The chain-data fetch failed; the underlying error is passed through as-is.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl DetectError {
    /// Returns `true` for input errors the caller should re-prompt on.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::InvalidAddress { .. })
    }
}
