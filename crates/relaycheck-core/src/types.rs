//! Detection output types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::chain::Chain;
use crate::report::MatchGroups;

// ─── MatchKind ────────────────────────────────────────────────────────────────

/// Which field of the chain configuration an address was found in.
///
/// Serialized inline on [`AddressMatch`] as `"matchType"`, plus
/// `"contractType"` for contract matches only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "matchType", rename_all = "lowercase")]
pub enum MatchKind {
    /// Listed in the chain's `solverAddresses`.
    Solver,
    /// The chain's `protocol.v2.depository`.
    Depository,
    /// A leaf of the chain's contract tree.
    Contract {
        /// Dot-joined path of the contract, e.g. `"v3.erc20Router"`.
        #[serde(rename = "contractType")]
        contract_type: String,
    },
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Solver => "solver",
            Self::Depository => "depository",
            Self::Contract { .. } => "contract",
        }
    }

    pub fn contract_type(&self) -> Option<&str> {
        match self {
            Self::Contract { contract_type } => Some(contract_type),
            _ => None,
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contract { contract_type } => write!(f, "contract ({contract_type})"),
            other => f.write_str(other.as_str()),
        }
    }
}

// ─── AddressMatch ─────────────────────────────────────────────────────────────

/// One occurrence of the queried address in the chain configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressMatch {
    pub chain_id: u64,
    pub chain_name: String,
    pub chain_display_name: String,
    pub explorer_url: String,
    pub icon_url: String,
    #[serde(flatten)]
    pub kind: MatchKind,
    /// The address as stored in the chain data, not as queried.
    pub address: String,
}

impl AddressMatch {
    pub fn new(chain: &Chain, kind: MatchKind, address: impl Into<String>) -> Self {
        Self {
            chain_id: chain.id,
            chain_name: chain.name.clone(),
            chain_display_name: chain.display_name.clone(),
            explorer_url: chain.explorer_url.clone(),
            icon_url: chain.icon_url.clone(),
            kind,
            address: address.into(),
        }
    }

    pub fn contract_type(&self) -> Option<&str> {
        self.kind.contract_type()
    }

    /// Display name, falling back to the canonical name when none is published.
    pub fn chain_label(&self) -> &str {
        if self.chain_display_name.is_empty() {
            &self.chain_name
        } else {
            &self.chain_display_name
        }
    }

    /// Block-explorer deep link: `<explorerUrl>/address/<address>`.
    pub fn explorer_link(&self) -> Option<String> {
        let base = self.explorer_url.trim_end_matches('/');
        if base.is_empty() {
            return None;
        }
        Some(format!("{base}/address/{}", self.address))
    }
}

// ─── DetectionResult ──────────────────────────────────────────────────────────

/// The outcome of one detection request.
///
/// `is_relay` is derived from the match list at construction and cannot be
/// set independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    address: String,
    is_relay: bool,
    matches: Vec<AddressMatch>,
}

impl DetectionResult {
    pub fn new(address: impl Into<String>, matches: Vec<AddressMatch>) -> Self {
        Self {
            address: address.into(),
            is_relay: !matches.is_empty(),
            matches,
        }
    }

    /// The normalized address that was queried.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// `true` iff at least one match was found.
    pub fn is_relay(&self) -> bool {
        self.is_relay
    }

    pub fn matches(&self) -> &[AddressMatch] {
        &self.matches
    }

    pub fn into_matches(self) -> Vec<AddressMatch> {
        self.matches
    }

    /// Matches grouped by kind for display.
    pub fn groups(&self) -> MatchGroups<'_> {
        MatchGroups::from_matches(&self.matches)
    }
}
