//! relaycheck-core — decide whether an address belongs to Relay Protocol infrastructure.
//!
//! This crate defines:
//! - [`validator`]: EVM / SVM / Bitcoin address shape checks
//! - [`Chain`]: the published per-chain configuration
//! - [`contracts::flatten`]: nested contract trees to `(path, address)` entries
//! - [`addresses_match`]: the per-VM equality rule
//! - [`Detector`]: scans every chain and returns a [`DetectionResult`]
//! - [`ChainSource`]: the trait the detector fetches chains through
//! - [`report`]: grouping and wording helpers for presenting results
//!
//! The HTTP implementation of [`ChainSource`] lives in `relaycheck-http`.

pub mod chain;
pub mod contracts;
pub mod detector;
pub mod error;
pub mod matching;
pub mod report;
pub mod source;
pub mod types;
pub mod validator;

pub use chain::{parse_chains, Chain, ChainProtocol, ContractNode, ContractTree, ProtocolV2, VmType};
pub use contracts::{flatten, ContractEntry};
pub use detector::{match_chain, match_chains, Detector};
pub use error::{DetectError, FetchError};
pub use matching::{addresses_match, addresses_match_tag};
pub use report::{format_contract_type, truncate_address, ContractCategory, MatchGroups};
pub use source::{ChainSource, StaticChainSource};
pub use types::{AddressMatch, DetectionResult, MatchKind};
pub use validator::{classify, is_valid_address, validate_input, AddressFormat, BitcoinKind};
