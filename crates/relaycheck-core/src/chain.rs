//! Chain configuration as published by the chain-data endpoint.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::FetchError;

// ─── VmType ───────────────────────────────────────────────────────────────────

/// Virtual-machine family of a chain, which decides how addresses compare.
///
/// Serialized as the bare tag (`"evm"`, `"svm"`, `"bvm"`). Unknown tags are
/// kept verbatim in [`VmType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VmType {
    Evm,
    Svm,
    Bvm,
    Other(String),
}

impl VmType {
    /// Parse a tag exactly as published; matching is case-sensitive.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "evm" => Self::Evm,
            "svm" => Self::Svm,
            "bvm" => Self::Bvm,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Evm => "evm",
            Self::Svm => "svm",
            Self::Bvm => "bvm",
            Self::Other(tag) => tag,
        }
    }

    /// `true` for encodings where letter case is significant (base58, bech32m).
    pub fn is_case_sensitive(&self) -> bool {
        matches!(self, Self::Svm | Self::Bvm)
    }
}

impl Default for VmType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for VmType {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<VmType> for String {
    fn from(vm: VmType) -> Self {
        vm.as_str().to_string()
    }
}

impl fmt::Display for VmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Contract tree ────────────────────────────────────────────────────────────

/// A chain's named contracts, e.g. `{ "v3": { "erc20Router": "0x…" } }`.
/// Key order follows the source document.
pub type ContractTree = IndexMap<String, ContractNode>;

/// One value in a [`ContractTree`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContractNode {
    /// A leaf holding a contract address.
    Address(String),
    /// A nested group of named contracts.
    Group(ContractTree),
    /// Anything else (null, number, array, bool); ignored when matching.
    Unsupported(serde_json::Value),
}

// ─── Protocol block ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainProtocol {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v2: Option<ProtocolV2>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProtocolV2 {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "optional_string")]
    pub depository: Option<String>,
}

// ─── Chain ────────────────────────────────────────────────────────────────────

/// One supported network's configuration.
///
/// Only `id` and `name` are required. Everything else defaults to empty so
/// that a sparse entry simply contributes no matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chain {
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub display_name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub explorer_url: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub icon_url: String,
    #[serde(default, deserialize_with = "nullable_vm_type")]
    pub vm_type: VmType,
    #[serde(default, deserialize_with = "string_list")]
    pub solver_addresses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<ChainProtocol>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "contract_tree")]
    pub contracts: Option<ContractTree>,
}

impl Chain {
    /// The v2 depository address, if the chain publishes a non-empty one.
    pub fn depository(&self) -> Option<&str> {
        self.protocol
            .as_ref()?
            .v2
            .as_ref()?
            .depository
            .as_deref()
            .filter(|d| !d.is_empty())
    }

    /// Number of leaf addresses in the contract tree.
    pub fn contract_count(&self) -> usize {
        self.contracts
            .as_ref()
            .map(|tree| crate::contracts::flatten(tree).len())
            .unwrap_or(0)
    }
}

fn nullable_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

fn nullable_vm_type<'de, D: Deserializer<'de>>(d: D) -> Result<VmType, D::Error> {
    Ok(Option::<String>::deserialize(d)?
        .map(VmType::from)
        .unwrap_or_default())
}

/// A string, or `None` for null or any non-string value.
fn optional_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match serde_json::Value::deserialize(d)? {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

/// Keeps the string elements of a list; a missing, null or non-list value is empty.
fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    let value = serde_json::Value::deserialize(d)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Accepts only an object at the top of the tree; any other value means "no contracts".
fn contract_tree<'de, D: Deserializer<'de>>(d: D) -> Result<Option<ContractTree>, D::Error> {
    Ok(match Option::<ContractNode>::deserialize(d)? {
        Some(ContractNode::Group(tree)) => Some(tree),
        _ => None,
    })
}

// ─── Response body ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ChainsEnvelope {
    #[serde(default)]
    chains: Option<Vec<ChainEntry>>,
}

/// One element of the chain list. Entries that do not fit [`Chain`] are kept
/// raw so they can be reported and dropped.
#[derive(Deserialize)]
#[serde(untagged)]
enum ChainEntry {
    Chain(Chain),
    Malformed(serde_json::Value),
}

fn keep_valid(entries: Vec<ChainEntry>) -> Vec<Chain> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match entry {
            ChainEntry::Chain(chain) => Some(chain),
            ChainEntry::Malformed(value) => match serde_json::from_value::<Chain>(value) {
                Ok(chain) => Some(chain),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping malformed chain entry");
                    None
                }
            },
        })
        .collect()
}

/// Parse a chain-data response body.
///
/// Accepts `{ "chains": [...] }` or, as a fallback, a bare top-level array.
/// Parsing goes straight from text to [`Chain`] so contract key order
/// survives. A list element that is not a valid chain is skipped with a
/// warning; it never fails the whole body.
pub fn parse_chains(body: &str) -> Result<Vec<Chain>, FetchError> {
    match body.trim_start().chars().next() {
        Some('[') => Ok(keep_valid(serde_json::from_str::<Vec<ChainEntry>>(body)?)),
        Some('{') => serde_json::from_str::<ChainsEnvelope>(body)?
            .chains
            .map(keep_valid)
            .ok_or_else(|| FetchError::UnexpectedShape("object without a `chains` array".into())),
        _ => {
            // Surfaces the JSON syntax error if there is one.
            let value: serde_json::Value = serde_json::from_str(body)?;
            Err(FetchError::UnexpectedShape(format!(
                "expected an object or array, got {}",
                json_kind(&value)
            )))
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
