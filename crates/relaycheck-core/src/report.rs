//! Grouping and wording helpers for presenting a [`DetectionResult`](crate::DetectionResult).

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::types::{AddressMatch, MatchKind};

// ─── MatchGroups ──────────────────────────────────────────────────────────────

/// Matches split by kind. Each group keeps the original match order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchGroups<'a> {
    pub solvers: Vec<&'a AddressMatch>,
    pub depositories: Vec<&'a AddressMatch>,
    /// Contract matches keyed by contract path, sorted by path.
    pub contracts: BTreeMap<&'a str, Vec<&'a AddressMatch>>,
}

impl<'a> MatchGroups<'a> {
    pub fn from_matches(matches: &'a [AddressMatch]) -> Self {
        let mut groups = Self::default();
        for m in matches {
            match &m.kind {
                MatchKind::Solver => groups.solvers.push(m),
                MatchKind::Depository => groups.depositories.push(m),
                MatchKind::Contract { contract_type } => {
                    groups.contracts.entry(contract_type.as_str()).or_default().push(m)
                }
            }
        }
        groups
    }

    pub fn total(&self) -> usize {
        self.solvers.len() + self.depositories.len() + self.contract_match_count()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn contract_match_count(&self) -> usize {
        self.contracts.values().map(Vec::len).sum()
    }

    /// Distinct chains among the contract matches.
    pub fn contract_chain_count(&self) -> usize {
        self.contracts
            .values()
            .flatten()
            .map(|m| m.chain_id)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Headline, e.g. `"Relay Protocol Solver & Contract Address"`.
    pub fn title(&self) -> String {
        if self.is_empty() {
            return "Not Part of Relay Protocol".to_string();
        }
        let mut kinds = Vec::new();
        if !self.solvers.is_empty() {
            kinds.push("Solver");
        }
        if !self.depositories.is_empty() {
            kinds.push("Depository");
        }
        if !self.contracts.is_empty() {
            kinds.push("Contract");
        }
        format!("Relay Protocol {} Address", kinds.join(" & "))
    }

    /// Sentence summary of where the address was found. Empty when nothing matched.
    pub fn summary(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let mut parts = vec![format!(
            "This address was found in {} across Relay Protocol chains.",
            plural(self.total(), "match", "matches")
        )];
        if !self.solvers.is_empty() {
            parts.push(format!(
                "It serves as a solver address on {}.",
                plural(self.solvers.len(), "chain", "chains")
            ));
        }
        if !self.depositories.is_empty() {
            parts.push(format!(
                "It is a v2 depository contract on {}.",
                plural(self.depositories.len(), "chain", "chains")
            ));
        }
        if !self.contracts.is_empty() {
            parts.push(format!(
                "It is a protocol contract ({}) on {}.",
                plural(self.contracts.len(), "type", "types"),
                plural(self.contract_chain_count(), "chain", "chains")
            ));
        }
        parts.join(" ")
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    format!("{n} {}", if n == 1 { one } else { many })
}

// ─── Contract naming ──────────────────────────────────────────────────────────

/// Human-readable name for a contract path: `"v3.erc20Router"` → `"V3 ERC20 Router"`.
pub fn format_contract_type(path: &str) -> String {
    path.split('.')
        .map(format_segment)
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_segment(segment: &str) -> String {
    let mut spaced = String::with_capacity(segment.len() + 4);
    for c in segment.chars() {
        if c.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(c);
    }

    let mut chars = spaced.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };

    upcase_erc(&capitalized).trim().to_string()
}

/// `erc20` / `Erc721` → `ERC20` / `ERC721`.
fn upcase_erc(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < chars.len() {
        let is_erc = i + 3 < chars.len()
            && chars[i].eq_ignore_ascii_case(&'e')
            && chars[i + 1].eq_ignore_ascii_case(&'r')
            && chars[i + 2].eq_ignore_ascii_case(&'c')
            && chars[i + 3].is_ascii_digit();
        if is_erc {
            out.push_str("ERC");
            i += 3;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

/// Rough role of a contract, inferred from its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractCategory {
    Multicall,
    Router,
    Approval,
    Receiver,
    Other,
}

impl ContractCategory {
    pub fn from_path(path: &str) -> Self {
        let lower = path.to_lowercase();
        if lower.contains("multicall") {
            Self::Multicall
        } else if lower.contains("router") {
            Self::Router
        } else if lower.contains("approval") || lower.contains("proxy") {
            Self::Approval
        } else if lower.contains("receiver") {
            Self::Receiver
        } else {
            Self::Other
        }
    }
}

impl fmt::Display for ContractCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Multicall => "multicall",
            Self::Router => "router",
            Self::Approval => "approval",
            Self::Receiver => "receiver",
            Self::Other => "contract",
        };
        f.write_str(label)
    }
}

/// Shorten long addresses to `0x1234...abcd`.
pub fn truncate_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::Chain;
    use crate::types::DetectionResult;

    fn chain(id: u64) -> Chain {
        serde_json::from_value(serde_json::json!({ "id": id, "name": format!("chain-{id}") })).unwrap()
    }

    fn contract(id: u64, path: &str) -> AddressMatch {
        AddressMatch::new(
            &chain(id),
            MatchKind::Contract { contract_type: path.into() },
            "0xAA",
        )
    }

    fn solver(id: u64) -> AddressMatch {
        AddressMatch::new(&chain(id), MatchKind::Solver, "0xAA")
    }

    #[test]
    fn groups_by_kind_and_path() {
        let matches = vec![
            contract(1, "v3.erc20Router"),
            solver(1),
            contract(8453, "multicall3"),
            contract(10, "multicall3"),
        ];
        let groups = MatchGroups::from_matches(&matches);
        assert_eq!(groups.solvers.len(), 1);
        assert!(groups.depositories.is_empty());
        let paths: Vec<_> = groups.contracts.keys().copied().collect();
        assert_eq!(paths, vec!["multicall3", "v3.erc20Router"]);
        let multicall_chains: Vec<_> = groups.contracts["multicall3"].iter().map(|m| m.chain_id).collect();
        assert_eq!(multicall_chains, vec![8453, 10]);
        assert_eq!(groups.total(), 4);
        assert_eq!(groups.contract_chain_count(), 3);
    }

    #[test]
    fn title_lists_found_kinds() {
        let none = DetectionResult::new("0xAA", vec![]);
        assert_eq!(none.groups().title(), "Not Part of Relay Protocol");
        assert_eq!(none.groups().summary(), "");

        let both = DetectionResult::new("0xAA", vec![contract(1, "multicall3"), solver(1)]);
        assert_eq!(both.groups().title(), "Relay Protocol Solver & Contract Address");
    }

    #[test]
    fn summary_counts() {
        let result = DetectionResult::new(
            "0xAA",
            vec![solver(1), contract(1, "multicall3"), contract(10, "multicall3")],
        );
        assert_eq!(
            result.groups().summary(),
            "This address was found in 3 matches across Relay Protocol chains. \
             It serves as a solver address on 1 chain. \
             It is a protocol contract (1 type) on 2 chains."
        );
    }

    #[test]
    fn formats_contract_paths() {
        assert_eq!(format_contract_type("v3.erc20Router"), "V3 ERC20 Router");
        assert_eq!(format_contract_type("multicall3"), "Multicall3");
        assert_eq!(format_contract_type("relayReceiver"), "Relay Receiver");
        assert_eq!(format_contract_type("v2.approvalProxy"), "V2 Approval Proxy");
        assert_eq!(format_contract_type("erc721Holder"), "ERC721 Holder");
        assert_eq!(format_contract_type(""), "");
    }

    #[test]
    fn categorises_paths() {
        assert_eq!(ContractCategory::from_path("multicall3"), ContractCategory::Multicall);
        assert_eq!(ContractCategory::from_path("v3.erc20Router"), ContractCategory::Router);
        assert_eq!(ContractCategory::from_path("approvalProxy"), ContractCategory::Approval);
        assert_eq!(ContractCategory::from_path("v2.Proxy"), ContractCategory::Approval);
        assert_eq!(ContractCategory::from_path("relayReceiver"), ContractCategory::Receiver);
        assert_eq!(ContractCategory::from_path("creditManager"), ContractCategory::Other);
    }

    #[test]
    fn truncates_long_addresses() {
        assert_eq!(
            truncate_address("0xa4C123B1612dD272D1371c17149d439536B3216f"),
            "0xa4C1...216f"
        );
        assert_eq!(truncate_address("0x12345678"), "0x12345678");
    }
}
