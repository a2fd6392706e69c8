//! Flattening of nested contract trees into `(path, address)` entries.

use crate::chain::{ContractNode, ContractTree};

/// Groups nested deeper than this are skipped.
pub const MAX_CONTRACT_DEPTH: usize = 32;

/// One leaf of a contract tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractEntry {
    /// Dot-joined key path, e.g. `"v3.erc20Router"`.
    pub path: String,
    pub address: String,
}

impl ContractEntry {
    pub fn new(path: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            address: address.into(),
        }
    }
}

/// Walk `tree` depth-first and collect every string leaf.
///
/// Entries come out in document key order at every level. Values that are
/// neither strings nor objects are skipped.
pub fn flatten(tree: &ContractTree) -> Vec<ContractEntry> {
    let mut entries = Vec::new();
    walk(tree, "", 0, &mut entries);
    entries
}

fn walk(tree: &ContractTree, prefix: &str, depth: usize, out: &mut Vec<ContractEntry>) {
    for (key, node) in tree {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match node {
            ContractNode::Address(address) => out.push(ContractEntry::new(path, address.clone())),
            ContractNode::Group(children) => {
                if depth + 1 >= MAX_CONTRACT_DEPTH {
                    tracing::warn!(path = %path, depth, "contract tree too deep, skipping group");
                    continue;
                }
                walk(children, &path, depth + 1, out);
            }
            ContractNode::Unsupported(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(json: &str) -> ContractTree {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn flattens_nested_paths_in_order() {
        let t = tree(r#"{ "multicall3": "0xAA", "v3": { "erc20Router": "0xBB" } }"#);
        assert_eq!(
            flatten(&t),
            vec![
                ContractEntry::new("multicall3", "0xAA"),
                ContractEntry::new("v3.erc20Router", "0xBB"),
            ]
        );
    }

    #[test]
    fn keeps_document_order_not_sorted_order() {
        let t = tree(r#"{ "zeta": "0x1", "alpha": { "y": "0x2", "x": "0x3" }, "beta": "0x4" }"#);
        let paths: Vec<_> = flatten(&t).into_iter().map(|e| e.path).collect();
        assert_eq!(paths, vec!["zeta", "alpha.y", "alpha.x", "beta"]);
    }

    #[test]
    fn skips_non_string_leaves() {
        let t = tree(r#"{ "a": null, "b": 12, "c": ["0x1"], "d": true, "e": { "f": null, "g": "0x9" } }"#);
        assert_eq!(flatten(&t), vec![ContractEntry::new("e.g", "0x9")]);
    }

    #[test]
    fn empty_groups_yield_nothing() {
        assert!(flatten(&tree("{}")).is_empty());
        assert!(flatten(&tree(r#"{ "v2": {} }"#)).is_empty());
    }

    #[test]
    fn deep_groups_are_cut_off() {
        let mut json = String::from("\"0xDEEP\"");
        for _ in 0..(MAX_CONTRACT_DEPTH + 2) {
            json = format!("{{ \"n\": {json} }}");
        }
        let t = tree(&json);
        assert!(flatten(&t).is_empty());

        let mut shallow = String::from("\"0xOK\"");
        for _ in 0..3 {
            shallow = format!("{{ \"n\": {shallow} }}");
        }
        assert_eq!(flatten(&tree(&shallow)), vec![ContractEntry::new("n.n.n", "0xOK")]);
    }
}
